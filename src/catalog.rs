//! Built-in record schemas, addressable by name from the command line.
use crate::error::SchemaResult;
use crate::format;
use crate::schema::{
    AllowedValue, Field, FieldSetSchema, FloatRange, IntegerRange, IntegerRestriction, Predicate,
    Schema, SetRestriction, SizeRestriction, StringRestriction,
};
use crate::storage::INTERNAL_ID_FIELD;

#[derive(Debug)]
pub struct Entry {
    pub name: &'static str,
    pub description: &'static str,
    build: fn() -> SchemaResult<FieldSetSchema>,
}

impl Entry {
    pub fn build(&self) -> SchemaResult<FieldSetSchema> {
        (self.build)()
    }
}

static ENTRIES: &[Entry] = &[
    Entry {
        name: "user-profile",
        description: "an account holder's public profile",
        build: user_profile,
    },
    Entry {
        name: "place",
        description: "a rated point of interest",
        build: place,
    },
];

pub fn entries() -> &'static [Entry] {
    ENTRIES
}

pub fn find(name: &str) -> Option<&'static Entry> {
    ENTRIES.iter().find(|e| e.name == name)
}

fn storage_id() -> SchemaResult<Field> {
    let id = Schema::string([SizeRestriction::exactly(24).with_description("hex object id")])?;
    Ok(Field::new("storage id assigned on insert", id))
}

fn user_profile() -> SchemaResult<FieldSetSchema> {
    let handle = Schema::string([
        StringRestriction::from(SizeRestriction::new(3, 32)?),
        StringRestriction::from(Predicate::<str>::new("lowercase letters, digits, '_' or '-'", |s| {
            s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
        })),
    ])?;
    let email = Schema::string([
        StringRestriction::from(SizeRestriction::new(3, 254)?),
        format::email(),
    ])?;
    let age = Schema::optional(Schema::integer([IntegerRange::new(13, 150)?])?)?;
    let website = Schema::optional(Schema::string([format::url()])?)?;
    let tag = Schema::string([SizeRestriction::new(1, 24)?])?;
    let tags = Schema::array("free-form interest tags", tag, [SizeRestriction::new(0, 10)?])?;
    let plan = Schema::string([SetRestriction::<String>::documented([
        AllowedValue::new("no billing", "free".to_string()),
        AllowedValue::new("monthly billing", "pro".to_string()),
        AllowedValue::new("invoiced", "enterprise".to_string()),
    ])?])?;

    FieldSetSchema::new(
        "user profile",
        [
            (INTERNAL_ID_FIELD, storage_id()?),
            ("handle", Field::new("public handle", handle)),
            ("email", Field::new("contact address", email)),
            ("age", Field::new("age in years", age)),
            ("website", Field::new("personal site", website)),
            ("verified", Field::new("email ownership confirmed", Schema::boolean())),
            ("plan", Field::new("billing plan", plan)),
            ("tags", Field::new("interests", tags)),
        ],
    )
}

fn place() -> SchemaResult<FieldSetSchema> {
    let name = Schema::string([SizeRestriction::new(1, 120)?])?;
    let rating = Schema::float([FloatRange::new(0.0, 5.0)?])?;
    let lat = Schema::float([FloatRange::new(-90.0, 90.0)?])?;
    let lon = Schema::float([FloatRange::new(-180.0, 180.0)?.exclusive_max()])?;
    let location = Schema::field_set(
        "WGS84 coordinates",
        [("lat", Field::new("latitude", lat)), ("lon", Field::new("longitude", lon))],
    )?;
    let kinds = ["food", "drink", "lodging", "sight", "shop"];
    let category = Schema::string([SetRestriction::<String>::new(kinds)?])?;
    let categories = Schema::array("categories", category, [SizeRestriction::new(1, 3)?])?;
    let storeys = Predicate::<i64>::new("storeys count from 1 above ground and -1 below", |n| {
        *n != 0
    });
    let floors = Schema::optional(Schema::integer([
        IntegerRestriction::from(IntegerRange::new(-5, 200)?),
        IntegerRestriction::from(storeys),
    ])?)?;

    FieldSetSchema::new(
        "place",
        [
            (INTERNAL_ID_FIELD, storage_id()?),
            ("name", Field::new("display name", name)),
            ("rating", Field::new("average rating", rating)),
            ("location", Field::new("where it is", location)),
            ("categories", Field::new("what it is", categories)),
            ("floors", Field::new("storeys above or below ground", floors)),
        ],
    )
}

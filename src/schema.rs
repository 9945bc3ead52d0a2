//! Schema model: a closed, tagged description of an expected value shape.
//!
//! Trees are built once through the constructors below, which check the
//! structural rules (non-empty restriction lists, unique field names, no
//! doubled optionality) and return a [`SchemaError`] otherwise. After that a
//! schema is immutable and can be shared across threads freely.
pub mod restriction;
pub mod union;

use std::fmt;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::error::{SchemaError, SchemaResult};

pub use restriction::{
    AllowedValue, FloatRange, FloatRestriction, IntegerRange, IntegerRestriction, Predicate,
    Restriction, RestrictionKind, SetRestriction, SizeRestriction, StringRestriction,
};
pub use union::{Member, UnionSchema};

// ------------------------------- Kinds ------------------------------------ //

/// Discriminant of a schema node. `Undefined` only ever appears as an
/// unnamed-union member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Boolean,
    String,
    Float,
    Integer,
    Array,
    FieldSet,
    Union,
    Undefined,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShapeKind::Boolean => "Boolean",
            ShapeKind::String => "String",
            ShapeKind::Float => "Float",
            ShapeKind::Integer => "Integer",
            ShapeKind::Array => "Array",
            ShapeKind::FieldSet => "FieldSet",
            ShapeKind::Union => "Union",
            ShapeKind::Undefined => "Undefined",
        })
    }
}

// -------------------------------- Tree ------------------------------------ //

#[derive(Debug, Clone)]
pub enum Schema {
    Boolean,
    String(StringSchema),
    Float(FloatSchema),
    Integer(IntegerSchema),
    Array(ArraySchema),
    FieldSet(FieldSetSchema),
    Union(UnionSchema),
}

impl Schema {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Schema::Boolean => ShapeKind::Boolean,
            Schema::String(_) => ShapeKind::String,
            Schema::Float(_) => ShapeKind::Float,
            Schema::Integer(_) => ShapeKind::Integer,
            Schema::Array(_) => ShapeKind::Array,
            Schema::FieldSet(_) => ShapeKind::FieldSet,
            Schema::Union(_) => ShapeKind::Union,
        }
    }

    pub fn boolean() -> Self {
        Schema::Boolean
    }

    pub fn string<R: Into<StringRestriction>>(
        restrictions: impl IntoIterator<Item = R>,
    ) -> SchemaResult<Self> {
        StringSchema::new(restrictions).map(Schema::String)
    }

    pub fn float<R: Into<FloatRestriction>>(
        restrictions: impl IntoIterator<Item = R>,
    ) -> SchemaResult<Self> {
        FloatSchema::new(restrictions).map(Schema::Float)
    }

    pub fn integer<R: Into<IntegerRestriction>>(
        restrictions: impl IntoIterator<Item = R>,
    ) -> SchemaResult<Self> {
        IntegerSchema::new(restrictions).map(Schema::Integer)
    }

    pub fn array(
        description: impl Into<String>,
        item: Schema,
        restrictions: impl IntoIterator<Item = SizeRestriction>,
    ) -> SchemaResult<Self> {
        ArraySchema::new(description, item, restrictions).map(Schema::Array)
    }

    pub fn field_set<K: Into<String>>(
        description: impl Into<String>,
        fields: impl IntoIterator<Item = (K, Field)>,
    ) -> SchemaResult<Self> {
        FieldSetSchema::new(description, fields).map(Schema::FieldSet)
    }

    pub fn named_union<K: Into<String>>(
        members: impl IntoIterator<Item = (K, Schema)>,
    ) -> SchemaResult<Self> {
        UnionSchema::named(members).map(Schema::Union)
    }

    /// `inner` or absent. Null is still rejected.
    pub fn optional(inner: Schema) -> SchemaResult<Self> {
        UnionSchema::optional(inner).map(Schema::Union)
    }

    pub fn is_union(&self) -> bool {
        matches!(self, Schema::Union(_))
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Schema::Union(u) if u.optional_value().is_some())
    }
}

// ----------------------------- Primitives --------------------------------- //

fn non_empty<R>(kind: ShapeKind, restrictions: Vec<R>) -> SchemaResult<Vec<R>> {
    if restrictions.is_empty() {
        return Err(SchemaError::EmptyRestrictions { kind });
    }
    Ok(restrictions)
}

#[derive(Debug, Clone)]
pub struct StringSchema {
    restrictions: Vec<StringRestriction>,
}

impl StringSchema {
    pub fn new<R: Into<StringRestriction>>(
        restrictions: impl IntoIterator<Item = R>,
    ) -> SchemaResult<Self> {
        let restrictions = restrictions.into_iter().map(Into::into).collect();
        Ok(Self {
            restrictions: non_empty(ShapeKind::String, restrictions)?,
        })
    }

    pub fn restrictions(&self) -> &[StringRestriction] {
        &self.restrictions
    }
}

#[derive(Debug, Clone)]
pub struct FloatSchema {
    restrictions: Vec<FloatRestriction>,
}

impl FloatSchema {
    pub fn new<R: Into<FloatRestriction>>(
        restrictions: impl IntoIterator<Item = R>,
    ) -> SchemaResult<Self> {
        let restrictions = restrictions.into_iter().map(Into::into).collect();
        Ok(Self {
            restrictions: non_empty(ShapeKind::Float, restrictions)?,
        })
    }

    pub fn restrictions(&self) -> &[FloatRestriction] {
        &self.restrictions
    }
}

#[derive(Debug, Clone)]
pub struct IntegerSchema {
    restrictions: Vec<IntegerRestriction>,
}

impl IntegerSchema {
    pub fn new<R: Into<IntegerRestriction>>(
        restrictions: impl IntoIterator<Item = R>,
    ) -> SchemaResult<Self> {
        let restrictions = restrictions.into_iter().map(Into::into).collect();
        Ok(Self {
            restrictions: non_empty(ShapeKind::Integer, restrictions)?,
        })
    }

    pub fn restrictions(&self) -> &[IntegerRestriction] {
        &self.restrictions
    }
}

// -------------------------------- Array ----------------------------------- //

#[derive(Debug, Clone)]
pub struct ArraySchema {
    description: String,
    item: Box<Schema>,
    restrictions: Vec<SizeRestriction>,
}

impl ArraySchema {
    pub fn new(
        description: impl Into<String>,
        item: Schema,
        restrictions: impl IntoIterator<Item = SizeRestriction>,
    ) -> SchemaResult<Self> {
        if item.is_union() {
            return Err(SchemaError::NestedUnion { context: "array item schema" });
        }
        let restrictions = non_empty(ShapeKind::Array, restrictions.into_iter().collect())?;
        Ok(Self {
            description: description.into(),
            item: Box::new(item),
            restrictions,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn item(&self) -> &Schema {
        &self.item
    }

    pub fn restrictions(&self) -> &[SizeRestriction] {
        &self.restrictions
    }
}

// ------------------------------- FieldSet --------------------------------- //

#[derive(Debug, Clone)]
pub struct Field {
    description: String,
    schema: Schema,
}

impl Field {
    pub fn new(description: impl Into<String>, schema: Schema) -> Self {
        Self {
            description: description.into(),
            schema,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

/// A record with an exact field set: missing required fields and extra
/// fields are both violations. Declaration order is kept.
#[derive(Debug, Clone)]
pub struct FieldSetSchema {
    description: String,
    fields: IndexMap<String, Field>,
}

impl FieldSetSchema {
    pub fn new<K: Into<String>>(
        description: impl Into<String>,
        fields: impl IntoIterator<Item = (K, Field)>,
    ) -> SchemaResult<Self> {
        let mut map = IndexMap::new();
        for (name, field) in fields {
            match map.entry(name.into()) {
                Entry::Occupied(o) => {
                    return Err(SchemaError::DuplicateField { name: o.key().clone() });
                }
                Entry::Vacant(v) => {
                    v.insert(field);
                }
            }
        }
        Ok(Self {
            description: description.into(),
            fields: map,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn fields(&self) -> &IndexMap<String, Field> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}

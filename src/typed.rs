//! Static type projection.
//!
//! A [`Typed<T>`] is a schema paired with the native type it denotes:
//! `Boolean → bool`, `String → String`, `Float → f64`, `Integer → i64`,
//! `Array(T) → Vec<T>`, `Optional(T) → Option<T>`. The constructors only
//! allow those pairings, so the type of a literal built from a typed schema
//! follows from how the schema was built.
//!
//! Records and unions cannot be checked that way: the struct or enum type
//! is the author's claim. [`Typed::parse`] closes the gap at runtime by
//! validating first and then deserializing, reporting any disagreement
//! between the two as [`ParseError::Drift`].
use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::error::SchemaResult;
use crate::outcome::{Outcome, Violations};
use crate::path_de::from_value_with_path;
use crate::schema::{
    Field, FieldSetSchema, FloatRestriction, IntegerRestriction, Schema, SizeRestriction,
    StringRestriction, UnionSchema,
};
use crate::validate::{primitive::as_integer, validate};

pub struct Typed<T> {
    schema: Schema,
    marker: PhantomData<fn() -> T>,
}

impl<T> Typed<T> {
    fn wrap(schema: Schema) -> Self {
        Self {
            schema,
            marker: PhantomData,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn into_schema(self) -> Schema {
        self.schema
    }

    pub fn validate(&self, input: &Value) -> Outcome {
        validate(&self.schema, input)
    }
}

impl<T> Clone for Typed<T> {
    fn clone(&self) -> Self {
        Self::wrap(self.schema.clone())
    }
}

impl<T> fmt::Debug for Typed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typed")
            .field("type", &std::any::type_name::<T>())
            .field("schema", &self.schema)
            .finish()
    }
}

// ---------------------------- Constructors -------------------------------- //

impl Typed<bool> {
    pub fn boolean() -> Self {
        Self::wrap(Schema::boolean())
    }
}

impl Typed<String> {
    pub fn string<R: Into<StringRestriction>>(
        restrictions: impl IntoIterator<Item = R>,
    ) -> SchemaResult<Self> {
        Schema::string(restrictions).map(Self::wrap)
    }
}

impl Typed<f64> {
    pub fn float<R: Into<FloatRestriction>>(
        restrictions: impl IntoIterator<Item = R>,
    ) -> SchemaResult<Self> {
        Schema::float(restrictions).map(Self::wrap)
    }
}

impl Typed<i64> {
    pub fn integer<R: Into<IntegerRestriction>>(
        restrictions: impl IntoIterator<Item = R>,
    ) -> SchemaResult<Self> {
        Schema::integer(restrictions).map(Self::wrap)
    }
}

impl<T> Typed<Vec<T>> {
    pub fn array(
        description: impl Into<String>,
        item: Typed<T>,
        restrictions: impl IntoIterator<Item = SizeRestriction>,
    ) -> SchemaResult<Self> {
        Schema::array(description, item.schema, restrictions).map(Self::wrap)
    }
}

impl<T> Typed<Option<T>> {
    pub fn optional(inner: Typed<T>) -> SchemaResult<Self> {
        Schema::optional(inner.schema).map(Self::wrap)
    }
}

impl<U> Typed<U> {
    /// `U` is a struct whose fields deserialize from the declared fields.
    /// [`Record`] builds the same thing from typed fields.
    pub fn field_set(schema: FieldSetSchema) -> Self {
        Self::wrap(Schema::FieldSet(schema))
    }

    /// `U` is usually an `#[serde(untagged)]` enum with one variant per member.
    pub fn union(schema: UnionSchema) -> Self {
        Self::wrap(Schema::Union(schema))
    }
}

/// Builds a `Typed<R>` field set one typed field at a time.
pub struct Record<R> {
    description: String,
    fields: Vec<(String, Field)>,
    marker: PhantomData<fn() -> R>,
}

impl<R> Record<R> {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            fields: Vec::new(),
            marker: PhantomData,
        }
    }

    pub fn field<T>(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        value: Typed<T>,
    ) -> Self {
        self.fields.push((name.into(), Field::new(description, value.schema)));
        self
    }

    pub fn build(self) -> SchemaResult<Typed<R>> {
        FieldSetSchema::new(self.description, self.fields).map(Typed::field_set)
    }
}

// -------------------------------- Parse ----------------------------------- //

#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Invalid(#[from] Violations),

    #[error("validated input does not deserialize as `{type_name}` at `{path}`: {message}")]
    Drift {
        type_name: &'static str,
        path: String,
        message: String,
    },
}

impl<T: DeserializeOwned> Typed<T> {
    /// Validate, then deserialize into `T`.
    pub fn parse(&self, input: &Value) -> Result<T, ParseError> {
        self.validate(input).into_result()?;

        let mut settled = input.clone();
        settle_integers(&self.schema, &mut settled);

        from_value_with_path(&settled).map_err(|err| {
            let type_name = std::any::type_name::<T>();
            warn!(type_name, path = %err.path, "schema and native type disagree");
            ParseError::Drift {
                type_name,
                path: err.path,
                message: err.message,
            }
        })
    }
}

/// Rewrites whole floats (`3.0`) sitting under an Integer schema as integer
/// numbers. Validation already accepts them; serde's `i64` does not.
fn settle_integers(schema: &Schema, value: &mut Value) {
    match (schema, value) {
        (Schema::Integer(_), value) => {
            let whole = match value {
                Value::Number(n) if n.is_f64() => as_integer(n),
                _ => None,
            };
            if let Some(i) = whole {
                *value = Value::from(i);
            }
        }
        (Schema::Array(array), Value::Array(items)) => {
            for item in items {
                settle_integers(array.item(), item);
            }
        }
        (Schema::FieldSet(fs), Value::Object(map)) => {
            for (name, field) in fs.fields() {
                if let Some(v) = map.get_mut(name) {
                    settle_integers(field.schema(), v);
                }
            }
        }
        (Schema::Union(union), value) => {
            for member in union.schemas() {
                settle_integers(member, value);
            }
        }
        _ => {}
    }
}

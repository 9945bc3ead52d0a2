//! Configuration errors raised while building (or translating) a schema.
//!
//! These are never mixed into a validation [`Outcome`](crate::outcome::Outcome):
//! an `Err(SchemaError)` means the schema author made a mistake, not that
//! some input was bad.
use thiserror::Error;

use crate::schema::{RestrictionKind, ShapeKind};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("{kind} schema requires at least one restriction")]
    EmptyRestrictions { kind: ShapeKind },

    #[error("set restriction must allow at least one value")]
    EmptySet,

    #[error("{restriction} restriction has inverted bounds [{min}, {max}]")]
    InvertedBounds {
        restriction: RestrictionKind,
        min: String,
        max: String,
    },

    #[error("float range restriction bound must not be NaN")]
    NanBound,

    #[error("unsupported {schema} restriction type: {restriction}")]
    UnsupportedRestriction {
        schema: ShapeKind,
        restriction: RestrictionKind,
    },

    #[error("field set declares field `{name}` more than once")]
    DuplicateField { name: String },

    #[error("union declares member `{name}` more than once")]
    DuplicateMember { name: String },

    #[error("union must declare at least one member schema")]
    EmptyUnion,

    #[error("unnamed union may contain the undefined marker at most once")]
    RepeatedUndefined,

    #[error("{context} must not itself be a union or optional schema")]
    NestedUnion { context: &'static str },

    #[error("`{field}` field must exist in storage schema to translate to a storage definition")]
    MissingInternalId { field: &'static str },

    #[error("`{field}` field schema in storage schema must be a string schema, found {found}")]
    InternalIdNotString {
        field: &'static str,
        found: ShapeKind,
    },
}

pub type SchemaResult<T> = Result<T, SchemaError>;

//! Data-shape schemas and a validator that reports every violation at once.
//!
//! Build a [`Schema`] tree with its checked constructors, then run
//! [`validate`] on untyped JSON. The [`Outcome`] lists each problem found
//! as a kind and a message. Validation never stops at the first one.
//!
//! ```
//! use json_shape::{Field, Schema, validate};
//! use json_shape::schema::SizeRestriction;
//! use serde_json::json;
//!
//! let name = Schema::string([SizeRestriction::new(1, 40).unwrap()]).unwrap();
//! let person = Schema::field_set("person", [("name", Field::new("full name", name))]).unwrap();
//!
//! assert!(validate(&person, &json!({"name": "Ada"})).is_valid());
//! assert_eq!(validate(&person, &json!({})).kinds().len(), 2);
//! ```
pub mod catalog;
pub mod error;
pub mod format;
pub mod outcome;
pub mod path_de;
pub mod schema;
pub mod storage;
pub mod typed;
pub mod validate;

pub use error::{SchemaError, SchemaResult};
pub use outcome::{InvalidKind, InvalidResult, Outcome, Violations};
pub use schema::{Field, Schema, ShapeKind};
pub use typed::{ParseError, Record, Typed};
pub use validate::{validate, validate_batch, validate_field};

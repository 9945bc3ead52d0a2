//! Document-store mapping: turns a record schema into a mongoose-style
//! schema definition (`{ field: { "type": .., "required": .. } }`).
//!
//! Stored records are keyed by an `internalId` string field, so the root
//! field set must declare one.
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::error::{SchemaError, SchemaResult};
use crate::schema::{FieldSetSchema, Schema};

pub const INTERNAL_ID_FIELD: &str = "internalId";

pub fn storage_definition(schema: &FieldSetSchema) -> SchemaResult<Value> {
    let id = schema
        .field(INTERNAL_ID_FIELD)
        .ok_or(SchemaError::MissingInternalId {
            field: INTERNAL_ID_FIELD,
        })?;
    if !matches!(id.schema(), Schema::String(_)) {
        return Err(SchemaError::InternalIdNotString {
            field: INTERNAL_ID_FIELD,
            found: id.schema().kind(),
        });
    }

    let definition = emit_definition(schema);
    debug!(fields = schema.fields().len(), "built storage definition");
    Ok(definition)
}

fn emit_definition(schema: &FieldSetSchema) -> Value {
    let mut fields = Map::new();
    for (name, field) in schema.fields() {
        fields.insert(name.clone(), emit_entry(field.schema()));
    }
    Value::Object(fields)
}

fn emit_entry(schema: &Schema) -> Value {
    match schema {
        Schema::Union(union) => match union.optional_value() {
            Some(inner) => {
                let mut entry = emit_entry(inner);
                entry["required"] = Value::Bool(false);
                entry
            }
            // Unions with several members have no single stored type.
            None => json!({ "type": "Mixed", "required": !union.admits_undefined() }),
        },
        other => json!({ "type": emit_type(other), "required": true }),
    }
}

fn emit_type(schema: &Schema) -> Value {
    match schema {
        Schema::Boolean => json!("Boolean"),
        Schema::String(_) => json!("String"),
        Schema::Float(_) | Schema::Integer(_) => json!("Number"),
        Schema::FieldSet(fs) => emit_definition(fs),
        Schema::Array(array) => json!([emit_entry(array.item())]),
        Schema::Union(_) => json!("Mixed"),
    }
}

//! Validation engine: walks a [`Schema`] against untyped JSON input and
//! collects every violation into one [`Outcome`].
//!
//! Every nested value goes through [`check_value`]:
//! - an optional (a union admitting undefined) accepts absence outright,
//!   rejects null with `NonNull`, and otherwise tries its member schemas;
//! - anything else first gets a required-check (null/absent → `Required`),
//!   and then *also* its shape check, so a missing value reports both
//!   `Required` and `UnexpectedType`;
//! - a union without undefined tries each member in order and accepts the
//!   first clean match. If none match, every member's results are kept.
//!
//! Absence is `None`; JSON `null` is `Some(Value::Null)`.
pub mod complex;
pub mod primitive;
pub mod restriction;

use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, trace};

use crate::outcome::{InvalidKind, Outcome, OutcomeBuilder};
use crate::schema::{Schema, UnionSchema};

/// Validate a present value.
pub fn validate(schema: &Schema, input: &Value) -> Outcome {
    validate_field(schema, Some(input))
}

/// Validate a value that may be absent (`None`), e.g. a field lookup.
pub fn validate_field(schema: &Schema, input: Option<&Value>) -> Outcome {
    let mut out = OutcomeBuilder::new();
    check_value(input, schema, &mut out);
    let outcome = out.build();
    debug!(kind = %schema.kind(), valid = outcome.is_valid(), "validated input");
    outcome
}

/// Validate independent documents in parallel. Outcomes keep input order.
pub fn validate_batch(schema: &Schema, inputs: &[Value]) -> Vec<Outcome> {
    inputs.par_iter().map(|input| validate(schema, input)).collect()
}

// ------------------------------- Dispatch --------------------------------- //

pub fn check_value(input: Option<&Value>, schema: &Schema, out: &mut OutcomeBuilder) {
    match schema {
        Schema::Union(union) if union.admits_undefined() => check_optional(input, union, out),
        _ => {
            check_required(input, out);
            check_shape(input, schema, out);
        }
    }
}

/// Never recurses; the shape check runs afterwards regardless.
pub fn check_required(input: Option<&Value>, out: &mut OutcomeBuilder) {
    match input {
        None => {
            out.add(InvalidKind::Required, "Input is undefined but should be required");
        }
        Some(Value::Null) => {
            out.add(InvalidKind::Required, "Input is null but should be required");
        }
        Some(_) => {}
    }
}

pub fn check_optional(input: Option<&Value>, union: &UnionSchema, out: &mut OutcomeBuilder) {
    match input {
        None => {}
        Some(Value::Null) => {
            out.add(InvalidKind::NonNull, "Input is null but should be non-null");
        }
        Some(_) => check_any_of(input, union, out),
    }
}

fn check_shape(input: Option<&Value>, schema: &Schema, out: &mut OutcomeBuilder) {
    match schema {
        Schema::Boolean => primitive::check_boolean(input, out),
        Schema::String(s) => primitive::check_string(input, s, out),
        Schema::Float(s) => primitive::check_float(input, s, out),
        Schema::Integer(s) => primitive::check_integer(input, s, out),
        Schema::Array(s) => complex::check_array(input, s, out),
        Schema::FieldSet(s) => complex::check_field_set(input, s, out),
        Schema::Union(u) => check_any_of(input, u, out),
    }
}

/// First clean member wins; otherwise all member results, in member order.
pub fn check_any_of(input: Option<&Value>, union: &UnionSchema, out: &mut OutcomeBuilder) {
    let mut failures = OutcomeBuilder::new();
    for (index, member) in union.schemas().enumerate() {
        let mut attempt = OutcomeBuilder::new();
        check_shape(input, member, &mut attempt);
        if attempt.is_empty() {
            trace!(index, kind = %member.kind(), "union member matched");
            return;
        }
        trace!(index, kind = %member.kind(), violations = attempt.len(), "union member rejected");
        failures.append(attempt);
    }
    out.append(failures);
}

/// Renders an input for messages: JSON text, or `undefined` when absent.
pub(crate) fn describe(input: Option<&Value>) -> String {
    match input {
        Some(v) => v.to_string(),
        None => "undefined".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{
        Field, IntegerRange, Member, Predicate, SetRestriction, SizeRestriction, StringRestriction,
    };
    use serde_json::json;

    fn short_string() -> Schema {
        Schema::string([SizeRestriction::new(1, 8).unwrap()]).unwrap()
    }

    fn small_int() -> Schema {
        Schema::integer([IntegerRange::new(0, 9).unwrap()]).unwrap()
    }

    fn text_or_number() -> Schema {
        Schema::named_union([("text", short_string()), ("number", small_int())]).unwrap()
    }

    #[test]
    fn required_rejects_null_and_absent() {
        let outcome = validate_field(&Schema::boolean(), None);
        assert_eq!(outcome.kinds(), [InvalidKind::Required, InvalidKind::UnexpectedType]);
        let outcome = validate(&Schema::boolean(), &json!(null));
        assert_eq!(outcome.kinds(), [InvalidKind::Required, InvalidKind::UnexpectedType]);
        assert!(validate(&Schema::boolean(), &json!(false)).is_valid());
    }

    #[test]
    fn optional_absent_is_valid_null_is_not() {
        let schema = Schema::optional(short_string()).unwrap();
        assert!(validate_field(&schema, None).is_valid());
        assert!(validate(&schema, &json!("abc")).is_valid());

        let outcome = validate(&schema, &json!(null));
        assert_eq!(outcome.kinds(), [InvalidKind::NonNull]);
    }

    #[test]
    fn optional_recurses_into_wrapped_schema() {
        let schema = Schema::optional(short_string()).unwrap();
        assert_eq!(validate(&schema, &json!([])).kinds(), [InvalidKind::UnexpectedType]);
        assert_eq!(validate(&schema, &json!("far too long")).kinds(), [InvalidKind::Size]);
    }

    #[test]
    fn named_union_accepts_any_member() {
        let schema = text_or_number();
        assert!(validate(&schema, &json!("hi")).is_valid());
        assert!(validate(&schema, &json!(7)).is_valid());
    }

    #[test]
    fn named_union_failure_concatenates_member_results() {
        let schema = text_or_number();
        let outcome = validate(&schema, &json!(true));
        assert_eq!(outcome.kinds(), [InvalidKind::UnexpectedType, InvalidKind::UnexpectedType]);
        assert!(outcome.invalid_results()[0].message.contains("string"));
        assert!(outcome.invalid_results()[1].message.contains("integer"));

        let outcome = validate(&schema, &json!(12));
        assert_eq!(outcome.kinds(), [InvalidKind::UnexpectedType, InvalidKind::Range]);
    }

    #[test]
    fn named_union_null_is_required_once_plus_member_results() {
        let schema = text_or_number();
        let outcome = validate(&schema, &json!(null));
        assert_eq!(
            outcome.kinds(),
            [InvalidKind::Required, InvalidKind::UnexpectedType, InvalidKind::UnexpectedType]
        );
    }

    #[test]
    fn unnamed_union_with_undefined_tries_every_member() {
        let union = UnionSchema::unnamed([
            Member::Schema(short_string()),
            Member::Undefined,
            Member::Schema(small_int()),
        ])
        .unwrap();
        let schema = Schema::Union(union);
        assert!(validate_field(&schema, None).is_valid());
        assert!(validate(&schema, &json!(3)).is_valid());
        assert!(validate(&schema, &json!("x")).is_valid());
        assert_eq!(validate(&schema, &json!(null)).kinds(), [InvalidKind::NonNull]);
        assert_eq!(validate(&schema, &json!(false)).kinds().len(), 2);
    }

    #[test]
    fn nested_shapes_flatten_into_one_list() {
        let tag = Schema::string([
            StringRestriction::from(SizeRestriction::new(1, 4).unwrap()),
            StringRestriction::from(SetRestriction::<String>::new(["red", "blue"]).unwrap()),
        ])
        .unwrap();
        let tags = Schema::array("tags", tag, [SizeRestriction::new(0, 2).unwrap()]).unwrap();
        let schema = Schema::field_set(
            "item",
            [
                ("tags", Field::new("labels", tags)),
                ("count", Field::new("how many", Schema::optional(small_int()).unwrap())),
            ],
        )
        .unwrap();

        assert!(validate(&schema, &json!({"tags": ["red"]})).is_valid());
        let outcome = validate(
            &schema,
            &json!({"tags": ["red", "green", "purple"], "count": null}),
        );
        assert_eq!(
            outcome.kinds(),
            [
                InvalidKind::Size,
                InvalidKind::Size,
                InvalidKind::Set,
                InvalidKind::Size,
                InvalidKind::Set,
                InvalidKind::NonNull,
            ]
        );
    }

    #[test]
    fn validation_is_idempotent() {
        let schema = text_or_number();
        let input = json!([1, 2]);
        assert_eq!(validate(&schema, &input), validate(&schema, &input));
    }

    #[test]
    fn batch_keeps_input_order() {
        let schema = small_int();
        let inputs = vec![json!(1), json!("no"), json!(5), json!(42)];
        let valid: Vec<bool> = validate_batch(&schema, &inputs)
            .iter()
            .map(Outcome::is_valid)
            .collect();
        assert_eq!(valid, [true, false, true, false]);
    }

    #[test]
    #[should_panic(expected = "predicate bug")]
    fn predicate_panics_propagate() {
        let explodes = Predicate::<str>::new("explodes", |_| panic!("predicate bug"));
        let schema = Schema::string([explodes]).unwrap();
        let _ = validate(&schema, &json!("boom"));
    }

    #[test]
    fn describe_distinguishes_absent_from_null() {
        assert_eq!(describe(None), "undefined");
        assert_eq!(describe(Some(&json!(null))), "null");
    }
}

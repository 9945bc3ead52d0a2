//! Array and field-set validators. Both recurse through
//! [`check_value`](super::check_value) and flatten every nested violation into
//! the caller's builder.
use serde_json::Value;

use super::restriction as check;
use super::{check_value, describe};
use crate::outcome::{InvalidKind, OutcomeBuilder};
use crate::schema::{ArraySchema, FieldSetSchema};

/// Size violations first, then each element's violations in index order.
pub fn check_array(input: Option<&Value>, schema: &ArraySchema, out: &mut OutcomeBuilder) {
    let Some(Value::Array(items)) = input else {
        out.add(InvalidKind::UnexpectedType, format!("Input is not an array: {}", describe(input)));
        return;
    };

    for restriction in schema.restrictions() {
        if let Err(invalid) = check::array_size(items, restriction) {
            out.push(invalid);
        }
    }

    for item in items {
        check_value(Some(item), schema.item(), out);
    }
}

/// Unexpected fields first (input key order), then each declared field in
/// declaration order. A missing field is validated as absent.
pub fn check_field_set(input: Option<&Value>, schema: &FieldSetSchema, out: &mut OutcomeBuilder) {
    let Some(Value::Object(map)) = input else {
        out.add(
            InvalidKind::UnexpectedType,
            format!("Input is not a field set: {}", describe(input)),
        );
        return;
    };

    for key in map.keys().filter(|k| !schema.has_field(k)) {
        out.add(
            InvalidKind::UnexpectedField,
            format!("Input has field that should not exist: {key}"),
        );
    }

    for (name, field) in schema.fields() {
        check_value(map.get(name), field.schema(), out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Outcome;
    use crate::schema::{Field, FloatRange, IntegerRange, Schema, SizeRestriction};
    use serde_json::json;

    fn run(f: impl FnOnce(&mut OutcomeBuilder)) -> Outcome {
        let mut out = OutcomeBuilder::new();
        f(&mut out);
        out.build()
    }

    fn small_ints() -> ArraySchema {
        let item = Schema::integer([IntegerRange::new(1, 10).unwrap()]).unwrap();
        ArraySchema::new("small ints", item, [SizeRestriction::new(1, 5).unwrap()]).unwrap()
    }

    fn pair() -> FieldSetSchema {
        let ratio = Schema::float([FloatRange::new(1.0, 5.0).unwrap()]).unwrap();
        FieldSetSchema::new(
            "a flag and a ratio",
            [
                ("bool", Field::new("a flag", Schema::boolean())),
                ("float", Field::new("a ratio", ratio)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn array_within_bounds_is_valid() {
        assert!(run(|o| check_array(Some(&json!([1, 2, 3])), &small_ints(), o)).is_valid());
    }

    #[test]
    fn array_not_an_array() {
        let outcome = run(|o| check_array(Some(&json!({"a": 1})), &small_ints(), o));
        assert_eq!(outcome.kinds(), [InvalidKind::UnexpectedType]);
    }

    #[test]
    fn array_size_violations() {
        assert_eq!(
            run(|o| check_array(Some(&json!([])), &small_ints(), o)).kinds(),
            [InvalidKind::Size]
        );
        assert_eq!(
            run(|o| check_array(Some(&json!([1, 2, 3, 4, 5, 6, 7])), &small_ints(), o)).kinds(),
            [InvalidKind::Size]
        );
    }

    #[test]
    fn array_element_type_mismatch_short_circuits_only_that_element() {
        let outcome = run(|o| check_array(Some(&json!([true])), &small_ints(), o));
        assert_eq!(outcome.kinds(), [InvalidKind::UnexpectedType]);
    }

    #[test]
    fn array_results_are_flat_size_first_then_index_order() {
        let outcome = run(|o| check_array(Some(&json!([0, 1, "x", 2, 11, 3])), &small_ints(), o));
        assert_eq!(
            outcome.kinds(),
            [InvalidKind::Size, InvalidKind::Range, InvalidKind::UnexpectedType, InvalidKind::Range]
        );
        assert!(outcome.invalid_results()[1].message.contains("\"0\""));
        assert!(outcome.invalid_results()[3].message.contains("\"11\""));
    }

    #[test]
    fn array_null_element_is_required_and_mistyped() {
        let outcome = run(|o| check_array(Some(&json!([1, null])), &small_ints(), o));
        assert_eq!(outcome.kinds(), [InvalidKind::Required, InvalidKind::UnexpectedType]);
    }

    #[test]
    fn field_set_valid() {
        let input = json!({"bool": true, "float": 1.5});
        assert!(run(|o| check_field_set(Some(&input), &pair(), o)).is_valid());
    }

    #[test]
    fn field_set_rejects_non_records() {
        for input in [json!([]), json!(null), json!("s"), json!(1)] {
            let outcome = run(|o| check_field_set(Some(&input), &pair(), o));
            assert_eq!(outcome.kinds(), [InvalidKind::UnexpectedType], "input: {input}");
        }
    }

    #[test]
    fn field_set_unexpected_field() {
        let input = json!({"bool": true, "float": 2.0, "extra": 1});
        let outcome = run(|o| check_field_set(Some(&input), &pair(), o));
        assert_eq!(outcome.kinds(), [InvalidKind::UnexpectedField]);
        assert!(outcome.invalid_results()[0].message.ends_with("extra"));
    }

    #[test]
    fn field_set_missing_field_reports_required_and_type() {
        let outcome = run(|o| check_field_set(Some(&json!({"bool": true})), &pair(), o));
        assert_eq!(outcome.kinds(), [InvalidKind::Required, InvalidKind::UnexpectedType]);
    }

    // The double diagnostic (required + unexpected type) for a missing field
    // is kept on purpose; callers may rely on both being present.
    #[test]
    fn field_set_empty_record_reports_four_results_in_field_order() {
        let outcome = run(|o| check_field_set(Some(&json!({})), &pair(), o));
        assert_eq!(
            outcome.kinds(),
            [
                InvalidKind::Required,
                InvalidKind::UnexpectedType,
                InvalidKind::Required,
                InvalidKind::UnexpectedType,
            ]
        );
        assert!(outcome.invalid_results()[1].message.contains("boolean"));
        assert!(outcome.invalid_results()[3].message.contains("float"));
    }

    #[test]
    fn field_set_extra_fields_come_before_field_results() {
        let input = json!({"z": 1, "float": 9.0, "a": 2});
        let outcome = run(|o| check_field_set(Some(&input), &pair(), o));
        assert_eq!(
            outcome.kinds(),
            [
                InvalidKind::UnexpectedField,
                InvalidKind::UnexpectedField,
                InvalidKind::Required,
                InvalidKind::UnexpectedType,
                InvalidKind::Range,
            ]
        );
        assert!(outcome.invalid_results()[0].message.ends_with(": z"));
        assert!(outcome.invalid_results()[1].message.ends_with(": a"));
    }
}

//! One pure check per (restriction, primitive) pair that can occur.
//!
//! Each returns `Ok(())` or exactly one [`InvalidResult`] naming the offending
//! value and the restriction's bounds.
use std::borrow::Borrow;
use std::fmt::Display;

use serde_json::Value;

use crate::outcome::{InvalidKind, InvalidResult};
use crate::schema::{
    FloatRange, IntegerRange, Predicate, SetRestriction, ShapeKind, SizeRestriction,
};

pub type RestrictionOutcome = Result<(), InvalidResult>;

// --------------------------------- Set ------------------------------------ //

fn check_set<T, Q>(
    input: &Q,
    restriction: &SetRestriction<T>,
    kind: ShapeKind,
) -> RestrictionOutcome
where
    T: Borrow<Q>,
    Q: PartialEq + Display + ?Sized,
{
    if restriction.contains(input) {
        return Ok(());
    }
    Err(InvalidResult::new(
        InvalidKind::Set,
        format!("Input {kind} value \"{input}\" is not allowed by the set restriction."),
    ))
}

pub fn string_set(input: &str, restriction: &SetRestriction<String>) -> RestrictionOutcome {
    check_set(input, restriction, ShapeKind::String)
}

pub fn integer_set(input: i64, restriction: &SetRestriction<i64>) -> RestrictionOutcome {
    check_set(&input, restriction, ShapeKind::Integer)
}

// --------------------------------- Size ----------------------------------- //

fn check_size(
    value: impl Display,
    size: usize,
    restriction: &SizeRestriction,
    kind: ShapeKind,
) -> RestrictionOutcome {
    if restriction.contains(size) {
        return Ok(());
    }
    Err(InvalidResult::new(
        InvalidKind::Size,
        format!(
            "Input {kind} value \"{value}\" with size of \"{size}\" is not within the bounds \
             [{}, {}] of the size restriction.",
            restriction.min(),
            restriction.max(),
        ),
    ))
}

/// Size is counted in Unicode scalar values.
pub fn string_size(input: &str, restriction: &SizeRestriction) -> RestrictionOutcome {
    check_size(input, input.chars().count(), restriction, ShapeKind::String)
}

pub fn array_size(input: &[Value], restriction: &SizeRestriction) -> RestrictionOutcome {
    if restriction.contains(input.len()) {
        return Ok(());
    }
    let rendered = input
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(",");
    check_size(format_args!("[{rendered}]"), input.len(), restriction, ShapeKind::Array)
}

// -------------------------------- Range ----------------------------------- //

pub fn integer_range(input: i64, restriction: &IntegerRange) -> RestrictionOutcome {
    let (min, max) = (restriction.min(), restriction.max());
    let relation = if input < min {
        "less than the minimum bound"
    } else if input > max {
        "greater than the maximum bound"
    } else {
        return Ok(());
    };
    Err(InvalidResult::new(
        InvalidKind::Range,
        format!(
            "Input {} value \"{input}\" is {relation} [{min}, {max}] of the range restriction.",
            ShapeKind::Integer,
        ),
    ))
}

pub fn float_range(input: f64, restriction: &FloatRange) -> RestrictionOutcome {
    let (min, max) = (restriction.min(), restriction.max());
    let relation = if restriction.is_min_exclusive() && input <= min {
        "not greater than the minimum bound"
    } else if restriction.is_max_exclusive() && input >= max {
        "not less than the maximum bound"
    } else if input < min {
        "less than the minimum bound"
    } else if input > max {
        "greater than the maximum bound"
    } else {
        return Ok(());
    };
    Err(InvalidResult::new(
        InvalidKind::Range,
        format!(
            "Input {} value \"{input}\" is {relation} {} of the range restriction.",
            ShapeKind::Float,
            restriction.notation(),
        ),
    ))
}

// ------------------------------ Predicate --------------------------------- //

pub fn predicate<T>(input: &T, restriction: &Predicate<T>, kind: ShapeKind) -> RestrictionOutcome
where
    T: Display + ?Sized,
{
    if restriction.test(input) {
        return Ok(());
    }
    Err(InvalidResult::new(
        InvalidKind::Predicate,
        format!(
            "Input {kind} value \"{input}\" does not satisfy the predicate restriction: {}.",
            restriction.description(),
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_set_membership() {
        let set = SetRestriction::<String>::new(["foo", "bar"]).unwrap();
        assert_eq!(string_set("foo", &set), Ok(()));
        let err = string_set("baz", &set).unwrap_err();
        assert_eq!(err.kind, InvalidKind::Set);
        assert!(err.message.contains("\"baz\""));
    }

    #[test]
    fn integer_set_membership() {
        let set = SetRestriction::<i64>::new([1, 2, 3]).unwrap();
        assert!(integer_set(2, &set).is_ok());
        assert_eq!(integer_set(4, &set).unwrap_err().kind, InvalidKind::Set);
    }

    #[test]
    fn size_bounds_are_inclusive() {
        let size = SizeRestriction::new(1, 3).unwrap();
        assert!(string_size("a", &size).is_ok());
        assert!(string_size("abc", &size).is_ok());
        assert!(string_size("", &size).is_err());
        let err = string_size("abcd", &size).unwrap_err();
        assert_eq!(err.kind, InvalidKind::Size);
        assert!(err.message.contains("[1, 3]"));
        assert!(err.message.contains("\"4\""));
        assert!(err.message.contains("\"abcd\""));
    }

    #[test]
    fn string_size_counts_characters_not_bytes() {
        let size = SizeRestriction::new(0, 3).unwrap();
        assert!(string_size("αβγ", &size).is_ok());
    }

    #[test]
    fn array_size_counts_elements() {
        let size = SizeRestriction::new(1, 2).unwrap();
        let xs = json!([1, 2, 3]);
        let xs = xs.as_array().unwrap();
        assert!(array_size(&xs[..2], &size).is_ok());
        assert!(array_size(&xs[..0], &size).is_err());
        let err = array_size(xs, &size).unwrap_err();
        assert_eq!(err.kind, InvalidKind::Size);
        assert!(err.message.contains("\"[1,2,3]\""));
        assert!(err.message.contains("\"3\""));
    }

    #[test]
    fn integer_range_is_inclusive_on_both_ends() {
        let range = IntegerRange::new(1, 10).unwrap();
        assert!(integer_range(1, &range).is_ok());
        assert!(integer_range(10, &range).is_ok());
        let low = integer_range(0, &range).unwrap_err();
        assert!(low.message.contains("less than the minimum bound [1, 10]"));
        let high = integer_range(11, &range).unwrap_err();
        assert!(high.message.contains("greater than the maximum bound [1, 10]"));
    }

    #[test]
    fn float_range_honours_exclusive_sides() {
        let range = FloatRange::new(1.0, 2.0).unwrap().exclusive_min().exclusive_max();
        assert!(float_range(1.23, &range).is_ok());
        let at_max = float_range(2.0, &range).unwrap_err();
        assert_eq!(at_max.kind, InvalidKind::Range);
        assert!(at_max.message.contains("not less than the maximum bound (1, 2)"));
        assert!(float_range(1.0, &range).is_err());

        let inclusive = FloatRange::new(1.0, 2.0).unwrap();
        assert!(float_range(1.0, &inclusive).is_ok());
        assert!(float_range(2.0, &inclusive).is_ok());
        assert!(float_range(2.5, &inclusive).unwrap_err().message.contains("[1, 2]"));
    }

    #[test]
    fn predicate_failure_carries_description() {
        let even = Predicate::<i64>::new("must be even", |n| n % 2 == 0);
        assert!(predicate(&4, &even, ShapeKind::Integer).is_ok());
        let err = predicate(&3, &even, ShapeKind::Integer).unwrap_err();
        assert_eq!(err.kind, InvalidKind::Predicate);
        assert!(err.message.contains("must be even"));
    }
}

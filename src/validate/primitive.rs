//! Boolean/String/Float/Integer validators: a type-tag check, then every
//! restriction in declaration order.
//!
//! A type mismatch yields a single `UnexpectedType` result and the
//! restrictions are skipped. Otherwise restriction failures accumulate; one
//! failing restriction never hides the next.
use serde_json::{Number, Value};

use super::describe;
use super::restriction as check;
use crate::outcome::{InvalidKind, OutcomeBuilder};
use crate::schema::{
    FloatRestriction, FloatSchema, IntegerRestriction, IntegerSchema, ShapeKind, StringRestriction,
    StringSchema,
};

pub fn check_boolean(input: Option<&Value>, out: &mut OutcomeBuilder) {
    if !matches!(input, Some(Value::Bool(_))) {
        out.add(
            InvalidKind::UnexpectedType,
            format!("Input is not a boolean: {}", describe(input)),
        );
    }
}

pub fn check_string(input: Option<&Value>, schema: &StringSchema, out: &mut OutcomeBuilder) {
    let Some(Value::String(s)) = input else {
        out.add(InvalidKind::UnexpectedType, format!("Input is not a string: {}", describe(input)));
        return;
    };

    for restriction in schema.restrictions() {
        let result = match restriction {
            StringRestriction::Size(r) => check::string_size(s, r),
            StringRestriction::Set(r) => check::string_set(s, r),
            StringRestriction::Predicate(r) => check::predicate(s.as_str(), r, ShapeKind::String),
        };
        if let Err(invalid) = result {
            out.push(invalid);
        }
    }
}

pub fn check_float(input: Option<&Value>, schema: &FloatSchema, out: &mut OutcomeBuilder) {
    let Some(x) = input.and_then(Value::as_f64) else {
        out.add(InvalidKind::UnexpectedType, format!("Input is not a float: {}", describe(input)));
        return;
    };

    for restriction in schema.restrictions() {
        let result = match restriction {
            FloatRestriction::Range(r) => check::float_range(x, r),
            FloatRestriction::Predicate(r) => check::predicate(&x, r, ShapeKind::Float),
        };
        if let Err(invalid) = result {
            out.push(invalid);
        }
    }
}

pub fn check_integer(input: Option<&Value>, schema: &IntegerSchema, out: &mut OutcomeBuilder) {
    let Some(n) = input.and_then(|v| match v {
        Value::Number(n) => as_integer(n),
        _ => None,
    }) else {
        out.add(
            InvalidKind::UnexpectedType,
            format!("Input is not an integer: {}", describe(input)),
        );
        return;
    };

    for restriction in schema.restrictions() {
        let result = match restriction {
            IntegerRestriction::Range(r) => check::integer_range(n, r),
            IntegerRestriction::Set(r) => check::integer_set(n, r),
            IntegerRestriction::Predicate(r) => check::predicate(&n, r, ShapeKind::Integer),
        };
        if let Err(invalid) = result {
            out.push(invalid);
        }
    }
}

/// A number with no fractional part that fits in `i64`. `3.0` counts.
pub fn as_integer(n: &Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    // i64::MAX as f64 rounds up to 2^63, which is out of range
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

//! Value-independent constraints attached to primitive and array schemas.
//!
//! Each primitive only accepts the restriction kinds that make sense for it,
//! so a range under a string schema cannot be expressed with the typed enums.
//! The untyped [`Restriction`] exists for callers that assemble schemas
//! generically; converting it is where a bad pairing gets rejected.
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use ordered_float::NotNan;

use super::ShapeKind;
use crate::error::{SchemaError, SchemaResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestrictionKind {
    Range,
    Size,
    Set,
    Predicate,
}

impl fmt::Display for RestrictionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RestrictionKind::Range => "range",
            RestrictionKind::Size => "size",
            RestrictionKind::Set => "set",
            RestrictionKind::Predicate => "predicate",
        })
    }
}

// -------------------------------- Size ------------------------------------ //

/// Length/count bounds. Always inclusive on both ends; there is no exclusive
/// size bound, so `[0, 4]` is how "fewer than five" is spelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeRestriction {
    description: String,
    min: usize,
    max: usize,
}

impl SizeRestriction {
    pub fn new(min: usize, max: usize) -> SchemaResult<Self> {
        if min > max {
            return Err(SchemaError::InvertedBounds {
                restriction: RestrictionKind::Size,
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(Self {
            description: String::new(),
            min,
            max,
        })
    }

    /// Exactly `n` elements/characters.
    pub fn exactly(n: usize) -> Self {
        Self {
            description: String::new(),
            min: n,
            max: n,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn contains(&self, size: usize) -> bool {
        self.min <= size && size <= self.max
    }
}

// -------------------------------- Range ----------------------------------- //

/// Integer bounds, inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerRange {
    description: String,
    min: i64,
    max: i64,
}

impl IntegerRange {
    pub fn new(min: i64, max: i64) -> SchemaResult<Self> {
        if min > max {
            return Err(SchemaError::InvertedBounds {
                restriction: RestrictionKind::Range,
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(Self {
            description: String::new(),
            min,
            max,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Float bounds. Inclusive unless a side is marked exclusive: floats are
/// continuous, so "up to but not including 60.0" has no inclusive spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatRange {
    description: String,
    min: NotNan<f64>,
    max: NotNan<f64>,
    min_exclusive: bool,
    max_exclusive: bool,
}

impl FloatRange {
    pub fn new(min: f64, max: f64) -> SchemaResult<Self> {
        let min = NotNan::new(min).map_err(|_| SchemaError::NanBound)?;
        let max = NotNan::new(max).map_err(|_| SchemaError::NanBound)?;
        if min > max {
            return Err(SchemaError::InvertedBounds {
                restriction: RestrictionKind::Range,
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(Self {
            description: String::new(),
            min,
            max,
            min_exclusive: false,
            max_exclusive: false,
        })
    }

    pub fn exclusive_min(mut self) -> Self {
        self.min_exclusive = true;
        self
    }

    pub fn exclusive_max(mut self) -> Self {
        self.max_exclusive = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn min(&self) -> f64 {
        self.min.into_inner()
    }

    pub fn max(&self) -> f64 {
        self.max.into_inner()
    }

    pub fn is_min_exclusive(&self) -> bool {
        self.min_exclusive
    }

    pub fn is_max_exclusive(&self) -> bool {
        self.max_exclusive
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Interval notation, e.g. `(1, 2]`.
    pub fn notation(&self) -> String {
        format!(
            "{}{}, {}{}",
            if self.min_exclusive { '(' } else { '[' },
            self.min,
            self.max,
            if self.max_exclusive { ')' } else { ']' },
        )
    }
}

// --------------------------------- Set ------------------------------------ //

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedValue<T> {
    description: String,
    value: T,
}

impl<T> AllowedValue<T> {
    pub fn new(description: impl Into<String>, value: T) -> Self {
        Self {
            description: description.into(),
            value,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetRestriction<T> {
    allowed: Vec<AllowedValue<T>>,
}

impl<T> SetRestriction<T> {
    pub fn new<I, V>(values: I) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<T>,
    {
        Self::documented(values.into_iter().map(|v| AllowedValue::new("", v.into())))
    }

    pub fn documented(
        allowed: impl IntoIterator<Item = AllowedValue<T>>,
    ) -> SchemaResult<Self> {
        let allowed: Vec<_> = allowed.into_iter().collect();
        if allowed.is_empty() {
            return Err(SchemaError::EmptySet);
        }
        Ok(Self { allowed })
    }

    pub fn allowed(&self) -> &[AllowedValue<T>] {
        &self.allowed
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.allowed.iter().any(|a| a.value.borrow() == value)
    }
}

// ------------------------------ Predicate --------------------------------- //

/// A caller-supplied check. The function must be pure and total over the
/// primitive's domain; a panic inside it propagates out of `validate`.
pub struct Predicate<T: ?Sized> {
    description: String,
    check: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T: ?Sized> Predicate<T> {
    pub fn new(
        description: impl Into<String>,
        check: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            description: description.into(),
            check: Arc::new(check),
        }
    }

    pub fn test(&self, value: &T) -> bool {
        (self.check)(value)
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl<T: ?Sized> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self {
            description: self.description.clone(),
            check: Arc::clone(&self.check),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

// ---------------------------- Per-primitive ------------------------------- //

#[derive(Debug, Clone)]
pub enum StringRestriction {
    Size(SizeRestriction),
    Set(SetRestriction<String>),
    Predicate(Predicate<str>),
}

#[derive(Debug, Clone)]
pub enum FloatRestriction {
    Range(FloatRange),
    Predicate(Predicate<f64>),
}

#[derive(Debug, Clone)]
pub enum IntegerRestriction {
    Range(IntegerRange),
    Set(SetRestriction<i64>),
    Predicate(Predicate<i64>),
}

impl StringRestriction {
    pub fn kind(&self) -> RestrictionKind {
        match self {
            StringRestriction::Size(_) => RestrictionKind::Size,
            StringRestriction::Set(_) => RestrictionKind::Set,
            StringRestriction::Predicate(_) => RestrictionKind::Predicate,
        }
    }
}

impl FloatRestriction {
    pub fn kind(&self) -> RestrictionKind {
        match self {
            FloatRestriction::Range(_) => RestrictionKind::Range,
            FloatRestriction::Predicate(_) => RestrictionKind::Predicate,
        }
    }
}

impl IntegerRestriction {
    pub fn kind(&self) -> RestrictionKind {
        match self {
            IntegerRestriction::Range(_) => RestrictionKind::Range,
            IntegerRestriction::Set(_) => RestrictionKind::Set,
            IntegerRestriction::Predicate(_) => RestrictionKind::Predicate,
        }
    }
}

impl From<SizeRestriction> for StringRestriction {
    fn from(r: SizeRestriction) -> Self {
        StringRestriction::Size(r)
    }
}

impl From<SetRestriction<String>> for StringRestriction {
    fn from(r: SetRestriction<String>) -> Self {
        StringRestriction::Set(r)
    }
}

impl From<Predicate<str>> for StringRestriction {
    fn from(r: Predicate<str>) -> Self {
        StringRestriction::Predicate(r)
    }
}

impl From<FloatRange> for FloatRestriction {
    fn from(r: FloatRange) -> Self {
        FloatRestriction::Range(r)
    }
}

impl From<Predicate<f64>> for FloatRestriction {
    fn from(r: Predicate<f64>) -> Self {
        FloatRestriction::Predicate(r)
    }
}

impl From<IntegerRange> for IntegerRestriction {
    fn from(r: IntegerRange) -> Self {
        IntegerRestriction::Range(r)
    }
}

impl From<SetRestriction<i64>> for IntegerRestriction {
    fn from(r: SetRestriction<i64>) -> Self {
        IntegerRestriction::Set(r)
    }
}

impl From<Predicate<i64>> for IntegerRestriction {
    fn from(r: Predicate<i64>) -> Self {
        IntegerRestriction::Predicate(r)
    }
}

// ------------------------------- Untyped ---------------------------------- //

/// Any restriction, not yet bound to a schema kind.
#[derive(Debug, Clone)]
pub enum Restriction {
    Size(SizeRestriction),
    IntegerRange(IntegerRange),
    FloatRange(FloatRange),
    StringSet(SetRestriction<String>),
    IntegerSet(SetRestriction<i64>),
    StringPredicate(Predicate<str>),
    FloatPredicate(Predicate<f64>),
    IntegerPredicate(Predicate<i64>),
}

impl Restriction {
    pub fn kind(&self) -> RestrictionKind {
        match self {
            Restriction::Size(_) => RestrictionKind::Size,
            Restriction::IntegerRange(_) | Restriction::FloatRange(_) => RestrictionKind::Range,
            Restriction::StringSet(_) | Restriction::IntegerSet(_) => RestrictionKind::Set,
            Restriction::StringPredicate(_)
            | Restriction::FloatPredicate(_)
            | Restriction::IntegerPredicate(_) => RestrictionKind::Predicate,
        }
    }

    fn unsupported(self, schema: ShapeKind) -> SchemaError {
        SchemaError::UnsupportedRestriction {
            schema,
            restriction: self.kind(),
        }
    }
}

impl TryFrom<Restriction> for StringRestriction {
    type Error = SchemaError;

    fn try_from(r: Restriction) -> SchemaResult<Self> {
        match r {
            Restriction::Size(x) => Ok(StringRestriction::Size(x)),
            Restriction::StringSet(x) => Ok(StringRestriction::Set(x)),
            Restriction::StringPredicate(x) => Ok(StringRestriction::Predicate(x)),
            other => Err(other.unsupported(ShapeKind::String)),
        }
    }
}

impl TryFrom<Restriction> for FloatRestriction {
    type Error = SchemaError;

    fn try_from(r: Restriction) -> SchemaResult<Self> {
        match r {
            Restriction::FloatRange(x) => Ok(FloatRestriction::Range(x)),
            Restriction::FloatPredicate(x) => Ok(FloatRestriction::Predicate(x)),
            other => Err(other.unsupported(ShapeKind::Float)),
        }
    }
}

impl TryFrom<Restriction> for IntegerRestriction {
    type Error = SchemaError;

    fn try_from(r: Restriction) -> SchemaResult<Self> {
        match r {
            Restriction::IntegerRange(x) => Ok(IntegerRestriction::Range(x)),
            Restriction::IntegerSet(x) => Ok(IntegerRestriction::Set(x)),
            Restriction::IntegerPredicate(x) => Ok(IntegerRestriction::Predicate(x)),
            other => Err(other.unsupported(ShapeKind::Integer)),
        }
    }
}

impl TryFrom<Restriction> for SizeRestriction {
    type Error = SchemaError;

    fn try_from(r: Restriction) -> SchemaResult<Self> {
        match r {
            Restriction::Size(x) => Ok(x),
            other => Err(other.unsupported(ShapeKind::Array)),
        }
    }
}

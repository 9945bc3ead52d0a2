//! Validation outcome: valid, or an ordered, non-empty list of typed
//! invalid results.
//!
//! Validators append into an [`OutcomeBuilder`] threaded through the
//! recursion; the builder is consumed once by [`OutcomeBuilder::build`] and the
//! resulting [`Outcome`] is read-only.
use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InvalidKind {
    #[serde(rename = "unexpected-type")]
    UnexpectedType,
    #[serde(rename = "unexpected-field")]
    UnexpectedField,
    #[serde(rename = "required-violation")]
    Required,
    #[serde(rename = "non-null-violation")]
    NonNull,
    #[serde(rename = "range-violation")]
    Range,
    #[serde(rename = "size-violation")]
    Size,
    #[serde(rename = "set-violation")]
    Set,
    #[serde(rename = "predicate-violation")]
    Predicate,
}

impl fmt::Display for InvalidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InvalidKind::UnexpectedType => "unexpected-type",
            InvalidKind::UnexpectedField => "unexpected-field",
            InvalidKind::Required => "required-violation",
            InvalidKind::NonNull => "non-null-violation",
            InvalidKind::Range => "range-violation",
            InvalidKind::Size => "size-violation",
            InvalidKind::Set => "set-violation",
            InvalidKind::Predicate => "predicate-violation",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidResult {
    pub kind: InvalidKind,
    pub message: String,
}

impl InvalidResult {
    pub fn new(kind: InvalidKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for InvalidResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

// ------------------------------- Outcome ---------------------------------- //

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    invalid_results: Vec<InvalidResult>,
}

impl Outcome {
    pub fn valid() -> Self {
        Self { invalid_results: Vec::new() }
    }

    pub fn is_valid(&self) -> bool {
        self.invalid_results.is_empty()
    }

    /// Every violation found, in discovery order.
    ///
    /// # Panics
    ///
    /// On a valid outcome. Check [`Outcome::is_valid`] first.
    pub fn invalid_results(&self) -> &[InvalidResult] {
        assert!(!self.is_valid(), "cannot get invalid results for a valid Outcome");
        &self.invalid_results
    }

    pub fn kinds(&self) -> Vec<InvalidKind> {
        self.invalid_results.iter().map(|r| r.kind).collect()
    }

    pub fn into_result(self) -> Result<(), Violations> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Violations { results: self.invalid_results })
        }
    }
}

/// The invalid side of an outcome, as an error value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} validation violation(s):\n{}", .results.len(), render(.results))]
pub struct Violations {
    results: Vec<InvalidResult>,
}

impl Violations {
    pub fn results(&self) -> &[InvalidResult] {
        &self.results
    }

    pub fn into_inner(self) -> Vec<InvalidResult> {
        self.results
    }
}

fn render(results: &[InvalidResult]) -> String {
    results.iter().map(|r| format!("  {r}")).collect::<Vec<_>>().join("\n")
}

// ------------------------------- Builder ---------------------------------- //

#[derive(Debug, Default)]
pub struct OutcomeBuilder {
    invalid_results: Vec<InvalidResult>,
}

impl OutcomeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: InvalidKind, message: impl Into<String>) -> &mut Self {
        self.invalid_results.push(InvalidResult::new(kind, message));
        self
    }

    pub fn push(&mut self, result: InvalidResult) -> &mut Self {
        self.invalid_results.push(result);
        self
    }

    pub fn append(&mut self, other: OutcomeBuilder) -> &mut Self {
        self.invalid_results.extend(other.invalid_results);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.invalid_results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.invalid_results.len()
    }

    pub fn build(self) -> Outcome {
        Outcome {
            invalid_results: self.invalid_results,
        }
    }
}

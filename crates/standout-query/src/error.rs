//! Error types for the query crate.
//!
//! Evaluation failures are ordinary values: every evaluation step returns a
//! [`Disposition`], and a [`MatchError`] short-circuits exactly like a plain
//! non-match. [`Error`] is what the public entry points surface.

use thiserror::Error;

use crate::op::Operator;

/// Outcome of a single evaluation step.
///
/// `Ok(true)` matched, `Ok(false)` did not match, `Err(_)` the criteria were
/// structurally wrong for the operator that received them.
pub type Disposition = std::result::Result<bool, MatchError>;

/// Structural problems detected while evaluating criteria.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// An operator received an operand of the wrong shape.
    #[error("criteria type mismatch: '{op}' expects {expected}, got {actual}")]
    CriteriaTypeMismatch {
        op: Operator,
        expected: &'static str,
        actual: &'static str,
    },

    /// `$or` was given an empty list of alternatives.
    #[error("$or requires nonempty array")]
    EmptyOr,
}

impl MatchError {
    pub(crate) fn mismatch(op: Operator, expected: &'static str, actual: &'static str) -> Self {
        MatchError::CriteriaTypeMismatch {
            op,
            expected,
            actual,
        }
    }
}

/// Errors returned by scanners and criteria constructors.
#[derive(Debug, Error)]
pub enum Error {
    /// A record failed to evaluate; the scan stopped at `index`.
    #[error("scan failed at record {index}: {source}")]
    Scan {
        index: usize,
        #[source]
        source: MatchError,
    },

    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Malformed JSON criteria text, or a record that could not be serialized.
    #[error("invalid json: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// JSON criteria whose root is not an object.
    #[error("criteria must be a JSON object, got {actual}")]
    NotAnObject { actual: &'static str },
}

impl Error {
    /// Returns the evaluation error behind a failed scan, if any.
    pub fn match_error(&self) -> Option<&MatchError> {
        match self {
            Error::Scan { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, Error>;

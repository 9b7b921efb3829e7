//! Drill error types.
//!
//! Every variant is a caller-precondition violation. The core rejects the call
//! instead of truncating, padding, or clamping its inputs.

use thiserror::Error;

use crate::model::Operator;

/// Errors returned by the generation and grading contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrillError {
    /// Digit bounds are reversed or outside the supported range.
    #[error("invalid digit range {min}..={max}: expected 1 <= min <= max <= 9")]
    InvalidRange { min: u32, max: u32 },

    /// The number of submitted answers differs from the number of problems.
    #[error("expected {expected} answers, got {actual}")]
    AnswerCountMismatch { expected: usize, actual: usize },

    /// A deserialized problem whose answer does not match its operands.
    #[error("inconsistent problem: {0}")]
    InconsistentProblem(String),

    /// Two draws whose result does not fit in an `i64`.
    #[error("{first} and {second} overflow under {operator}")]
    Overflow {
        operator: Operator,
        first: i64,
        second: i64,
    },

    /// An operator name or symbol could not be parsed.
    #[error("unknown operator: {0}")]
    UnknownOperator(String),
}

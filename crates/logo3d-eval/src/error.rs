//! Runtime error types for the logo3d evaluator.

use thiserror::Error;

/// A failure that aborts evaluation of the current submission.
///
/// Port calls already issued and variables already written stay in effect.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// `:name` with no prior `make` or loop binding.
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),
    /// A value of the wrong kind reached an operator or command.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    /// An operator reached an evaluation path that cannot apply it.
    #[error("unknown operator: '{0}'")]
    UnknownOperator(String),
    /// A `for` loop ran past the configured iteration budget.
    #[error("loop over '{var}' exceeded {limit} iterations")]
    LoopLimitExceeded { var: String, limit: u64 },
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;

//! Expression error types

use thiserror::Error;

/// Why a stack did not reduce to a value.
///
/// None of these are fatal: the engine stays usable after any of them and the
/// caller decides how to render the missing result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("No expression")]
    EmptyStack,

    /// An operator ran out of operands beneath it.
    #[error("Incomplete expression: an operator is missing operands")]
    IncompleteExpression,

    #[error("Variable '{name}' has no value")]
    UnboundVariable { name: String },

    #[error("Division by zero")]
    DivisionByZero,
}

impl EvalError {
    pub fn unbound(name: impl Into<String>) -> Self {
        EvalError::UnboundVariable { name: name.into() }
    }
}

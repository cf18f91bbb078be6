//! Expression buffer and evaluation pipeline
//!
//! Everything the calculator needs to turn a free-form expression string into
//! a displayable result: tokenizer and parser, evaluator, result formatting,
//! the bounded history log and the [`ExpressionEngine`] that ties them
//! together.

pub mod engine;
pub mod evaluator;
pub mod format;
pub mod history;
mod operations;
pub mod parser;

pub use engine::{Display, ExpressionEngine};
pub use operations::{Function, Operation};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Evaluation failures.
///
/// Every variant surfaces to the user identically, as the literal display
/// text [`CalcError::DISPLAY_TEXT`]. The variants exist for logs and tests.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Nothing to evaluate
    #[error("Empty expression")]
    EmptyExpression,
    /// Invalid expression syntax
    #[error("Invalid expression: {0}")]
    Parse(String),
    /// Identifier that is not one of the supported functions
    #[error("Unknown function: '{0}'")]
    UnknownFunction(String),
    /// Result (or an intermediate value) was NaN or infinite
    #[error("Non-finite result: {0}")]
    NonFinite(f64),
}

impl CalcError {
    /// Text shown on the primary display after any evaluation failure
    pub const DISPLAY_TEXT: &'static str = "Error";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_error_display_empty_expression() {
        assert_eq!(CalcError::EmptyExpression.to_string(), "Empty expression");
    }

    #[test]
    fn test_calc_error_display_parse() {
        let err = CalcError::Parse("unexpected token".into());
        assert_eq!(err.to_string(), "Invalid expression: unexpected token");
    }

    #[test]
    fn test_calc_error_display_unknown_function() {
        let err = CalcError::UnknownFunction("sqrt".into());
        assert_eq!(err.to_string(), "Unknown function: 'sqrt'");
    }

    #[test]
    fn test_calc_error_display_non_finite() {
        let err = CalcError::NonFinite(f64::INFINITY);
        assert_eq!(err.to_string(), "Non-finite result: inf");
    }

    #[test]
    fn test_calc_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CalcError::EmptyExpression);
        assert!(err.to_string().contains("Empty"));
    }
}

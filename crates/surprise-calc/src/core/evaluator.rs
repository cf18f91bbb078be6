//! AST evaluator
//!
//! Every intermediate value is checked for finiteness, so `1/0`, `log(0)` and
//! `0/0` all fail with [`CalcError::NonFinite`] instead of leaking an
//! infinity into the display.

use crate::core::parser::{AstNode, Parser};
use crate::core::{CalcError, CalcResult};

/// Stateless evaluator for parsed expressions
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    /// Creates a new evaluator
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Evaluates an AST node and returns the result
    pub fn evaluate(&self, node: &AstNode) -> CalcResult<f64> {
        let value = match node {
            AstNode::Number(n) => *n,
            AstNode::Negate(inner) => -self.evaluate(inner)?,
            AstNode::BinaryOp { left, op, right } => {
                let left_val = self.evaluate(left)?;
                let right_val = self.evaluate(right)?;
                op.apply(left_val, right_val)
            }
            AstNode::Call { function, argument } => function.apply(self.evaluate(argument)?),
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(CalcError::NonFinite(value))
        }
    }

    /// Parses and evaluates a string expression
    pub fn evaluate_str(&self, input: &str) -> CalcResult<f64> {
        let ast = Parser::parse_str(input)?;
        self.evaluate(&ast)
    }
}

//! Expression evaluation

use super::parser::ExpressionParser;
use super::tree::BoolExpr;
use crate::error::{Result, RuntimeError};
use std::collections::HashMap;

/// Evaluates boolean expressions against variable bindings
pub struct ExpressionEvaluator;

impl ExpressionEvaluator {
    /// Evaluate a tree. `&&` and `||` short-circuit.
    pub fn evaluate(expr: &BoolExpr, bindings: &HashMap<String, bool>) -> Result<bool> {
        match expr {
            BoolExpr::Variable(name) => bindings
                .get(name)
                .copied()
                .ok_or_else(|| RuntimeError::UnboundVariable(name.clone())),
            BoolExpr::Not(operand) => Ok(!Self::evaluate(operand, bindings)?),
            BoolExpr::And(operands) => {
                for operand in operands {
                    if !Self::evaluate(operand, bindings)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            BoolExpr::Or(operands) => {
                for operand in operands {
                    if Self::evaluate(operand, bindings)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    /// Parse and evaluate expression text
    pub fn evaluate_str(expression: &str, bindings: &HashMap<String, bool>) -> Result<bool> {
        let expr = ExpressionParser::parse_str(expression)?;
        Self::evaluate(&expr, bindings)
    }
}

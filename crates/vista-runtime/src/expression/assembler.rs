//! Expression assembly from condition descriptors

use super::evaluator::ExpressionEvaluator;
use super::parser::ExpressionParser;
use super::token::{join, Token};
use super::tree::BoolExpr;
use crate::error::Result;
use std::collections::HashMap;
use vista_core::{ConditionDescriptor, LogicalOperator};

/// Collects tokens and variable bindings, one term per descriptor
#[derive(Debug, Default)]
pub struct ExpressionAssembler {
    tokens: Vec<Token>,
    bindings: HashMap<String, bool>,
    /// Binding order, for traces
    variables: Vec<String>,
    /// Next suffix per condition type
    counters: HashMap<String, usize>,
}

impl ExpressionAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokens an operator normalizes to.
    ///
    /// `and` → `&&`, `or` → `||`, `and_not` → `&& not`; raw literals are
    /// lexed as written.
    pub fn operator_tokens(operator: &LogicalOperator) -> Vec<Token> {
        match operator {
            LogicalOperator::And => vec![Token::And],
            LogicalOperator::Or => vec![Token::Or],
            LogicalOperator::AndNot => vec![Token::And, Token::Not],
            LogicalOperator::Raw(raw) => Token::lex(raw),
        }
    }

    /// Append the term for one descriptor whose condition evaluated to
    /// `value`. Returns the variable name bound to the value.
    pub fn push_term(&mut self, descriptor: &ConditionDescriptor, value: bool) -> String {
        if !self.variables.is_empty() {
            let operator = descriptor.effective_operator();
            self.tokens.extend(Self::operator_tokens(&operator));
        }

        if descriptor.bracket_left {
            self.tokens.push(Token::LeftParen);
        }

        let name = self.next_variable(&descriptor.condition_type);
        self.bindings.insert(name.clone(), value);
        self.variables.push(name.clone());
        self.tokens.push(Token::Variable(name.clone()));

        if descriptor.bracket_right {
            self.tokens.push(Token::RightParen);
        }

        name
    }

    /// `type_1`, `type_2`, ... counted per condition type
    fn next_variable(&mut self, condition_type: &str) -> String {
        let counter = self.counters.entry(condition_type.to_string()).or_insert(0);
        *counter += 1;
        format!("{}_{}", condition_type, counter)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn bindings(&self) -> &HashMap<String, bool> {
        &self.bindings
    }

    /// Tokens joined with single spaces
    pub fn expression_string(&self) -> String {
        join(&self.tokens)
    }

    /// Parse the collected tokens
    pub fn finish(self) -> Result<AssembledExpression> {
        let tree = ExpressionParser::parse(&self.tokens)?;
        Ok(AssembledExpression {
            source: join(&self.tokens),
            tree,
            bindings: self.bindings,
            variables: self.variables,
        })
    }
}

/// Parsed expression together with its bindings
#[derive(Debug, Clone)]
pub struct AssembledExpression {
    source: String,
    tree: BoolExpr,
    bindings: HashMap<String, bool>,
    variables: Vec<String>,
}

impl AssembledExpression {
    /// Expression text the tree was parsed from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tree(&self) -> &BoolExpr {
        &self.tree
    }

    pub fn bindings(&self) -> &HashMap<String, bool> {
        &self.bindings
    }

    /// Bindings in term order
    pub fn ordered_bindings(&self) -> Vec<(String, bool)> {
        self.variables
            .iter()
            .filter_map(|name| self.bindings.get(name).map(|value| (name.clone(), *value)))
            .collect()
    }

    pub fn evaluate(&self) -> Result<bool> {
        ExpressionEvaluator::evaluate(&self.tree, &self.bindings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuntimeError;

    #[test]
    fn test_operator_normalization() {
        assert_eq!(
            ExpressionAssembler::operator_tokens(&LogicalOperator::And),
            vec![Token::And]
        );
        assert_eq!(
            ExpressionAssembler::operator_tokens(&LogicalOperator::Or),
            vec![Token::Or]
        );
        assert_eq!(
            ExpressionAssembler::operator_tokens(&LogicalOperator::AndNot),
            vec![Token::And, Token::Not]
        );
        assert_eq!(
            ExpressionAssembler::operator_tokens(&LogicalOperator::Raw("|| not".to_string())),
            vec![Token::Or, Token::Not]
        );
        assert_eq!(
            ExpressionAssembler::operator_tokens(&LogicalOperator::Raw("xor".to_string())),
            vec![Token::Variable("xor".to_string())]
        );
    }

    #[test]
    fn test_first_operator_is_ignored() {
        let mut assembler = ExpressionAssembler::new();
        assembler.push_term(&ConditionDescriptor::new("a").with_operator("or"), true);
        assembler.push_term(&ConditionDescriptor::new("b"), false);

        assert_eq!(assembler.expression_string(), "a_1 && b_1");
    }

    #[test]
    fn test_brackets_and_and_not() {
        let mut assembler = ExpressionAssembler::new();
        assembler.push_term(&ConditionDescriptor::new("A").open_bracket(), false);
        assembler.push_term(
            &ConditionDescriptor::new("B").with_operator("or").close_bracket(),
            true,
        );
        assembler.push_term(&ConditionDescriptor::new("C").with_operator("and_not"), true);

        assert_eq!(assembler.expression_string(), "( A_1 || B_1 ) && not C_1");

        let expression = assembler.finish().unwrap();
        assert_eq!(expression.source(), "( A_1 || B_1 ) && not C_1");
        assert!(!expression.evaluate().unwrap());
    }

    #[test]
    fn test_variables_unique_per_type() {
        let mut assembler = ExpressionAssembler::new();
        assert_eq!(assembler.push_term(&ConditionDescriptor::new("geo"), true), "geo_1");
        assert_eq!(assembler.push_term(&ConditionDescriptor::new("url"), true), "url_1");
        assert_eq!(assembler.push_term(&ConditionDescriptor::new("geo"), false), "geo_2");

        let expression = assembler.finish().unwrap();
        assert_eq!(expression.source(), "geo_1 && url_1 && geo_2");
        assert_eq!(
            expression.ordered_bindings(),
            vec![
                ("geo_1".to_string(), true),
                ("url_1".to_string(), true),
                ("geo_2".to_string(), false),
            ]
        );
        assert!(!expression.evaluate().unwrap());
    }

    #[test]
    fn test_unbalanced_brackets_fail_on_finish() {
        let mut assembler = ExpressionAssembler::new();
        assembler.push_term(&ConditionDescriptor::new("a").close_bracket(), true);

        let err = assembler.finish().unwrap_err();
        assert!(matches!(err, RuntimeError::Syntax { .. }));
    }

    #[test]
    fn test_empty_assembler_fails_on_finish() {
        let err = ExpressionAssembler::new().finish().unwrap_err();
        assert!(matches!(err, RuntimeError::Syntax { .. }));
    }
}

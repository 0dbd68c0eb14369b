//! Boolean expression tree

use std::fmt;

/// Boolean expression over named variables.
///
/// Chains of the same operator are kept flat in one `And`/`Or` node, so tree
/// depth grows with bracket nesting only, not with the number of operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoolExpr {
    Variable(String),
    Not(Box<BoolExpr>),
    And(Vec<BoolExpr>),
    Or(Vec<BoolExpr>),
}

impl BoolExpr {
    pub fn variable(name: impl Into<String>) -> Self {
        BoolExpr::Variable(name.into())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(operand: BoolExpr) -> Self {
        BoolExpr::Not(Box::new(operand))
    }

    /// Conjunction of `operands`; a single operand is returned as is
    pub fn and(operands: impl IntoIterator<Item = BoolExpr>) -> Self {
        Self::chain(operands.into_iter().collect(), BoolExpr::And)
    }

    /// Disjunction of `operands`; a single operand is returned as is
    pub fn or(operands: impl IntoIterator<Item = BoolExpr>) -> Self {
        Self::chain(operands.into_iter().collect(), BoolExpr::Or)
    }

    fn chain(mut operands: Vec<BoolExpr>, node: fn(Vec<BoolExpr>) -> BoolExpr) -> Self {
        if operands.len() == 1 {
            if let Some(operand) = operands.pop() {
                return operand;
            }
        }
        node(operands)
    }

    /// Variable names in left-to-right order
    pub fn variables(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            BoolExpr::Variable(name) => names.push(name),
            BoolExpr::Not(operand) => operand.collect_variables(names),
            BoolExpr::And(operands) | BoolExpr::Or(operands) => {
                for operand in operands {
                    operand.collect_variables(names);
                }
            }
        }
    }
}

/// Fully parenthesized rendering, mostly for logs
impl fmt::Display for BoolExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoolExpr::Variable(name) => f.write_str(name),
            BoolExpr::Not(operand) => write!(f, "not {}", operand),
            BoolExpr::And(operands) => write_chain(f, operands, " && "),
            BoolExpr::Or(operands) => write_chain(f, operands, " || "),
        }
    }
}

fn write_chain(f: &mut fmt::Formatter<'_>, operands: &[BoolExpr], separator: &str) -> fmt::Result {
    f.write_str("(")?;
    for (i, operand) in operands.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", operand)?;
    }
    f.write_str(")")
}

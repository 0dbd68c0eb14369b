//! Boolean expression over per-condition results
//!
//! The assembler turns descriptors into a token stream plus variable
//! bindings, the parser builds a `BoolExpr` tree from the tokens, and the
//! evaluator computes the result. Precedence from low to high is `||`,
//! `&&`, `not`; parentheses override it.
//!
//! ```text
//! [A, B (or, closes), C (and_not)] with A opening a bracket
//!   tokens: ( A_1 || B_1 ) && not C_1
//!   tree:   And(Or(A_1, B_1), Not(C_1))
//! ```

mod assembler;
mod evaluator;
mod parser;
mod token;
mod tree;

pub use assembler::{AssembledExpression, ExpressionAssembler};
pub use evaluator::ExpressionEvaluator;
pub use parser::ExpressionParser;
pub use token::Token;
pub use tree::BoolExpr;

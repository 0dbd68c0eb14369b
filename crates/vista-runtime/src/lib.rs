//! Vista Runtime - Condition matching for targeting rules
//!
//! Turns an ordered list of condition descriptors into one boolean result:
//! each condition is built by a factory, gets the data providers it depends
//! on loaded into the visitor context, and is matched. The per-condition
//! results are then combined by an expression honouring the descriptors'
//! operators and brackets.

pub mod condition;
pub mod context;
pub mod error;
pub mod expression;
pub mod matcher;
pub mod provider;

// Re-export main types
pub use condition::{Condition, ConditionFactory, ConditionRegistry, DataProviderDependent};
pub use context::{VisitorContext, VISITOR_ID_COOKIE_NAME};
pub use error::{ErrorKind, Result, RuntimeError};
pub use expression::{AssembledExpression, BoolExpr, ExpressionAssembler, ExpressionEvaluator, Token};
pub use matcher::{ConditionMatcher, MatchTrace, ProviderLoadPolicy};
pub use provider::{DataProvider, DataProviderLocator, DataProviderRegistry};

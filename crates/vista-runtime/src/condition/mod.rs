//! Condition capabilities and construction
//!
//! A condition is a predicate over the visitor context. Conditions that need
//! data providers expose that through `as_provider_dependent`, so the matcher
//! probes for the capability instead of relying on a type hierarchy.

mod factory;

pub use factory::{ConditionBuilder, ConditionFactory, ConditionRegistry};

use crate::context::VisitorContext;

/// Predicate evaluated against a visitor context
pub trait Condition: Send + Sync {
    /// Whether the condition carries any discriminating configuration.
    ///
    /// An unconfigured condition (every value matches) returns false; the
    /// matcher then treats it as matching without loading any provider.
    fn can_match(&self) -> bool;

    /// Evaluate the condition. Required providers are loaded beforehand.
    fn matches(&self, context: &VisitorContext) -> bool;

    /// Provider dependency capability, if the condition has one
    fn as_provider_dependent(&self) -> Option<&dyn DataProviderDependent> {
        None
    }
}

/// Capability of conditions that read data loaded by data providers
pub trait DataProviderDependent {
    /// Keys of the providers to load before matching, in load order
    fn data_provider_keys(&self) -> Vec<String>;
}

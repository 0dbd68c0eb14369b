//! Vista SDK
//!
//! High-level API for matching visitors against targeting rules.

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod ruleset;

// Re-export main types
pub use builder::TargetingEngineBuilder;
pub use config::EngineConfig;
pub use engine::TargetingEngine;
pub use error::{Result, SdkError};
pub use ruleset::RuleSet;

// Re-export commonly used types from dependencies
pub use vista_core::{ConditionDescriptor, LogicalOperator, Segment, TargetingRule, Value};
pub use vista_runtime::{
    Condition, ConditionFactory, DataProvider, DataProviderDependent, DataProviderLocator,
    ProviderLoadPolicy, RuntimeError, VisitorContext,
};

/// Attribute for implementing [`DataProvider`]
pub use async_trait::async_trait;

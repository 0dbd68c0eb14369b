//! Condition factory
//!
//! Builds a fresh condition for every descriptor. `ConditionRegistry` maps
//! condition types to builder functions.

use super::Condition;
use crate::error::{Result, RuntimeError};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;
use vista_core::ConditionDescriptor;

/// Builds condition instances from descriptors
pub trait ConditionFactory: Send + Sync {
    /// Build the condition for `descriptor`.
    ///
    /// Fails with a configuration error when the type is unknown.
    fn build(&self, descriptor: &ConditionDescriptor) -> Result<Box<dyn Condition>>;
}

/// Builder function registered for one condition type
pub type ConditionBuilder =
    Box<dyn Fn(&ConditionDescriptor) -> Result<Box<dyn Condition>> + Send + Sync>;

/// Condition factory backed by per-type builder functions
#[derive(Default)]
pub struct ConditionRegistry {
    builders: HashMap<String, ConditionBuilder>,
}

impl ConditionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the builder for a condition type, replacing any previous one
    pub fn register<F>(&mut self, condition_type: impl Into<String>, builder: F)
    where
        F: Fn(&ConditionDescriptor) -> Result<Box<dyn Condition>> + Send + Sync + 'static,
    {
        let condition_type = condition_type.into();
        debug!("Registering condition type: {}", condition_type);
        self.builders.insert(condition_type, Box::new(builder));
    }

    /// Builder method variant of [`register`](Self::register)
    pub fn with<F>(mut self, condition_type: impl Into<String>, builder: F) -> Self
    where
        F: Fn(&ConditionDescriptor) -> Result<Box<dyn Condition>> + Send + Sync + 'static,
    {
        self.register(condition_type, builder);
        self
    }

    pub fn contains(&self, condition_type: &str) -> bool {
        self.builders.contains_key(condition_type)
    }

    /// Registered condition types, sorted
    pub fn condition_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.builders.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

impl ConditionFactory for ConditionRegistry {
    fn build(&self, descriptor: &ConditionDescriptor) -> Result<Box<dyn Condition>> {
        let builder = self
            .builders
            .get(&descriptor.condition_type)
            .ok_or_else(|| RuntimeError::UnknownConditionType(descriptor.condition_type.clone()))?;
        builder(descriptor)
    }
}

impl fmt::Debug for ConditionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionRegistry")
            .field("condition_types", &self.condition_types())
            .finish()
    }
}

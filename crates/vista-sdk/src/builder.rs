//! Builder pattern for TargetingEngine

use crate::config::EngineConfig;
use crate::engine::TargetingEngine;
use crate::error::{Result, SdkError};
use crate::ruleset::RuleSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use vista_core::{ConditionDescriptor, Segment, TargetingRule};
use vista_runtime::{
    Condition, ConditionFactory, ConditionMatcher, ConditionRegistry, DataProvider,
    DataProviderLocator, DataProviderRegistry, ProviderLoadPolicy,
};

/// Builder for TargetingEngine
///
/// # Example
///
/// ```rust,ignore
/// use vista_sdk::TargetingEngineBuilder;
///
/// let engine = TargetingEngineBuilder::new()
///     .register_condition("country", |d| CountryCondition::from_descriptor(d))
///     .register_provider("geoip", Arc::new(GeoIpProvider::new(reader)))
///     .add_rules_file("targeting/rules.yaml")
///     .build()
///     .await?;
///
/// let mut visitor = VisitorContext::from_cookies(&cookies);
/// let matched = engine.evaluate(&mut visitor).await?;
/// ```
#[derive(Default)]
pub struct TargetingEngineBuilder {
    config: EngineConfig,
    conditions: ConditionRegistry,
    condition_factory: Option<Arc<dyn ConditionFactory>>,
    providers: DataProviderRegistry,
    provider_locator: Option<Arc<dyn DataProviderLocator>>,
    rule_contents: Vec<String>,
    rule_set: RuleSet,
}

impl TargetingEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the engine configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the provider load policy
    pub fn with_load_policy(mut self, policy: ProviderLoadPolicy) -> Self {
        self.config.provider_load_policy = policy;
        self
    }

    // ========== Conditions ==========

    /// Register a condition builder on the built-in registry
    pub fn register_condition<F>(mut self, condition_type: impl Into<String>, builder: F) -> Self
    where
        F: Fn(&ConditionDescriptor) -> vista_runtime::Result<Box<dyn Condition>>
            + Send
            + Sync
            + 'static,
    {
        self.conditions.register(condition_type, builder);
        self
    }

    /// Use a custom condition factory instead of the built-in registry
    pub fn with_condition_factory(mut self, factory: Arc<dyn ConditionFactory>) -> Self {
        self.condition_factory = Some(factory);
        self
    }

    // ========== Data providers ==========

    /// Register a data provider on the built-in registry
    pub fn register_provider(mut self, key: impl Into<String>, provider: Arc<dyn DataProvider>) -> Self {
        self.providers.register(key, provider);
        self
    }

    /// Use a custom provider locator instead of the built-in registry
    pub fn with_provider_locator(mut self, locator: Arc<dyn DataProviderLocator>) -> Self {
        self.provider_locator = Some(locator);
        self
    }

    // ========== Rules ==========

    /// Add a rule set file (YAML, or JSON by extension)
    pub fn add_rules_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.rule_files.push(path.into());
        self
    }

    /// Add a YAML rule set document
    pub fn add_rules_content(mut self, content: impl Into<String>) -> Self {
        self.rule_contents.push(content.into());
        self
    }

    /// Add a single rule
    pub fn add_rule(mut self, rule: TargetingRule) -> Self {
        self.rule_set.rules.push(rule);
        self
    }

    /// Add a single segment
    pub fn add_segment(mut self, segment: Segment) -> Self {
        self.rule_set.segments.push(segment);
        self
    }

    /// Load all rule sources and build the engine
    pub async fn build(self) -> Result<TargetingEngine> {
        let mut rule_set = RuleSet::new();

        for path in &self.config.rule_files {
            let loaded = RuleSet::from_file(path).await.map_err(|e| {
                SdkError::ConfigError(format!("failed to load {}: {}", path.display(), e))
            })?;
            rule_set.merge(loaded);
        }

        for content in &self.rule_contents {
            rule_set.merge(RuleSet::from_yaml_str(content)?);
        }

        rule_set.merge(self.rule_set);
        rule_set.validate()?;

        let factory: Arc<dyn ConditionFactory> = match self.condition_factory {
            Some(factory) => factory,
            None => {
                warn_unregistered_types(&self.conditions, &rule_set);
                Arc::new(self.conditions)
            }
        };

        let locator: Arc<dyn DataProviderLocator> = match self.provider_locator {
            Some(locator) => locator,
            None => Arc::new(self.providers),
        };

        let matcher = ConditionMatcher::new(factory, locator)
            .with_load_policy(self.config.provider_load_policy);

        info!(
            "Built targeting engine with {} rules and {} segments",
            rule_set.rules.len(),
            rule_set.segments.len()
        );

        Ok(TargetingEngine::new(
            matcher,
            rule_set.rules,
            rule_set.segments,
            self.config,
        ))
    }
}

/// Unknown types only fail when a rule is evaluated, so flag them early
fn warn_unregistered_types(conditions: &ConditionRegistry, rule_set: &RuleSet) {
    for rule in &rule_set.rules {
        for descriptor in &rule.conditions {
            if !conditions.contains(&descriptor.condition_type) {
                warn!(
                    "Rule '{}' uses unregistered condition type '{}'",
                    rule.id, descriptor.condition_type
                );
            }
        }
    }
}

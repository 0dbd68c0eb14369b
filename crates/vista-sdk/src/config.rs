//! Configuration types for TargetingEngine

use crate::error::{Result, SdkError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vista_runtime::ProviderLoadPolicy;

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// When a provider needed by several conditions is loaded
    #[serde(default)]
    pub provider_load_policy: ProviderLoadPolicy,

    /// Rule set files (YAML, or JSON by `.json` extension)
    #[serde(default)]
    pub rule_files: Vec<PathBuf>,

    /// Stop evaluating rules after the first match
    #[serde(default)]
    pub stop_on_first_match: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            provider_load_policy: ProviderLoadPolicy::default(),
            rule_files: Vec::new(),
            stop_on_first_match: false,
        }
    }

    /// Parse a YAML configuration
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load configuration from a YAML or JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SdkError::ConfigError(format!("failed to read {}: {}", path.display(), e))
        })?;

        if is_json(path) {
            Ok(serde_json::from_str(&content)?)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Add a rule file
    pub fn with_rule_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.rule_files.push(path.into());
        self
    }

    /// Set the provider load policy
    pub fn with_provider_load_policy(mut self, policy: ProviderLoadPolicy) -> Self {
        self.provider_load_policy = policy;
        self
    }

    /// Stop after the first matching rule
    pub fn stop_on_first_match(mut self, stop: bool) -> Self {
        self.stop_on_first_match = stop;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_engine_config_builder() {
        let config = EngineConfig::new()
            .with_rule_file("rules.yaml")
            .with_provider_load_policy(ProviderLoadPolicy::OncePerContext)
            .stop_on_first_match(true);

        assert_eq!(config.rule_files, vec![PathBuf::from("rules.yaml")]);
        assert_eq!(config.provider_load_policy, ProviderLoadPolicy::OncePerContext);
        assert!(config.stop_on_first_match);
    }

    #[test]
    fn test_yaml_defaults() {
        let config = EngineConfig::from_yaml_str("rule_files: [targeting.yaml]").unwrap();

        assert_eq!(config.provider_load_policy, ProviderLoadPolicy::EveryCondition);
        assert_eq!(config.rule_files.len(), 1);
        assert!(!config.stop_on_first_match);
    }

    #[test]
    fn test_yaml_policy() {
        let config = EngineConfig::from_yaml_str("provider_load_policy: once_per_context").unwrap();
        assert_eq!(config.provider_load_policy, ProviderLoadPolicy::OncePerContext);

        assert!(EngineConfig::from_yaml_str("provider_load_policy: sometimes").is_err());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"stop_on_first_match": true}}"#).unwrap();

        let config = EngineConfig::from_file(file.path()).unwrap();
        assert!(config.stop_on_first_match);
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_file("/nonexistent/vista.yaml").unwrap_err();
        assert!(matches!(err, SdkError::ConfigError(_)));
    }
}

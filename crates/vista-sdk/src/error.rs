//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid rule set
    #[error("Invalid rule set: {0}")]
    RuleSetError(String),

    /// Invalid rule definition
    #[error("Invalid rule: {0}")]
    Core(#[from] vista_core::CoreError),

    /// Runtime error
    #[error("Runtime error: {0}")]
    Runtime(#[from] vista_runtime::RuntimeError),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;
    use vista_runtime::RuntimeError;

    #[test]
    fn test_config_error() {
        let error = SdkError::ConfigError("missing rule file".to_string());
        assert_eq!(error.to_string(), "Configuration error: missing rule file");
    }

    #[test]
    fn test_runtime_error_conversion() {
        let error: SdkError = RuntimeError::UnknownConditionType("geo".to_string()).into();
        assert!(matches!(error, SdkError::Runtime(_)));
        assert!(error.to_string().contains("Unknown condition type: geo"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "rules.yaml");
        let error: SdkError = io_error.into();
        assert!(error.to_string().contains("I/O error"));
    }
}

//! Runtime error types

use thiserror::Error;

/// Runtime error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// No condition implementation is registered for the descriptor type
    #[error("Unknown condition type: {0}")]
    UnknownConditionType(String),

    /// A condition implementation rejected its configuration
    #[error("Invalid configuration for condition '{condition_type}': {message}")]
    InvalidConditionConfig {
        condition_type: String,
        message: String,
    },

    /// No data provider is registered for the key
    #[error("Unknown data provider: {0}")]
    UnknownDataProvider(String),

    /// A data provider failed to load its data
    #[error("Data provider '{provider}' failed: {message}")]
    ProviderFailed { provider: String, message: String },

    /// The assembled expression is malformed
    #[error("Expression syntax error: {message} (in '{expression}')")]
    Syntax { message: String, expression: String },

    /// The expression references a variable with no bound value
    #[error("Unbound expression variable: {0}")]
    UnboundVariable(String),
}

/// Error classes a caller can react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller supplied data is invalid (unknown condition type or provider key)
    Configuration,
    /// A data provider failed
    Provider,
    /// Malformed operator/bracket combination
    Syntax,
    /// Assembler and evaluator disagree
    Internal,
}

impl RuntimeError {
    /// Create a provider failure
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        RuntimeError::ProviderFailed {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(condition_type: impl Into<String>, message: impl Into<String>) -> Self {
        RuntimeError::InvalidConditionConfig {
            condition_type: condition_type.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::UnknownConditionType(_)
            | RuntimeError::InvalidConditionConfig { .. }
            | RuntimeError::UnknownDataProvider(_) => ErrorKind::Configuration,
            RuntimeError::ProviderFailed { .. } => ErrorKind::Provider,
            RuntimeError::Syntax { .. } => ErrorKind::Syntax,
            RuntimeError::UnboundVariable(_) => ErrorKind::Internal,
        }
    }

    /// Only provider failures may succeed when retried
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Provider
    }
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

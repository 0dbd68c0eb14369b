//! Condition descriptor definitions
//!
//! A descriptor is the stored form of one condition inside a targeting rule:
//! the condition type and its configuration, the logical operator joining it
//! to the previous condition, and optional grouping brackets.

use crate::types::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Operator joining a condition to the one before it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogicalOperator {
    /// `and` (also the empty string)
    And,
    /// `or`
    Or,
    /// `and_not`: and, negating the following operand
    AndNot,
    /// Any other literal, handed to the expression evaluator verbatim
    Raw(String),
}

impl LogicalOperator {
    /// The literal this operator is stored as
    pub fn as_str(&self) -> &str {
        match self {
            LogicalOperator::And => "and",
            LogicalOperator::Or => "or",
            LogicalOperator::AndNot => "and_not",
            LogicalOperator::Raw(raw) => raw,
        }
    }
}

impl From<&str> for LogicalOperator {
    fn from(value: &str) -> Self {
        match value {
            "" | "and" => LogicalOperator::And,
            "or" => LogicalOperator::Or,
            "and_not" => LogicalOperator::AndNot,
            _ => {
                log::debug!("passing through raw condition operator '{}'", value);
                LogicalOperator::Raw(value.to_string())
            }
        }
    }
}

impl From<String> for LogicalOperator {
    fn from(value: String) -> Self {
        LogicalOperator::from(value.as_str())
    }
}

impl From<LogicalOperator> for String {
    fn from(op: LogicalOperator) -> Self {
        match op {
            LogicalOperator::Raw(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stored condition of a targeting rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionDescriptor {
    /// Condition type, used to pick the condition implementation
    #[serde(rename = "type")]
    pub condition_type: String,

    /// Operator joining this condition to the previous one.
    /// Ignored for the first descriptor of a list; `None` means `and`.
    #[serde(default)]
    pub operator: Option<LogicalOperator>,

    /// Open a bracket before this condition
    #[serde(default, alias = "bracketLeft")]
    pub bracket_left: bool,

    /// Close a bracket after this condition
    #[serde(default, alias = "bracketRight")]
    pub bracket_right: bool,

    /// Condition specific configuration
    #[serde(default)]
    pub config: HashMap<String, Value>,
}

impl ConditionDescriptor {
    /// Create a descriptor with no operator, brackets or configuration
    pub fn new(condition_type: impl Into<String>) -> Self {
        Self {
            condition_type: condition_type.into(),
            operator: None,
            bracket_left: false,
            bracket_right: false,
            config: HashMap::new(),
        }
    }

    /// Set the joining operator
    pub fn with_operator(mut self, operator: impl Into<LogicalOperator>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    /// Open a bracket before this condition
    pub fn open_bracket(mut self) -> Self {
        self.bracket_left = true;
        self
    }

    /// Close a bracket after this condition
    pub fn close_bracket(mut self) -> Self {
        self.bracket_right = true;
        self
    }

    /// Add a configuration entry
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Look up a configuration entry
    pub fn config_value(&self, key: &str) -> Option<&Value> {
        self.config.get(key)
    }

    /// The joining operator, defaulting an unset one to `and`
    pub fn effective_operator(&self) -> LogicalOperator {
        self.operator.clone().unwrap_or(LogicalOperator::And)
    }
}

//! Targeting rule and segment definitions

use super::descriptor::ConditionDescriptor;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Targeting rule: an ordered condition list plus the segments a visitor
/// is assigned to when the conditions match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetingRule {
    /// Unique rule ID
    pub id: String,

    /// Human-readable name
    #[serde(default)]
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Disabled rules are kept but not evaluated
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Ordered conditions, combined left to right
    #[serde(default)]
    pub conditions: Vec<ConditionDescriptor>,

    /// IDs of the segments assigned on match
    #[serde(default)]
    pub segments: Vec<String>,
}

fn default_enabled() -> bool {
    true
}

impl TargetingRule {
    /// Create a new, enabled rule without conditions
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            enabled: true,
            conditions: Vec::new(),
            segments: Vec::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a condition
    pub fn add_condition(mut self, condition: ConditionDescriptor) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Append a segment reference
    pub fn add_segment(mut self, segment_id: impl Into<String>) -> Self {
        self.segments.push(segment_id.into());
        self
    }

    /// Enable or disable the rule
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Check the rule for structural problems
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(CoreError::MissingField("rule.id".to_string()));
        }

        let mut seen = HashSet::new();
        for segment in &self.segments {
            if !seen.insert(segment.as_str()) {
                return Err(CoreError::InvalidValue(format!(
                    "rule '{}' references segment '{}' more than once",
                    self.id, segment
                )));
            }
        }

        Ok(())
    }
}

/// Segment (persona) a visitor can be assigned to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    /// Unique segment ID
    pub id: String,

    /// Human-readable name
    #[serde(default)]
    pub name: String,
}

impl Segment {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

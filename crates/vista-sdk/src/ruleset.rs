//! Rule set documents
//!
//! A rule set declares segments and the targeting rules assigning them:
//!
//! ```yaml
//! segments:
//!   - id: dach
//!     name: DACH region
//! rules:
//!   - id: german_speaking
//!     name: German speaking visitors
//!     conditions:
//!       - type: country
//!         config: { country: AT }
//!       - type: country
//!         operator: or
//!         config: { country: DE }
//!     segments: [dach]
//! ```

use crate::config::is_json;
use crate::error::{Result, SdkError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;
use vista_core::{Segment, TargetingRule};

/// Segments and rules loaded from one or more documents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub segments: Vec<Segment>,

    #[serde(default)]
    pub rules: Vec<TargetingRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse a JSON document
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read a YAML or JSON (by `.json` extension) document
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading rule set from: {}", path.display());

        let content = tokio::fs::read_to_string(path).await?;
        if is_json(path) {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Append another rule set, keeping declaration order
    pub fn merge(&mut self, other: RuleSet) {
        self.segments.extend(other.segments);
        self.rules.extend(other.rules);
    }

    pub fn segment(&self, id: &str) -> Option<&Segment> {
        self.segments.iter().find(|segment| segment.id == id)
    }

    /// Check ids are unique and every segment reference resolves
    pub fn validate(&self) -> Result<()> {
        let mut segment_ids = HashSet::new();
        for segment in &self.segments {
            if segment.id.trim().is_empty() {
                return Err(SdkError::RuleSetError("segment with empty id".to_string()));
            }
            if !segment_ids.insert(segment.id.as_str()) {
                return Err(SdkError::RuleSetError(format!(
                    "duplicate segment id '{}'",
                    segment.id
                )));
            }
        }

        let mut rule_ids = HashSet::new();
        for rule in &self.rules {
            rule.validate()?;

            if !rule_ids.insert(rule.id.as_str()) {
                return Err(SdkError::RuleSetError(format!(
                    "duplicate rule id '{}'",
                    rule.id
                )));
            }

            if let Some(missing) = rule
                .segments
                .iter()
                .find(|id| !segment_ids.contains(id.as_str()))
            {
                return Err(SdkError::RuleSetError(format!(
                    "rule '{}' references unknown segment '{}'",
                    rule.id, missing
                )));
            }
        }

        Ok(())
    }
}

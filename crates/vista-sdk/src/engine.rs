//! Targeting engine
//!
//! Runs every enabled rule of a rule set against a visitor and records the
//! matches on the visitor context.

use crate::config::EngineConfig;
use crate::error::Result;
use std::collections::HashMap;
use tracing::{debug, info};
use vista_core::{ConditionDescriptor, Segment, TargetingRule};
use vista_runtime::{ConditionMatcher, VisitorContext};

/// Matches visitors against targeting rules
#[derive(Debug, Clone)]
pub struct TargetingEngine {
    matcher: ConditionMatcher,
    rules: Vec<TargetingRule>,
    segments: HashMap<String, Segment>,
    config: EngineConfig,
}

impl TargetingEngine {
    pub(crate) fn new(
        matcher: ConditionMatcher,
        rules: Vec<TargetingRule>,
        segments: Vec<Segment>,
        config: EngineConfig,
    ) -> Self {
        let segments = segments
            .into_iter()
            .map(|segment| (segment.id.clone(), segment))
            .collect();

        Self {
            matcher,
            rules,
            segments,
            config,
        }
    }

    /// Evaluate all enabled rules in declaration order.
    ///
    /// Matching rules are appended to the context's matched rules and their
    /// segments to its matched segments. Rules without conditions never
    /// match. Returns the ids of the matched rules. Any error aborts the
    /// evaluation and leaves the matched rules and segments untouched.
    pub async fn evaluate(&self, context: &mut VisitorContext) -> Result<Vec<String>> {
        let mut matched_rules = Vec::new();

        for rule in &self.rules {
            if !rule.enabled {
                continue;
            }
            if rule.conditions.is_empty() {
                debug!("Rule '{}' has no conditions, skipping", rule.id);
                continue;
            }

            if !self.matcher.matches(context, &rule.conditions).await? {
                debug!("Rule '{}' did not match", rule.id);
                continue;
            }

            info!(
                "Rule '{}' matched visitor {}",
                rule.id,
                context.visitor_id().unwrap_or("<anonymous>")
            );
            matched_rules.push(rule);

            if self.config.stop_on_first_match {
                break;
            }
        }

        let mut matched = Vec::with_capacity(matched_rules.len());
        for rule in matched_rules {
            context.add_matched_rule(rule.clone());
            for segment in rule.segments.iter().filter_map(|id| self.segments.get(id)) {
                context.add_matched_segment(segment.clone());
            }
            matched.push(rule.id.clone());
        }

        Ok(matched)
    }

    /// Match a single descriptor list
    pub async fn matches(
        &self,
        context: &mut VisitorContext,
        conditions: &[ConditionDescriptor],
    ) -> Result<bool> {
        Ok(self.matcher.matches(context, conditions).await?)
    }

    pub fn rules(&self) -> &[TargetingRule] {
        &self.rules
    }

    pub fn rule(&self, id: &str) -> Option<&TargetingRule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn segment(&self, id: &str) -> Option<&Segment> {
        self.segments.get(id)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn matcher(&self) -> &ConditionMatcher {
        &self.matcher
    }
}

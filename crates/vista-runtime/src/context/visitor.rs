//! VisitorContext implementation
//!
//! Holds the visitor identity, the facts data providers have loaded, and the
//! rules and segments matched so far. One context lives for exactly one
//! logical visit; concurrent requests each get their own.

use std::collections::{HashMap, HashSet};
use vista_core::{Segment, TargetingRule, Value};

/// Cookie carrying the visitor identifier
pub const VISITOR_ID_COOKIE_NAME: &str = "_pc_vis";

/// Mutable per-visit state bag
#[derive(Debug, Clone, Default)]
pub struct VisitorContext {
    visitor_id: Option<String>,

    /// Facts written by data providers and callers
    data: HashMap<String, Value>,

    /// Matched targeting rules (append-only, in match order)
    matched_rules: Vec<TargetingRule>,

    /// Assigned segments (append-only, in assignment order)
    matched_segments: Vec<Segment>,

    /// Provider keys that completed a load on this context
    loaded_providers: HashSet<String>,
}

impl VisitorContext {
    /// Create a context for a known (or unknown) visitor
    pub fn new(visitor_id: Option<String>) -> Self {
        Self {
            visitor_id,
            ..Self::default()
        }
    }

    /// Create a context without visitor identity
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Create a context seeded from request cookies
    pub fn from_cookies(cookies: &HashMap<String, String>) -> Self {
        Self::new(cookies.get(VISITOR_ID_COOKIE_NAME).cloned())
    }

    /// Builder method to seed data
    pub fn with_data(mut self, data: HashMap<String, Value>) -> Self {
        self.data = data;
        self
    }

    // ========== Visitor identity ==========

    pub fn visitor_id(&self) -> Option<&str> {
        self.visitor_id.as_deref()
    }

    /// False for a missing or empty identifier
    pub fn has_visitor_id(&self) -> bool {
        self.visitor_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    // ========== Data ==========

    /// Whether a non-null value is stored under `key`
    pub fn has(&self, key: &str) -> bool {
        self.data.get(key).is_some_and(|value| !value.is_null())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Stored value, or `default` when absent or null
    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Value {
        match self.data.get(key) {
            Some(value) if !value.is_null() => value.clone(),
            _ => default.into(),
        }
    }

    /// Store a value (last write wins)
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    pub fn data(&self) -> &HashMap<String, Value> {
        &self.data
    }

    /// Replace all data
    pub fn set_data(&mut self, data: HashMap<String, Value>) {
        self.data = data;
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    // ========== Matched rules and segments ==========

    pub fn matched_rules(&self) -> &[TargetingRule] {
        &self.matched_rules
    }

    /// Append a matched rule. Duplicates are kept.
    pub fn add_matched_rule(&mut self, rule: TargetingRule) {
        self.matched_rules.push(rule);
    }

    /// Replace all matched rules, keeping the given order
    pub fn set_matched_rules(&mut self, rules: impl IntoIterator<Item = TargetingRule>) {
        self.matched_rules.clear();
        for rule in rules {
            self.add_matched_rule(rule);
        }
    }

    pub fn matched_segments(&self) -> &[Segment] {
        &self.matched_segments
    }

    /// Append a matched segment. Duplicates are kept.
    pub fn add_matched_segment(&mut self, segment: Segment) {
        self.matched_segments.push(segment);
    }

    /// Replace all matched segments, keeping the given order
    pub fn set_matched_segments(&mut self, segments: impl IntoIterator<Item = Segment>) {
        self.matched_segments.clear();
        for segment in segments {
            self.add_matched_segment(segment);
        }
    }

    // ========== Provider bookkeeping ==========

    pub fn mark_provider_loaded(&mut self, key: impl Into<String>) {
        self.loaded_providers.insert(key.into());
    }

    pub fn is_provider_loaded(&self, key: &str) -> bool {
        self.loaded_providers.contains(key)
    }

    pub fn loaded_providers(&self) -> &HashSet<String> {
        &self.loaded_providers
    }
}

impl<'a> IntoIterator for &'a VisitorContext {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::hash_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visitor_identity() {
        assert!(VisitorContext::new(Some("abc123".to_string())).has_visitor_id());
        assert!(!VisitorContext::new(Some(String::new())).has_visitor_id());
        assert!(!VisitorContext::anonymous().has_visitor_id());
        assert_eq!(VisitorContext::anonymous().visitor_id(), None);
    }

    #[test]
    fn test_from_cookies() {
        let mut cookies = HashMap::new();
        cookies.insert(VISITOR_ID_COOKIE_NAME.to_string(), "v-42".to_string());
        cookies.insert("session".to_string(), "s-1".to_string());

        let ctx = VisitorContext::from_cookies(&cookies);
        assert_eq!(ctx.visitor_id(), Some("v-42"));

        let ctx = VisitorContext::from_cookies(&HashMap::new());
        assert!(!ctx.has_visitor_id());
    }

    #[test]
    fn test_data_accessors() {
        let mut ctx = VisitorContext::anonymous();
        assert!(!ctx.has("country"));
        assert_eq!(ctx.get_or("country", "unknown"), Value::from("unknown"));

        ctx.set("country", "AT");
        ctx.set("country", "DE");
        assert!(ctx.has("country"));
        assert_eq!(ctx.get("country"), Some(&Value::from("DE")));

        ctx.set("device", Value::Null);
        assert!(!ctx.has("device"));
        assert!(ctx.get("device").is_some());
        assert_eq!(ctx.get_or("device", "desktop"), Value::from("desktop"));

        assert_eq!(ctx.remove("country"), Some(Value::from("DE")));
        assert!(!ctx.has("country"));
    }

    #[test]
    fn test_set_data_replaces_everything() {
        let mut ctx = VisitorContext::anonymous();
        ctx.set("a", 1_i64);

        let mut data = HashMap::new();
        data.insert("b".to_string(), Value::from(2_i64));
        ctx.set_data(data);

        assert!(!ctx.has("a"));
        assert!(ctx.has("b"));
        assert_eq!((&ctx).into_iter().count(), 1);
    }

    #[test]
    fn test_matched_rules_keep_order_and_duplicates() {
        let mut ctx = VisitorContext::anonymous();
        ctx.add_matched_rule(TargetingRule::new("r1", "first"));
        ctx.add_matched_rule(TargetingRule::new("r2", "second"));
        ctx.add_matched_rule(TargetingRule::new("r1", "first"));

        let ids: Vec<&str> = ctx.matched_rules().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r2", "r1"]);

        ctx.set_matched_rules(vec![TargetingRule::new("r3", "third")]);
        assert_eq!(ctx.matched_rules().len(), 1);
        assert_eq!(ctx.matched_rules()[0].id, "r3");
    }

    #[test]
    fn test_matched_segments() {
        let mut ctx = VisitorContext::anonymous();
        ctx.add_matched_segment(Segment::new("dach", "DACH region"));
        ctx.add_matched_segment(Segment::new("dach", "DACH region"));
        assert_eq!(ctx.matched_segments().len(), 2);

        ctx.set_matched_segments(Vec::new());
        assert!(ctx.matched_segments().is_empty());
    }

    #[test]
    fn test_provider_bookkeeping() {
        let mut ctx = VisitorContext::anonymous();
        assert!(!ctx.is_provider_loaded("geoip"));

        ctx.mark_provider_loaded("geoip");
        assert!(ctx.is_provider_loaded("geoip"));
        assert_eq!(ctx.loaded_providers().len(), 1);
    }
}

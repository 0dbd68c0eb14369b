//! Common test utilities for SDK integration tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use vista_sdk::{
    async_trait, Condition, ConditionDescriptor, DataProvider, DataProviderDependent,
    RuntimeError, TargetingEngineBuilder, Value, VisitorContext,
};

/// Matches the `country` loaded by the `geoip` provider
pub struct CountryCondition {
    countries: Vec<String>,
}

impl CountryCondition {
    pub fn from_descriptor(
        descriptor: &ConditionDescriptor,
    ) -> vista_runtime::Result<Box<dyn Condition>> {
        let countries = match descriptor.config_value("country") {
            None => Vec::new(),
            Some(value) if value.is_empty() => Vec::new(),
            Some(Value::String(country)) => vec![country.clone()],
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            Some(other) => {
                return Err(RuntimeError::invalid_config(
                    "country",
                    format!("unsupported country value {:?}", other),
                ))
            }
        };
        Ok(Box::new(CountryCondition { countries }))
    }
}

impl Condition for CountryCondition {
    fn can_match(&self) -> bool {
        !self.countries.is_empty()
    }

    fn matches(&self, context: &VisitorContext) -> bool {
        context
            .get("country")
            .and_then(Value::as_str)
            .is_some_and(|country| self.countries.iter().any(|c| c.eq_ignore_ascii_case(country)))
    }

    fn as_provider_dependent(&self) -> Option<&dyn DataProviderDependent> {
        Some(self)
    }
}

impl DataProviderDependent for CountryCondition {
    fn data_provider_keys(&self) -> Vec<String> {
        vec!["geoip".to_string()]
    }
}

/// Matches the caller supplied `language`
pub struct LanguageCondition {
    language: Option<String>,
}

impl Condition for LanguageCondition {
    fn can_match(&self) -> bool {
        self.language.is_some()
    }

    fn matches(&self, context: &VisitorContext) -> bool {
        match (&self.language, context.get("language").and_then(Value::as_str)) {
            (Some(expected), Some(actual)) => actual.starts_with(expected.as_str()),
            _ => false,
        }
    }
}

/// Resolves `ip` to `country` from a fixed table, counting loads
pub struct GeoIpProvider {
    table: HashMap<String, String>,
    pub loads: Arc<AtomicUsize>,
}

impl GeoIpProvider {
    pub fn new() -> Self {
        let table = [("10.0.0.1", "AT"), ("10.0.0.2", "DE"), ("10.0.0.3", "US")]
            .into_iter()
            .map(|(ip, country)| (ip.to_string(), country.to_string()))
            .collect();
        Self {
            table,
            loads: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl DataProvider for GeoIpProvider {
    async fn load(&self, context: &mut VisitorContext) -> vista_runtime::Result<()> {
        self.loads.fetch_add(1, Ordering::SeqCst);

        if context.has("country") {
            return Ok(());
        }

        let ip = context
            .get("ip")
            .and_then(Value::as_str)
            .ok_or_else(|| RuntimeError::provider("geoip", "no ip in visitor context"))?
            .to_string();
        let country = self.table.get(&ip).cloned().map(Value::String).unwrap_or(Value::Null);
        context.set("country", country);
        Ok(())
    }
}

/// Builder with `country` and `language` conditions and the `geoip` provider.
/// Returns the provider's load counter.
pub fn builder() -> (TargetingEngineBuilder, Arc<AtomicUsize>) {
    let geoip = GeoIpProvider::new();
    let loads = geoip.loads.clone();

    let builder = TargetingEngineBuilder::new()
        .register_condition("country", CountryCondition::from_descriptor)
        .register_condition("language", |descriptor| {
            Ok(Box::new(LanguageCondition {
                language: descriptor
                    .config_value("language")
                    .filter(|language| !language.is_empty())
                    .and_then(Value::as_str)
                    .map(str::to_string),
            }))
        })
        .register_provider("geoip", Arc::new(geoip));

    (builder, loads)
}

/// Visitor context with an ip and a language
pub fn visitor(ip: &str, language: &str) -> VisitorContext {
    let mut ctx = VisitorContext::new(Some(format!("visitor-{}", ip)));
    ctx.set("ip", ip);
    ctx.set("language", language);
    ctx
}

pub fn loads(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}

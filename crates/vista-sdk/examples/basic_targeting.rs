//! Basic Targeting Example
//!
//! Builds an engine with two condition types and one data provider, then
//! matches a few visitors against an inline rule set:
//! - `country` needs the `geoip` provider to resolve the visitor's ip
//! - `browser` reads the user agent the caller put on the context
//!
//! Run with `RUST_LOG=debug` to see provider loads and rule decisions.

use std::collections::HashMap;
use std::sync::Arc;
use vista_sdk::{
    async_trait, Condition, ConditionDescriptor, DataProvider, DataProviderDependent,
    ProviderLoadPolicy, RuntimeError, TargetingEngine, TargetingEngineBuilder, Value,
    VisitorContext,
};

const RULES: &str = r#"
segments:
  - id: dach
    name: DACH region
  - id: desktop_firefox
    name: Firefox on desktop
rules:
  - id: dach_visitors
    name: Visitors from Austria, Germany or Switzerland
    conditions:
      - type: country
        config: { country: AT }
      - type: country
        operator: or
        config: { country: DE }
      - type: country
        operator: or
        config: { country: CH }
    segments: [dach]
  - id: firefox_outside_dach
    name: Firefox users outside the DACH region
    conditions:
      - type: browser
        config: { browser: firefox }
      - type: country
        operator: and_not
        bracketLeft: true
        config: { country: AT }
      - type: country
        operator: or
        bracketRight: true
        config: { country: DE }
    segments: [desktop_firefox]
"#;

struct CountryCondition {
    country: Option<String>,
}

impl Condition for CountryCondition {
    fn can_match(&self) -> bool {
        self.country.is_some()
    }

    fn matches(&self, context: &VisitorContext) -> bool {
        match (&self.country, context.get("country").and_then(Value::as_str)) {
            (Some(expected), Some(actual)) => expected.eq_ignore_ascii_case(actual),
            _ => false,
        }
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

struct BrowserCondition {
    browser: Option<String>,
}

impl Condition for BrowserCondition {
    fn can_match(&self) -> bool {
        self.browser.is_some()
    }

    fn matches(&self, context: &VisitorContext) -> bool {
        let user_agent = context
            .get("user_agent")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_lowercase();

        self.browser
            .as_deref()
            .is_some_and(|browser| user_agent.contains(browser))
    }
}

/// Static ip table standing in for a GeoIP database
struct StaticGeoIp {
    table: HashMap<&'static str, &'static str>,
}

#[async_trait]
impl DataProvider for StaticGeoIp {
    async fn load(&self, context: &mut VisitorContext) -> vista_runtime::Result<()> {
        let ip = context
            .get("ip")
            .and_then(Value::as_str)
            .ok_or_else(|| RuntimeError::provider("geoip", "visitor has no ip"))?;

        let country = self.table.get(ip).copied().map(Value::from).unwrap_or_default();
        context.set("country", country);
        Ok(())
    }
}

fn config_string(descriptor: &ConditionDescriptor, key: &str) -> Option<String> {
    descriptor
        .config_value(key)
        .filter(|value| !value.is_empty())
        .and_then(Value::as_str)
        .map(str::to_string)
}

async fn show(engine: &TargetingEngine, ip: &str, user_agent: &str) -> anyhow::Result<()> {
    let mut cookies = HashMap::new();
    cookies.insert(vista_runtime::VISITOR_ID_COOKIE_NAME.to_string(), format!("v-{}", ip));

    let mut visitor = VisitorContext::from_cookies(&cookies);
    visitor.set("ip", ip);
    visitor.set("user_agent", user_agent);

    let matched = engine.evaluate(&mut visitor).await?;
    let segments: Vec<&str> = visitor
        .matched_segments()
        .iter()
        .map(|segment| segment.name.as_str())
        .collect();

    println!("Visitor {} ({})", visitor.visitor_id().unwrap_or("-"), ip);
    println!("  country:  {:?}", visitor.get("country"));
    println!("  rules:    {:?}", matched);
    println!("  segments: {:?}\n", segments);

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    println!("=== Basic Targeting Example ===\n");

    let geoip = StaticGeoIp {
        table: HashMap::from([
            ("192.0.2.10", "AT"),
            ("192.0.2.20", "DE"),
            ("198.51.100.7", "US"),
        ]),
    };

    let engine = TargetingEngineBuilder::new()
        .register_condition("country", |descriptor| {
            Ok(Box::new(CountryCondition {
                country: config_string(descriptor, "country"),
            }))
        })
        .register_condition("browser", |descriptor| {
            Ok(Box::new(BrowserCondition {
                browser: config_string(descriptor, "browser").map(|b| b.to_lowercase()),
            }))
        })
        .register_provider("geoip", Arc::new(geoip))
        .with_load_policy(ProviderLoadPolicy::OncePerContext)
        .add_rules_content(RULES)
        .build()
        .await?;

    println!("Loaded {} rules\n", engine.rules().len());

    show(&engine, "192.0.2.10", "Mozilla/5.0 Firefox/128.0").await?;
    show(&engine, "198.51.100.7", "Mozilla/5.0 Firefox/128.0").await?;
    show(&engine, "198.51.100.7", "Mozilla/5.0 Chrome/126.0").await?;

    Ok(())
}

//! Unit tests for the stored targeting definitions

use vista_core::{ConditionDescriptor, LogicalOperator, TargetingRule, Value};

#[test]
fn test_descriptor_from_stored_json() {
    let json = r#"[
        {"type": "country", "operator": null, "bracketLeft": true, "bracketRight": false,
         "config": {"country": "AT"}},
        {"type": "browser", "operator": "or", "bracketLeft": false, "bracketRight": true,
         "config": {"browser": "firefox"}},
        {"type": "url", "operator": "and_not", "bracketLeft": false, "bracketRight": false}
    ]"#;

    let descriptors: Vec<ConditionDescriptor> = serde_json::from_str(json).unwrap();

    assert_eq!(descriptors.len(), 3);
    assert_eq!(descriptors[0].condition_type, "country");
    assert_eq!(descriptors[0].operator, None);
    assert!(descriptors[0].bracket_left);
    assert_eq!(
        descriptors[0].config_value("country"),
        Some(&Value::String("AT".to_string()))
    );
    assert_eq!(descriptors[1].operator, Some(LogicalOperator::Or));
    assert!(descriptors[1].bracket_right);
    assert_eq!(descriptors[2].operator, Some(LogicalOperator::AndNot));
    assert!(descriptors[2].config.is_empty());
}

#[test]
fn test_descriptor_snake_case_fields_and_empty_operator() {
    let yaml = r#"
type: language
operator: ""
bracket_left: false
bracket_right: true
config:
  language: de
"#;

    let descriptor: ConditionDescriptor = serde_yaml::from_str(yaml).unwrap();

    assert_eq!(descriptor.operator, Some(LogicalOperator::And));
    assert!(descriptor.bracket_right);
}

#[test]
fn test_descriptor_keeps_raw_operator() {
    let json = r#"{"type": "session", "operator": "|| not"}"#;
    let descriptor: ConditionDescriptor = serde_json::from_str(json).unwrap();

    assert_eq!(
        descriptor.operator,
        Some(LogicalOperator::Raw("|| not".to_string()))
    );

    let back = serde_json::to_value(&descriptor).unwrap();
    assert_eq!(back["operator"], "|| not");
}

#[test]
fn test_rule_from_yaml_defaults() -> anyhow::Result<()> {
    let yaml = r#"
id: returning_visitors
conditions:
  - type: visited_pages_before
    config:
      number: 3
segments: [loyal]
"#;

    let rule: TargetingRule = serde_yaml::from_str(yaml)?;

    assert!(rule.enabled);
    assert_eq!(rule.name, "");
    assert_eq!(rule.conditions.len(), 1);
    assert_eq!(
        rule.conditions[0].config_value("number").and_then(Value::as_f64),
        Some(3.0)
    );
    rule.validate()?;
    Ok(())
}

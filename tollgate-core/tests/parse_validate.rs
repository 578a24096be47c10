use indexmap::IndexMap;
use serde_json::json;

use tollgate_core::types::{
    ConditionConfig, HttpConfig, OnError, OnchainBatchConfig, OnchainOperation, Step, StepConfig,
    TransformConfig, WorkflowDefinition, SUPPORTED_VERSION,
};
use tollgate_core::{
    check_definition, parse_definition_str, validate_definition, DefinitionFormat, Validate,
};

const JSON_DEFINITION: &str = r#"{
  "version": "1.0",
  "steps": [
    {
      "id": "fetch-price",
      "name": "Fetch price",
      "type": "http",
      "config": { "url": "https://api.example.com/price", "method": "GET" },
      "outputAs": "price"
    },
    {
      "id": "approve",
      "name": "Approve spend",
      "type": "onchain",
      "config": { "target": "$.input.token", "selector": "0x095ea7b3" },
      "outputAs": "approval",
      "onError": "retry"
    }
  ],
  "outputMapping": { "tx": "$.steps.approval.output.txHash" },
  "scopeConfig": { "allowedTargets": ["0x00000000000000000000000000000000000000aa"] }
}"#;

const YAML_DEFINITION: &str = r#"
version: "1.0"
steps:
  - id: check
    name: Guard
    type: condition
    config:
      expression: "$.input.enabled"
    outputAs: guard
outputMapping:
  ok: "$.steps.check.output"
"#;

fn transform_step(id: &str) -> Step {
    Step {
        id: id.to_string(),
        name: id.to_string(),
        config: StepConfig::Transform(TransformConfig {
            expression: json!("$.input.amount"),
        }),
        output_as: id.to_string(),
        on_error: OnError::Fail,
    }
}

fn definition_with(steps: Vec<Step>) -> WorkflowDefinition {
    WorkflowDefinition {
        version: SUPPORTED_VERSION.to_string(),
        steps,
        output_mapping: IndexMap::new(),
        scope_config: None,
    }
}

#[test]
fn parses_json_definition_with_auto_detection() {
    let parsed = parse_definition_str(JSON_DEFINITION, DefinitionFormat::Auto).unwrap();
    assert_eq!(parsed.format, DefinitionFormat::Json);

    let definition = parsed.definition;
    assert_eq!(definition.version, "1.0");
    assert_eq!(definition.steps.len(), 2);
    assert_eq!(definition.steps[0].output_as, "price");
    assert!(matches!(definition.steps[0].config, StepConfig::Http(_)));
    assert_eq!(definition.steps[1].on_error, OnError::Retry);
    match &definition.steps[1].config {
        StepConfig::Onchain(op) => {
            assert_eq!(op.target, "$.input.token");
            assert_eq!(op.selector.as_deref(), Some("0x095ea7b3"));
        }
        other => panic!("expected onchain config, got {other:?}"),
    }

    assert!(validate_definition(&definition).is_ok());
}

#[test]
fn parses_yaml_definition_with_auto_detection() {
    let parsed = parse_definition_str(YAML_DEFINITION, DefinitionFormat::Auto).unwrap();
    assert_eq!(parsed.format, DefinitionFormat::Yaml);
    assert!(matches!(
        parsed.definition.steps[0].config,
        StepConfig::Condition(_)
    ));
    assert!(parsed.definition.validate().is_ok());
}

#[test]
fn parse_rejects_garbage() {
    assert!(parse_definition_str("{ not json", DefinitionFormat::Json).is_err());
}

#[test]
fn roundtrips_step_discriminator_through_serde() {
    let definition = parse_definition_str(JSON_DEFINITION, DefinitionFormat::Json)
        .unwrap()
        .definition;
    let text = serde_json::to_string(&definition).unwrap();
    let reparsed: WorkflowDefinition = serde_json::from_str(&text).unwrap();
    assert_eq!(definition, reparsed);
}

#[test]
fn valid_definition_yields_clean_outcome() {
    let definition = definition_with(vec![transform_step("only")]);
    let outcome = check_definition(&definition);
    assert!(outcome.valid);
    assert!(outcome.errors.is_empty());
}

#[test]
fn rejects_unsupported_version() {
    let mut definition = definition_with(vec![transform_step("only")]);
    definition.version = "2.0".to_string();
    let outcome = check_definition(&definition);
    assert!(!outcome.valid);
    assert!(outcome.errors.iter().any(|v| v.path == "$.version"));
}

#[test]
fn rejects_empty_steps() {
    let definition = definition_with(vec![]);
    let outcome = check_definition(&definition);
    assert!(outcome.errors.iter().any(|v| v.path == "$.steps"));
}

#[test]
fn rejects_duplicate_step_ids() {
    let definition = definition_with(vec![transform_step("dup"), transform_step("dup")]);
    let outcome = check_definition(&definition);
    assert!(outcome
        .errors
        .iter()
        .any(|v| v.path == "$.steps[1].id" && v.message.contains("unique")));
}

#[test]
fn rejects_missing_output_alias() {
    let mut step = transform_step("a");
    step.output_as = String::new();
    let outcome = check_definition(&definition_with(vec![step]));
    assert!(outcome.errors.iter().any(|v| v.path == "$.steps[0].outputAs"));
}

#[test]
fn rejects_alias_colliding_with_step_id() {
    let mut first = transform_step("a");
    first.output_as = "b".to_string();
    let second = transform_step("b");
    let outcome = check_definition(&definition_with(vec![first, second]));
    assert!(outcome
        .errors
        .iter()
        .any(|v| v.path == "$.steps[0].outputAs" && v.message.contains("step id")));
}

#[test]
fn rejects_http_with_both_or_neither_source() {
    let both = Step {
        id: "h".to_string(),
        name: "h".to_string(),
        config: StepConfig::Http(HttpConfig {
            proxy_id: Some("p1".to_string()),
            url: Some("https://example.com".to_string()),
            method: None,
            headers: None,
            body_mapping: None,
        }),
        output_as: "h".to_string(),
        on_error: OnError::Fail,
    };
    let outcome = check_definition(&definition_with(vec![both]));
    assert!(outcome
        .errors
        .iter()
        .any(|v| v.message.contains("exactly one of proxyId or url")));

    let neither = Step {
        id: "h".to_string(),
        name: "h".to_string(),
        config: StepConfig::Http(HttpConfig {
            proxy_id: None,
            url: None,
            method: None,
            headers: None,
            body_mapping: None,
        }),
        output_as: "h".to_string(),
        on_error: OnError::Fail,
    };
    let outcome = check_definition(&definition_with(vec![neither]));
    assert!(!outcome.valid);
}

#[test]
fn rejects_empty_batch_and_empty_condition() {
    let batch = Step {
        id: "b".to_string(),
        name: "b".to_string(),
        config: StepConfig::OnchainBatch(OnchainBatchConfig { operations: vec![] }),
        output_as: "b".to_string(),
        on_error: OnError::Fail,
    };
    let outcome = check_definition(&definition_with(vec![batch]));
    assert!(outcome
        .errors
        .iter()
        .any(|v| v.path == "$.steps[0].config.operations"));

    let condition = Step {
        id: "c".to_string(),
        name: "c".to_string(),
        config: StepConfig::Condition(ConditionConfig {
            expression: String::new(),
        }),
        output_as: "c".to_string(),
        on_error: OnError::Fail,
    };
    let outcome = check_definition(&definition_with(vec![condition]));
    assert!(outcome
        .errors
        .iter()
        .any(|v| v.path == "$.steps[0].config.expression"));
}

#[test]
fn rejects_onchain_without_target_or_with_lone_fragment() {
    let op = OnchainOperation {
        target: String::new(),
        value: None,
        calldata: None,
        selector: None,
        abi_fragment: Some("function transfer(address to)".to_string()),
        args_mapping: None,
    };
    let step = Step {
        id: "o".to_string(),
        name: "o".to_string(),
        config: StepConfig::Onchain(op),
        output_as: "o".to_string(),
        on_error: OnError::Fail,
    };
    let outcome = check_definition(&definition_with(vec![step]));
    assert!(outcome
        .errors
        .iter()
        .any(|v| v.path == "$.steps[0].config.target"));
    assert!(outcome
        .errors
        .iter()
        .any(|v| v.message.contains("argsMapping must be provided together")));
    assert!(outcome
        .errors
        .iter()
        .any(|v| v.message.contains("requires a selector")));
}

#[test]
fn rejects_malformed_selector_and_bad_expressions() {
    let op = OnchainOperation {
        target: "0x00000000000000000000000000000000000000aa".to_string(),
        value: None,
        calldata: None,
        selector: Some("095ea7b3".to_string()),
        abi_fragment: None,
        args_mapping: None,
    };
    let step = Step {
        id: "o".to_string(),
        name: "o".to_string(),
        config: StepConfig::Onchain(op),
        output_as: "o".to_string(),
        on_error: OnError::Fail,
    };
    let mut definition = definition_with(vec![step]);
    definition
        .output_mapping
        .insert("bad".to_string(), json!("$.steps..x"));

    let outcome = check_definition(&definition);
    assert!(outcome
        .errors
        .iter()
        .any(|v| v.path == "$.steps[0].config.selector"));
    assert!(outcome
        .errors
        .iter()
        .any(|v| v.path == "$.outputMapping.bad"));
}

use std::collections::BTreeMap;

use serde_json::json;

use tollgate_core::expressions::{
    resolve_all, resolve_expression, validate_value_expressions, ResolutionError,
};
use tollgate_core::types::{RunParams, WorkflowContext};

fn make_context() -> WorkflowContext {
    let mut computed = BTreeMap::new();
    computed.insert("feeBps".to_string(), json!(30));
    WorkflowContext::new(RunParams {
        wallet: "0x00000000000000000000000000000000000000aa".to_string(),
        chain_id: 8453,
        session_id: "sess-1".to_string(),
        session_key_address: "0x00000000000000000000000000000000000000bb".to_string(),
        input: json!({
            "amount": "1000",
            "nested": { "value": 42 },
            "items": ["a", "b", "c"]
        }),
        computed,
    })
}

#[test]
fn literal_strings_pass_through_unchanged() {
    let ctx = make_context();
    let result = resolve_expression("hello", &ctx).unwrap();
    assert_eq!(result, json!("hello"));

    // `$`-prefixed but not `$.`-rooted is still a literal.
    let result = resolve_expression("$steps.swap", &ctx).unwrap();
    assert_eq!(result, json!("$steps.swap"));
}

#[test]
fn resolves_scalar_roots() {
    let ctx = make_context();
    assert_eq!(
        resolve_expression("$.wallet", &ctx).unwrap(),
        json!("0x00000000000000000000000000000000000000aa")
    );
    assert_eq!(resolve_expression("$.chainId", &ctx).unwrap(), json!(8453));
    assert_eq!(resolve_expression("$.sessionId", &ctx).unwrap(), json!("sess-1"));
    assert_eq!(
        resolve_expression("$.sessionKeyAddress", &ctx).unwrap(),
        json!("0x00000000000000000000000000000000000000bb")
    );
    let ts = resolve_expression("$.timestamp", &ctx).unwrap();
    assert!(ts.as_i64().unwrap() > 0);
}

#[test]
fn resolves_input_paths_and_array_indices() {
    let ctx = make_context();
    assert_eq!(resolve_expression("$.input.amount", &ctx).unwrap(), json!("1000"));
    assert_eq!(
        resolve_expression("$.input.nested.value", &ctx).unwrap(),
        json!(42)
    );
    assert_eq!(resolve_expression("$.input.items.1", &ctx).unwrap(), json!("b"));
}

#[test]
fn resolves_computed_values() {
    let ctx = make_context();
    assert_eq!(resolve_expression("$.computed.feeBps", &ctx).unwrap(), json!(30));
}

#[test]
fn resolves_step_outputs_under_id_and_alias() {
    let mut ctx = make_context();
    ctx.record_step(
        "swap",
        "swapResult",
        json!({ "success": true, "output": { "txHash": "0xabc" } }),
    );

    assert_eq!(
        resolve_expression("$.steps.swap.output.txHash", &ctx).unwrap(),
        json!("0xabc")
    );
    assert_eq!(
        resolve_expression("$.steps.swapResult.output.txHash", &ctx).unwrap(),
        json!("0xabc")
    );
}

#[test]
fn step_records_are_write_once() {
    let mut ctx = make_context();
    ctx.record_step("swap", "swap", json!({ "success": true, "output": 1 }));
    ctx.record_step("swap", "swap", json!({ "success": true, "output": 2 }));

    assert_eq!(
        resolve_expression("$.steps.swap.output", &ctx).unwrap(),
        json!(1)
    );
}

#[test]
fn missing_path_names_the_expression() {
    let ctx = make_context();
    let err = resolve_expression("$.input.absent", &ctx).unwrap_err();
    assert_eq!(
        err,
        ResolutionError::MissingPath("$.input.absent".to_string())
    );
    assert!(err.to_string().contains("$.input.absent"));
}

#[test]
fn unknown_root_is_an_error() {
    let ctx = make_context();
    let err = resolve_expression("$.payload.amount", &ctx).unwrap_err();
    assert!(matches!(err, ResolutionError::UnknownRoot { .. }));
}

#[test]
fn empty_segment_is_an_error() {
    let ctx = make_context();
    let err = resolve_expression("$.input..value", &ctx).unwrap_err();
    assert!(matches!(err, ResolutionError::InvalidSegment { .. }));
}

#[test]
fn resolve_all_walks_nested_structures() {
    let ctx = make_context();
    let node = json!({
        "amount": "$.input.amount",
        "meta": {
            "chain": "$.chainId",
            "note": "fixed"
        },
        "list": ["$.input.items.0", 7]
    });

    let resolved = resolve_all(&node, &ctx).unwrap();
    assert_eq!(
        resolved,
        json!({
            "amount": "1000",
            "meta": { "chain": 8453, "note": "fixed" },
            "list": ["a", 7]
        })
    );
}

#[test]
fn resolve_all_is_idempotent_on_resolved_structures() {
    let ctx = make_context();
    let node = json!({
        "amount": "$.input.amount",
        "wallet": "$.wallet"
    });

    let once = resolve_all(&node, &ctx).unwrap();
    let twice = resolve_all(&once, &ctx).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn composite_templates_stay_untouched() {
    let ctx = make_context();
    let node = json!("amount is $.input.amount");
    assert_eq!(resolve_all(&node, &ctx).unwrap(), node);
}

#[test]
fn validate_value_expressions_flags_bad_paths() {
    assert!(validate_value_expressions(&json!({ "ok": "$.input.amount" })).is_ok());
    assert!(validate_value_expressions(&json!("plain literal")).is_ok());
    assert!(validate_value_expressions(&json!({ "bad": "$.input..x" })).is_err());
}

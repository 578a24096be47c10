use crate::types::{
    ConditionConfig, HttpConfig, OnchainBatchConfig, OnchainOperation, Step, StepConfig,
    TransformConfig,
};
use crate::validate::rules::common::{validate_expr_string, validate_value_exprs};
use crate::validate::validator::Validator;

const KNOWN_METHODS: [&str; 7] = ["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

pub(crate) fn validate_step(v: &mut Validator, step: &Step, path: &str) {
    match &step.config {
        StepConfig::Http(cfg) => validate_http(v, cfg, path),
        StepConfig::Onchain(op) => validate_operation(v, op, &format!("{path}.config")),
        StepConfig::OnchainBatch(cfg) => validate_batch(v, cfg, path),
        StepConfig::Condition(cfg) => validate_condition(v, cfg, path),
        StepConfig::Transform(cfg) => validate_transform(v, cfg, path),
    }
}

fn validate_http(v: &mut Validator, cfg: &HttpConfig, path: &str) {
    if cfg.proxy_id.is_some() == cfg.url.is_some() {
        v.push(
            format!("{path}.config"),
            "exactly one of proxyId or url must be provided",
        );
    }

    if let Some(url) = &cfg.url {
        validate_expr_string(v, &format!("{path}.config.url"), url);
    }

    if let Some(method) = &cfg.method {
        if !KNOWN_METHODS.contains(&method.to_uppercase().as_str()) {
            v.push(format!("{path}.config.method"), "unknown HTTP method");
        }
    }

    if let Some(headers) = &cfg.headers {
        for (name, value) in headers {
            validate_value_exprs(v, &format!("{path}.config.headers.{name}"), value);
        }
    }

    if let Some(body) = &cfg.body_mapping {
        validate_value_exprs(v, &format!("{path}.config.bodyMapping"), body);
    }
}

fn validate_batch(v: &mut Validator, cfg: &OnchainBatchConfig, path: &str) {
    if cfg.operations.is_empty() {
        v.push(
            format!("{path}.config.operations"),
            "must have at least one entry",
        );
    }
    for (idx, op) in cfg.operations.iter().enumerate() {
        validate_operation(v, op, &format!("{path}.config.operations[{idx}]"));
    }
}

fn validate_operation(v: &mut Validator, op: &OnchainOperation, path: &str) {
    if op.target.trim().is_empty() {
        v.push(format!("{path}.target"), "must not be empty");
    } else {
        validate_expr_string(v, &format!("{path}.target"), &op.target);
    }

    if let Some(value) = &op.value {
        validate_value_exprs(v, &format!("{path}.value"), value);
    }

    if let Some(calldata) = &op.calldata {
        validate_expr_string(v, &format!("{path}.calldata"), calldata);
    }

    if let Some(selector) = &op.selector {
        let hex_part = selector.strip_prefix("0x").unwrap_or("");
        if hex_part.len() != 8 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
            v.push(
                format!("{path}.selector"),
                "must be a 0x-prefixed 4-byte hex string",
            );
        }
    }

    if op.abi_fragment.is_some() != op.args_mapping.is_some() {
        v.push(path, "abiFragment and argsMapping must be provided together");
    }
    if op.abi_fragment.is_some() && op.selector.is_none() {
        v.push(path, "abi-based calldata building also requires a selector");
    }
    if let Some(args) = &op.args_mapping {
        for (name, expr) in args {
            validate_value_exprs(v, &format!("{path}.argsMapping.{name}"), expr);
        }
    }
}

fn validate_condition(v: &mut Validator, cfg: &ConditionConfig, path: &str) {
    if cfg.expression.trim().is_empty() {
        v.push(format!("{path}.config.expression"), "must not be empty");
    } else {
        validate_expr_string(v, &format!("{path}.config.expression"), &cfg.expression);
    }
}

fn validate_transform(v: &mut Validator, cfg: &TransformConfig, path: &str) {
    if cfg.expression.is_null() {
        v.push(format!("{path}.config.expression"), "must be present");
    } else {
        validate_value_exprs(v, &format!("{path}.config.expression"), &cfg.expression);
    }
}

use serde_json::json;

use super::path::{is_expression, parse_path, ResolutionError};
use crate::types::{AnyValue, WorkflowContext};

/// Evaluate a single path expression against the context. Strings that are
/// not `$.`-rooted are returned unchanged.
pub fn resolve_expression(
    expr: &str,
    ctx: &WorkflowContext,
) -> Result<AnyValue, ResolutionError> {
    if !is_expression(expr) {
        return Ok(AnyValue::String(expr.to_string()));
    }

    let path = parse_path(expr)?;
    let (root, rest) = path
        .segments
        .split_first()
        .ok_or_else(|| ResolutionError::EmptyPath(expr.to_string()))?;

    match root.as_str() {
        "wallet" => walk(&json!(ctx.wallet()), rest, expr),
        "chainId" => walk(&json!(ctx.chain_id()), rest, expr),
        "sessionId" => walk(&json!(ctx.session_id()), rest, expr),
        "sessionKeyAddress" => walk(&json!(ctx.session_key_address()), rest, expr),
        "timestamp" => walk(&json!(ctx.timestamp()), rest, expr),
        "input" => walk(ctx.input(), rest, expr),
        "steps" => {
            let (key, tail) = rest
                .split_first()
                .ok_or_else(|| ResolutionError::MissingPath(expr.to_string()))?;
            let value = ctx
                .step_value(key)
                .ok_or_else(|| ResolutionError::MissingPath(expr.to_string()))?;
            walk(value, tail, expr)
        }
        "computed" => {
            let (key, tail) = rest
                .split_first()
                .ok_or_else(|| ResolutionError::MissingPath(expr.to_string()))?;
            let value = ctx
                .computed_value(key)
                .ok_or_else(|| ResolutionError::MissingPath(expr.to_string()))?;
            walk(value, tail, expr)
        }
        other => Err(ResolutionError::UnknownRoot {
            expression: expr.to_string(),
            root: other.to_string(),
        }),
    }
}

/// Recursively walk a JSON-like structure, replacing every string leaf that
/// is itself a full expression with its resolved value. Composite strings
/// and non-expression leaves pass through untouched.
pub fn resolve_all(node: &AnyValue, ctx: &WorkflowContext) -> Result<AnyValue, ResolutionError> {
    match node {
        AnyValue::Null | AnyValue::Bool(_) | AnyValue::Number(_) => Ok(node.clone()),
        AnyValue::String(s) => {
            if is_expression(s) {
                resolve_expression(s, ctx)
            } else {
                Ok(node.clone())
            }
        }
        AnyValue::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(resolve_all(item, ctx)?);
            }
            Ok(AnyValue::Array(out))
        }
        AnyValue::Object(map) => {
            let mut out = serde_json::Map::new();
            for (key, value) in map {
                out.insert(key.clone(), resolve_all(value, ctx)?);
            }
            Ok(AnyValue::Object(out))
        }
    }
}

fn walk(start: &AnyValue, segments: &[String], expr: &str) -> Result<AnyValue, ResolutionError> {
    let mut current = start;
    for segment in segments {
        let next = match current {
            AnyValue::Object(map) => map.get(segment),
            AnyValue::Array(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|idx| items.get(idx)),
            _ => None,
        };
        current = next.ok_or_else(|| ResolutionError::MissingPath(expr.to_string()))?;
    }
    Ok(current.clone())
}

/// Validate that any `$.`-rooted strings inside a value are syntactically
/// valid paths. Used by the static validator; never touches a context.
pub fn validate_value_expressions(value: &AnyValue) -> Result<(), ResolutionError> {
    match value {
        AnyValue::Null | AnyValue::Bool(_) | AnyValue::Number(_) => Ok(()),
        AnyValue::String(s) => {
            if is_expression(s) {
                parse_path(s)?;
            }
            Ok(())
        }
        AnyValue::Array(items) => {
            for item in items {
                validate_value_expressions(item)?;
            }
            Ok(())
        }
        AnyValue::Object(map) => {
            for value in map.values() {
                validate_value_expressions(value)?;
            }
            Ok(())
        }
    }
}

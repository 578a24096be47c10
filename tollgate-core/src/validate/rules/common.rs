use crate::expressions::{is_expression, parse_path, validate_value_expressions};
use crate::validate::validator::{Validator, MAP_KEY_RE};

pub(crate) fn validate_map_keys<'a>(
    v: &mut Validator,
    path: &str,
    keys: impl Iterator<Item = &'a String>,
) {
    for key in keys {
        if !MAP_KEY_RE.is_match(key) {
            v.push(
                format!("{path}.{key}"),
                "map key must match regex ^[a-zA-Z0-9\\.\\-_]+$",
            );
        }
    }
}

/// Check path syntax when the string is expression-shaped; literals pass.
pub(crate) fn validate_expr_string(v: &mut Validator, path: &str, s: &str) {
    if is_expression(s) {
        if let Err(e) = parse_path(s) {
            v.push(path, format!("invalid expression: {e}"));
        }
    }
}

pub(crate) fn validate_value_exprs(v: &mut Validator, path: &str, value: &serde_json::Value) {
    if let Err(e) = validate_value_expressions(value) {
        v.push(path, format!("invalid expression inside value: {e}"));
    }
}

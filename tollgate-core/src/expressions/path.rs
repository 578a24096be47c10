use std::sync::LazyLock;

use regex::Regex;

static SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-]+$").expect("valid regex"));

/// Returns true when the string is a full context expression, i.e. a
/// `$.`-rooted path. Anything else is treated as a literal.
pub fn is_expression(s: &str) -> bool {
    s.starts_with("$.")
}

/// A parsed `$`-rooted path, e.g. `$.steps.swap.output.txHash`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextPath {
    pub segments: Vec<String>,
}

pub fn parse_path(expr: &str) -> Result<ContextPath, ResolutionError> {
    let Some(rest) = expr.strip_prefix("$.") else {
        return Err(ResolutionError::NotAnExpression(expr.to_string()));
    };
    if rest.is_empty() {
        return Err(ResolutionError::EmptyPath(expr.to_string()));
    }

    let mut segments = Vec::new();
    for part in rest.split('.') {
        if !SEGMENT_RE.is_match(part) {
            return Err(ResolutionError::InvalidSegment {
                expression: expr.to_string(),
                segment: part.to_string(),
            });
        }
        segments.push(part.to_string());
    }

    Ok(ContextPath { segments })
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    #[error("not a context expression: {0}")]
    NotAnExpression(String),
    #[error("expression has no path segments: {0}")]
    EmptyPath(String),
    #[error("invalid path segment '{segment}' in expression: {expression}")]
    InvalidSegment { expression: String, segment: String },
    #[error("unknown context root '{root}' in expression: {expression}")]
    UnknownRoot { expression: String, root: String },
    #[error("expression does not resolve to a value in the context: {0}")]
    MissingPath(String),
}

use indexmap::IndexMap;
use serde_json::json;

use tollgate_core::error::Violation;
use tollgate_core::types::AnyValue;
use tollgate_core::ValidationOutcome;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    pub success: bool,
    pub output: AnyValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepRecord {
    pub fn succeeded(output: AnyValue) -> Self {
        Self {
            success: true,
            output,
            error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            success: false,
            output: AnyValue::Null,
            error: Some(error),
        }
    }

    /// The JSON a successful step contributes to `context.steps`, shaped so
    /// `$.steps.<id>.output.<path>` resolves.
    pub fn context_value(&self) -> AnyValue {
        json!({ "success": self.success, "output": self.output })
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    pub success: bool,
    pub output: AnyValue,
    pub step_results: IndexMap<String, StepRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunResult {
    pub fn succeeded(output: AnyValue, step_results: IndexMap<String, StepRecord>) -> Self {
        Self {
            success: true,
            output,
            step_results,
            error: None,
        }
    }

    pub fn failed(step_results: IndexMap<String, StepRecord>, error: String) -> Self {
        Self {
            success: false,
            output: AnyValue::Null,
            step_results,
            error: Some(error),
        }
    }

    pub fn invalid(outcome: &ValidationOutcome) -> Self {
        let detail = outcome
            .errors
            .iter()
            .map(|Violation { path, message }| format!("{path}: {message}"))
            .collect::<Vec<_>>()
            .join("; ");
        Self::failed(
            IndexMap::new(),
            format!("definition failed validation: {detail}"),
        )
    }
}

use indexmap::IndexMap;

use crate::types::{AnyValue, Step};

/// The one workflow schema version this engine executes.
pub const SUPPORTED_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDefinition {
    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub steps: Vec<Step>,

    /// Name -> expression mapping resolved against the final context to
    /// produce the run's output.
    #[serde(default)]
    pub output_mapping: IndexMap<String, AnyValue>,

    /// Allow-listed dynamic call targets. Consumed by the external
    /// permissioning layer, never by the engine itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_config: Option<ScopeConfig>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeConfig {
    #[serde(default)]
    pub allowed_targets: Vec<String>,
}

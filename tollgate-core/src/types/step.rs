use indexmap::IndexMap;

use crate::types::{AnyValue, OnchainOperation};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(flatten)]
    pub config: StepConfig,

    /// Alias key under which this step's result is additionally stored in
    /// context, besides its own id.
    #[serde(default)]
    pub output_as: String,

    #[serde(default)]
    pub on_error: OnError,
}

/// Type-specific step configuration, discriminated by the `type` field on
/// the wire. Each variant carries only its own config.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "snake_case")]
pub enum StepConfig {
    Http(HttpConfig),
    Onchain(OnchainOperation),
    OnchainBatch(OnchainBatchConfig),
    Condition(ConditionConfig),
    Transform(TransformConfig),
}

impl StepConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            StepConfig::Http(_) => "http",
            StepConfig::Onchain(_) => "onchain",
            StepConfig::OnchainBatch(_) => "onchain_batch",
            StepConfig::Condition(_) => "condition",
            StepConfig::Transform(_) => "transform",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnError {
    #[default]
    Fail,
    Skip,
    Retry,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpConfig {
    /// Id of a stored proxy record; mutually exclusive with `url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Header values are resolved as expressions against the context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<IndexMap<String, AnyValue>>,

    /// Arbitrary nested structure of expressions; becomes the JSON request
    /// body for POST/PUT/PATCH.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_mapping: Option<AnyValue>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnchainBatchConfig {
    #[serde(default)]
    pub operations: Vec<OnchainOperation>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionConfig {
    #[serde(default)]
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformConfig {
    #[serde(default)]
    pub expression: AnyValue,
}

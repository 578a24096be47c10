mod common;
mod context;
mod onchain;
mod step;
mod workflow;

pub use common::AnyValue;
pub use context::{RunParams, WorkflowContext};
pub use onchain::OnchainOperation;
pub use step::{
    ConditionConfig, HttpConfig, OnError, OnchainBatchConfig, Step, StepConfig, TransformConfig,
};
pub use workflow::{ScopeConfig, WorkflowDefinition, SUPPORTED_VERSION};

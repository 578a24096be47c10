use tollgate_core::expressions::ResolutionError;

use crate::calldata::CalldataError;
use crate::http::HttpError;
use crate::proxy::ProxyError;

/// Everything a step handler can fail with. The engine consults the step's
/// `onError` policy to decide whether the run continues.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StepError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error("invalid call target: {0}")]
    InvalidTarget(String),
    #[error(transparent)]
    Calldata(#[from] CalldataError),
    #[error(transparent)]
    ExternalCall(#[from] ExternalCallError),
    #[error("permission denied for target {target} in operation '{operation}': {reason}")]
    Permission {
        target: String,
        operation: String,
        reason: String,
    },
    #[error("condition evaluated to false: {0}")]
    ConditionNotMet(String),
}

impl StepError {
    /// Only external-call failures are worth retrying; every other variant
    /// is deterministic and would fail again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StepError::ExternalCall(_))
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ExternalCallError {
    #[error("http status {status}: {body}")]
    Status { status: u16, body: String },
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error(transparent)]
    Proxy(#[from] ProxyError),
    #[error("transaction submission failed: {0}")]
    Transaction(String),
}

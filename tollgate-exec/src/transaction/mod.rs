use async_trait::async_trait;

/// Wire format selector for the execution payload: one packed call, or an
/// ABI-encoded array of call triples executed atomically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    Single,
    Batch,
}

impl ExecutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Single => "single",
            ExecutionMode::Batch => "batch",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub session_id: String,
    pub mode: ExecutionMode,
    pub execution_data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSubmission {
    pub tx_hash: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum TransactionError {
    /// The session key's permission policy rejected the call target.
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("submission failed: {0}")]
    Submission(String),
}

/// Signing, broadcast, and confirmation are owned by the surrounding
/// platform; the engine only hands over a packed payload.
#[async_trait]
pub trait TransactionExecutor: Send + Sync {
    async fn execute(
        &self,
        request: TransactionRequest,
    ) -> Result<TransactionSubmission, TransactionError>;
}

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

/// Structured observability hook: one started/finished event pair per step,
/// kept out of handler control flow.
#[derive(Debug, Clone)]
pub enum Event {
    RunStarted {
        run_id: Uuid,
        step_count: usize,
    },
    RunFinished {
        run_id: Uuid,
        success: bool,
    },
    StepStarted {
        run_id: Uuid,
        step_id: String,
        step_type: String,
    },
    StepSucceeded {
        run_id: Uuid,
        step_id: String,
    },
    StepSkipped {
        run_id: Uuid,
        step_id: String,
        error: String,
    },
    StepFailed {
        run_id: Uuid,
        step_id: String,
        error: String,
    },
    StepRetryScheduled {
        run_id: Uuid,
        step_id: String,
        attempt: u32,
        delay_ms: u64,
    },
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: Event);
}

pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: Event) {}
}

/// Emits one JSON line per event on stdout.
pub struct StdoutEventSink;

#[async_trait]
impl EventSink for StdoutEventSink {
    async fn emit(&self, event: Event) {
        let json = match event {
            Event::RunStarted { run_id, step_count } => {
                json!({ "type": "run.started", "run_id": run_id.to_string(), "step_count": step_count })
            }
            Event::RunFinished { run_id, success } => {
                json!({ "type": "run.finished", "run_id": run_id.to_string(), "success": success })
            }
            Event::StepStarted { run_id, step_id, step_type } => {
                json!({ "type": "step.started", "run_id": run_id.to_string(), "step_id": step_id, "step_type": step_type })
            }
            Event::StepSucceeded { run_id, step_id } => {
                json!({ "type": "step.succeeded", "run_id": run_id.to_string(), "step_id": step_id })
            }
            Event::StepSkipped { run_id, step_id, error } => {
                json!({ "type": "step.skipped", "run_id": run_id.to_string(), "step_id": step_id, "error": error })
            }
            Event::StepFailed { run_id, step_id, error } => {
                json!({ "type": "step.failed", "run_id": run_id.to_string(), "step_id": step_id, "error": error })
            }
            Event::StepRetryScheduled { run_id, step_id, attempt, delay_ms } => {
                json!({ "type": "step.retry_scheduled", "run_id": run_id.to_string(), "step_id": step_id, "attempt": attempt, "delay_ms": delay_ms })
            }
        };
        println!("{}", serde_json::to_string(&json).unwrap_or_default());
    }
}

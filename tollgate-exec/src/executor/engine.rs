use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;
use uuid::Uuid;

use tollgate_core::check_definition;
use tollgate_core::expressions::{resolve_all, ResolutionError};
use tollgate_core::types::{
    AnyValue, OnError, RunParams, Step, StepConfig, WorkflowContext, WorkflowDefinition,
};

use crate::executor::error::StepError;
use crate::executor::events::{Event, EventSink};
use crate::executor::http_step::{self, HttpStepDeps};
use crate::executor::local_steps;
use crate::executor::onchain_step;
use crate::executor::result::{RunResult, StepRecord};
use crate::http::HttpClient;
use crate::proxy::{HeaderCrypto, ProxyStore};
use crate::retry::RetryPolicy;
use crate::transaction::TransactionExecutor;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub retry: RetryPolicy,
    pub http_timeout: Duration,
    pub max_response_bytes: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            http_timeout: Duration::from_secs(30),
            max_response_bytes: 4 * 1024 * 1024,
        }
    }
}

/// Executes one workflow definition at a time, strictly in step order. A
/// pure function of (definition, params, collaborators): nothing is
/// persisted, and the context never leaves a run.
pub struct Engine {
    config: EngineConfig,
    http: Arc<dyn HttpClient>,
    proxies: Arc<dyn ProxyStore>,
    header_crypto: Arc<dyn HeaderCrypto>,
    transactions: Arc<dyn TransactionExecutor>,
    events: Arc<dyn EventSink>,
}

impl Engine {
    pub fn new(
        config: EngineConfig,
        http: Arc<dyn HttpClient>,
        proxies: Arc<dyn ProxyStore>,
        header_crypto: Arc<dyn HeaderCrypto>,
        transactions: Arc<dyn TransactionExecutor>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            config,
            http,
            proxies,
            header_crypto,
            transactions,
            events,
        }
    }

    pub async fn execute(&self, definition: &WorkflowDefinition, params: RunParams) -> RunResult {
        let outcome = check_definition(definition);
        if !outcome.valid {
            return RunResult::invalid(&outcome);
        }

        let run_id = Uuid::new_v4();
        let mut ctx = WorkflowContext::new(params);
        let mut step_results: IndexMap<String, StepRecord> = IndexMap::new();

        self.events
            .emit(Event::RunStarted {
                run_id,
                step_count: definition.steps.len(),
            })
            .await;

        for step in &definition.steps {
            self.events
                .emit(Event::StepStarted {
                    run_id,
                    step_id: step.id.clone(),
                    step_type: step.config.kind().to_string(),
                })
                .await;

            match self.run_step_with_retry(run_id, step, &ctx).await {
                Ok(output) => {
                    let record = StepRecord::succeeded(output);
                    ctx.record_step(&step.id, &step.output_as, record.context_value());
                    step_results.insert(step.id.clone(), record);
                    self.events
                        .emit(Event::StepSucceeded {
                            run_id,
                            step_id: step.id.clone(),
                        })
                        .await;
                }
                Err(err) => match step.on_error {
                    OnError::Skip => {
                        step_results.insert(step.id.clone(), StepRecord::failed(err.to_string()));
                        ctx.record_step(&step.id, &step.output_as, AnyValue::Null);
                        self.events
                            .emit(Event::StepSkipped {
                                run_id,
                                step_id: step.id.clone(),
                                error: err.to_string(),
                            })
                            .await;
                    }
                    // Retry attempts are exhausted by now; both policies
                    // abort the run. Side effects already committed by
                    // earlier steps are not rolled back.
                    OnError::Fail | OnError::Retry => {
                        step_results.insert(step.id.clone(), StepRecord::failed(err.to_string()));
                        self.events
                            .emit(Event::StepFailed {
                                run_id,
                                step_id: step.id.clone(),
                                error: err.to_string(),
                            })
                            .await;
                        self.events
                            .emit(Event::RunFinished {
                                run_id,
                                success: false,
                            })
                            .await;
                        return RunResult::failed(
                            step_results,
                            format!("step '{}' failed: {err}", step.id),
                        );
                    }
                },
            }
        }

        match resolve_output(definition, &ctx) {
            Ok(output) => {
                self.events
                    .emit(Event::RunFinished {
                        run_id,
                        success: true,
                    })
                    .await;
                RunResult::succeeded(output, step_results)
            }
            Err(err) => {
                self.events
                    .emit(Event::RunFinished {
                        run_id,
                        success: false,
                    })
                    .await;
                RunResult::failed(step_results, format!("output mapping failed: {err}"))
            }
        }
    }

    async fn run_step_with_retry(
        &self,
        run_id: Uuid,
        step: &Step,
        ctx: &WorkflowContext,
    ) -> Result<AnyValue, StepError> {
        let mut attempt = 1u32;
        loop {
            match self.dispatch(step, ctx).await {
                Ok(output) => return Ok(output),
                Err(err) => {
                    let retry = step.on_error == OnError::Retry
                        && err.is_retryable()
                        && attempt < self.config.retry.max_attempts;
                    if !retry {
                        return Err(err);
                    }
                    let delay = self.config.retry.backoff_delay(attempt);
                    self.events
                        .emit(Event::StepRetryScheduled {
                            run_id,
                            step_id: step.id.clone(),
                            attempt,
                            delay_ms: delay.as_millis() as u64,
                        })
                        .await;
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn dispatch(&self, step: &Step, ctx: &WorkflowContext) -> Result<AnyValue, StepError> {
        match &step.config {
            StepConfig::Http(cfg) => {
                let deps = HttpStepDeps {
                    http: self.http.as_ref(),
                    proxies: self.proxies.as_ref(),
                    header_crypto: self.header_crypto.as_ref(),
                    timeout: self.config.http_timeout,
                    max_response_bytes: self.config.max_response_bytes,
                };
                http_step::run(cfg, ctx, &deps).await
            }
            StepConfig::Onchain(op) => {
                onchain_step::run_single(op, &step.name, ctx, self.transactions.as_ref()).await
            }
            StepConfig::OnchainBatch(cfg) => {
                onchain_step::run_batch(cfg, &step.name, ctx, self.transactions.as_ref()).await
            }
            StepConfig::Condition(cfg) => local_steps::run_condition(cfg, ctx),
            StepConfig::Transform(cfg) => local_steps::run_transform(cfg, ctx),
        }
    }
}

fn resolve_output(
    definition: &WorkflowDefinition,
    ctx: &WorkflowContext,
) -> Result<AnyValue, ResolutionError> {
    let mut out = serde_json::Map::new();
    for (name, expr) in &definition.output_mapping {
        out.insert(name.clone(), resolve_all(expr, ctx)?);
    }
    Ok(AnyValue::Object(out))
}

use alloy_primitives::{Address, U256};
use serde_json::json;

use tollgate_core::expressions::{resolve_all, resolve_expression};
use tollgate_core::types::{AnyValue, OnchainBatchConfig, OnchainOperation, WorkflowContext};

use crate::calldata::{self, CallTriple};
use crate::executor::error::{ExternalCallError, StepError};
use crate::transaction::{
    ExecutionMode, TransactionError, TransactionExecutor, TransactionRequest,
};

pub(crate) async fn run_single(
    op: &OnchainOperation,
    step_name: &str,
    ctx: &WorkflowContext,
    executor: &dyn TransactionExecutor,
) -> Result<AnyValue, StepError> {
    let call = resolve_operation(op, ctx)?;
    let target = call.target.to_string();
    let execution_data = calldata::encode_single_call(&call);
    submit(executor, ctx, ExecutionMode::Single, execution_data, &target, step_name).await
}

pub(crate) async fn run_batch(
    cfg: &OnchainBatchConfig,
    step_name: &str,
    ctx: &WorkflowContext,
    executor: &dyn TransactionExecutor,
) -> Result<AnyValue, StepError> {
    if cfg.operations.is_empty() {
        return Err(StepError::Configuration(
            "onchain_batch step has no operations".to_string(),
        ));
    }

    let mut calls = Vec::with_capacity(cfg.operations.len());
    for op in &cfg.operations {
        calls.push(resolve_operation(op, ctx)?);
    }
    let targets = calls
        .iter()
        .map(|call| call.target.to_string())
        .collect::<Vec<_>>()
        .join(",");

    let execution_data = calldata::encode_batch(&calls);
    submit(executor, ctx, ExecutionMode::Batch, execution_data, &targets, step_name).await
}

/// Shared resolution for single and batch operations: target address, native
/// value, and the calldata from whichever source the operation carries.
pub(crate) fn resolve_operation(
    op: &OnchainOperation,
    ctx: &WorkflowContext,
) -> Result<CallTriple, StepError> {
    let target = match resolve_expression(&op.target, ctx)? {
        AnyValue::String(s) => s,
        other => return Err(StepError::InvalidTarget(other.to_string())),
    };
    if !target.starts_with("0x") {
        return Err(StepError::InvalidTarget(target));
    }
    let address = target
        .parse::<Address>()
        .map_err(|_| StepError::InvalidTarget(target.clone()))?;

    let value = match &op.value {
        None => U256::ZERO,
        Some(raw) => {
            let resolved = resolve_all(raw, ctx)?;
            parse_amount(&resolved).ok_or_else(|| {
                StepError::Configuration(format!(
                    "value must be a non-negative integer, got {resolved}"
                ))
            })?
        }
    };

    let calldata = resolve_calldata(op, ctx)?;

    Ok(CallTriple {
        target: address,
        value,
        calldata,
    })
}

fn resolve_calldata(op: &OnchainOperation, ctx: &WorkflowContext) -> Result<Vec<u8>, StepError> {
    if let Some(expr) = &op.calldata {
        let hex_str = match resolve_expression(expr, ctx)? {
            AnyValue::String(s) => s,
            other => {
                return Err(StepError::Configuration(format!(
                    "calldata must resolve to a hex string, got {other}"
                )))
            }
        };
        return Ok(calldata::hex_bytes(&hex_str)?);
    }

    if let (Some(fragment), Some(args), Some(_)) =
        (&op.abi_fragment, &op.args_mapping, &op.selector)
    {
        return Ok(calldata::build_function_call(fragment, args, ctx)?);
    }

    if let Some(selector) = &op.selector {
        return Ok(calldata::selector_bytes(selector)?.to_vec());
    }

    Err(StepError::Configuration(
        "onchain operation needs calldata, an abi fragment, or a selector".to_string(),
    ))
}

async fn submit(
    executor: &dyn TransactionExecutor,
    ctx: &WorkflowContext,
    mode: ExecutionMode,
    execution_data: Vec<u8>,
    target: &str,
    step_name: &str,
) -> Result<AnyValue, StepError> {
    let request = TransactionRequest {
        session_id: ctx.session_id().to_string(),
        mode,
        execution_data,
    };
    match executor.execute(request).await {
        Ok(submission) => Ok(json!({ "txHash": submission.tx_hash })),
        // Diagnostics only: name the target and operation the allow-list
        // rejected, then fail like any other step error.
        Err(TransactionError::PermissionDenied(reason)) => Err(StepError::Permission {
            target: target.to_string(),
            operation: step_name.to_string(),
            reason,
        }),
        Err(err) => Err(StepError::ExternalCall(ExternalCallError::Transaction(
            err.to_string(),
        ))),
    }
}

fn parse_amount(value: &AnyValue) -> Option<U256> {
    match value {
        AnyValue::Number(n) => n.as_u64().map(U256::from),
        AnyValue::String(s) => {
            if let Some(hex_part) = s.strip_prefix("0x") {
                U256::from_str_radix(hex_part, 16).ok()
            } else {
                U256::from_str_radix(s, 10).ok()
            }
        }
        _ => None,
    }
}

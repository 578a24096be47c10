use tollgate_core::expressions::{resolve_all, resolve_expression};
use tollgate_core::types::{AnyValue, ConditionConfig, TransformConfig, WorkflowContext};

use crate::executor::error::StepError;

/// A condition step is a guard: a falsy result fails the step, and the
/// step's `onError` decides whether the run survives it.
pub(crate) fn run_condition(
    cfg: &ConditionConfig,
    ctx: &WorkflowContext,
) -> Result<AnyValue, StepError> {
    let resolved = resolve_expression(&cfg.expression, ctx)?;
    if truthy(&resolved) {
        Ok(AnyValue::Bool(true))
    } else {
        Err(StepError::ConditionNotMet(cfg.expression.clone()))
    }
}

pub(crate) fn run_transform(
    cfg: &TransformConfig,
    ctx: &WorkflowContext,
) -> Result<AnyValue, StepError> {
    Ok(resolve_all(&cfg.expression, ctx)?)
}

fn truthy(value: &AnyValue) -> bool {
    match value {
        AnyValue::Null => false,
        AnyValue::Bool(b) => *b,
        AnyValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        AnyValue::String(s) => !s.is_empty(),
        AnyValue::Array(items) => !items.is_empty(),
        AnyValue::Object(map) => !map.is_empty(),
    }
}

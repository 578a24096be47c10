mod rules;
mod validator;

use crate::error::{ValidationError, Violation};
use crate::types::WorkflowDefinition;
use validator::Validator;

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for WorkflowDefinition {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_definition(self)
    }
}

pub fn validate_definition(definition: &WorkflowDefinition) -> Result<(), ValidationError> {
    let mut v = Validator::new();
    v.validate_definition(definition);
    v.finish()
}

/// Outcome-shaped variant of [`validate_definition`] that never raises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub errors: Vec<Violation>,
}

pub fn check_definition(definition: &WorkflowDefinition) -> ValidationOutcome {
    let mut v = Validator::new();
    v.validate_definition(definition);
    let errors = v.into_violations();
    ValidationOutcome {
        valid: errors.is_empty(),
        errors,
    }
}

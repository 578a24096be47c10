#![forbid(unsafe_code)]

pub mod error;
pub mod expressions;
pub mod parser;
pub mod types;
pub mod validate;

pub use crate::error::{ParseError, TollgateError, ValidationError};
pub use crate::parser::{parse_definition_str, DefinitionFormat, ParsedDefinition};
pub use crate::types::WorkflowDefinition;
pub use crate::validate::{check_definition, validate_definition, Validate, ValidationOutcome};

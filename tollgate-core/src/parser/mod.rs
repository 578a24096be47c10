use crate::error::ParseError;
use crate::types::WorkflowDefinition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Json,
    Yaml,
    Auto,
}

#[derive(Debug, Clone)]
pub struct ParsedDefinition {
    pub definition: WorkflowDefinition,
    pub format: DefinitionFormat,
}

pub fn parse_definition_str(
    input: &str,
    format: DefinitionFormat,
) -> Result<ParsedDefinition, ParseError> {
    match format {
        DefinitionFormat::Json => Ok(ParsedDefinition {
            definition: serde_json::from_str::<WorkflowDefinition>(input)?,
            format,
        }),
        DefinitionFormat::Yaml => Ok(ParsedDefinition {
            definition: serde_yaml::from_str::<WorkflowDefinition>(input)?,
            format,
        }),
        DefinitionFormat::Auto => parse_definition_auto(input),
    }
}

fn parse_definition_auto(input: &str) -> Result<ParsedDefinition, ParseError> {
    // Heuristic: JSON always starts with `{` or `[` after trimming.
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return match serde_json::from_str::<WorkflowDefinition>(input) {
            Ok(definition) => Ok(ParsedDefinition {
                definition,
                format: DefinitionFormat::Json,
            }),
            Err(json_err) => match serde_yaml::from_str::<WorkflowDefinition>(input) {
                Ok(definition) => Ok(ParsedDefinition {
                    definition,
                    format: DefinitionFormat::Yaml,
                }),
                // Report the JSON error since JSON was tried first.
                Err(_) => Err(ParseError::Json(json_err)),
            },
        };
    }

    match serde_yaml::from_str::<WorkflowDefinition>(input) {
        Ok(definition) => Ok(ParsedDefinition {
            definition,
            format: DefinitionFormat::Yaml,
        }),
        Err(yaml_err) => {
            if let Ok(definition) = serde_json::from_str::<WorkflowDefinition>(input) {
                return Ok(ParsedDefinition {
                    definition,
                    format: DefinitionFormat::Json,
                });
            }
            Err(ParseError::Yaml(yaml_err))
        }
    }
}

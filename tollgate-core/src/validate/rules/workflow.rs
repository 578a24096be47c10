use std::collections::HashSet;

use crate::types::{WorkflowDefinition, SUPPORTED_VERSION};
use crate::validate::rules::{common::validate_map_keys, common::validate_value_exprs, step};
use crate::validate::validator::{Validator, ID_RE};

pub(crate) fn validate_definition(v: &mut Validator, definition: &WorkflowDefinition) {
    if definition.version != SUPPORTED_VERSION {
        v.push(
            "$.version",
            format!("only workflow schema version {SUPPORTED_VERSION} is supported"),
        );
    }

    if definition.steps.is_empty() {
        v.push("$.steps", "must have at least one entry");
    }

    validate_map_keys(v, "$.outputMapping", definition.output_mapping.keys());
    for (key, expr) in &definition.output_mapping {
        validate_value_exprs(v, &format!("$.outputMapping.{key}"), expr);
    }

    if let Some(scope) = &definition.scope_config {
        for (idx, target) in scope.allowed_targets.iter().enumerate() {
            if target.trim().is_empty() {
                v.push(
                    format!("$.scopeConfig.allowedTargets[{idx}]"),
                    "must not be empty",
                );
            }
        }
    }

    let ids: HashSet<&str> = definition.steps.iter().map(|s| s.id.as_str()).collect();
    let mut seen_ids = HashSet::<&str>::new();
    let mut seen_aliases = HashSet::<&str>::new();

    for (idx, step) in definition.steps.iter().enumerate() {
        let spath = format!("$.steps[{idx}]");

        if step.id.is_empty() || !ID_RE.is_match(&step.id) {
            v.push(format!("{spath}.id"), "must match regex [A-Za-z0-9_\\-]+");
        }
        if !seen_ids.insert(step.id.as_str()) {
            v.push(format!("{spath}.id"), "must be unique within the workflow");
        }

        if step.output_as.is_empty() || !ID_RE.is_match(&step.output_as) {
            v.push(
                format!("{spath}.outputAs"),
                "must be present and match regex [A-Za-z0-9_\\-]+",
            );
        } else if step.output_as != step.id {
            // Context writes are once per key; an alias clashing with another
            // step's id or alias would silently drop a record.
            if ids.contains(step.output_as.as_str()) {
                v.push(
                    format!("{spath}.outputAs"),
                    "must not collide with a step id",
                );
            }
            if !seen_aliases.insert(step.output_as.as_str()) {
                v.push(
                    format!("{spath}.outputAs"),
                    "must be unique within the workflow",
                );
            }
        }

        step::validate_step(v, step, &spath);
    }
}

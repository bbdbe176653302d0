//! Prompt placeholder rule.

use crate::finding::Finding;
use arbor_core::{DefinitionError, IDENTIFIER_PATTERN, is_identifier};
use arbor_model::AgentDefinition;

/// Check template placeholders against the identifier grammar and, when a
/// prompt declares variables, against that declaration
pub fn check_prompts(agent: &AgentDefinition, out: &mut Vec<Finding>) {
    for (i, prompt) in agent.prompts().iter().enumerate() {
        let path = format!("prompts[{i}].template");
        let placeholders = prompt.placeholders();

        for name in &placeholders {
            if !is_identifier(name) {
                out.push(Finding::error(
                    &path,
                    DefinitionError::invalid_format("placeholder", name, IDENTIFIER_PATTERN),
                ));
            }
        }

        if prompt.variables().is_empty() {
            continue;
        }

        for name in &placeholders {
            if !prompt.variables().iter().any(|v| v == name) {
                out.push(Finding::warning(
                    &path,
                    DefinitionError::reference(prompt.name(), name),
                ));
            }
        }
        for (k, var) in prompt.variables().iter().enumerate() {
            if !placeholders.contains(&var.as_str()) {
                out.push(Finding::info(
                    format!("prompts[{i}].variables[{k}]"),
                    DefinitionError::UnusedDeclaration {
                        owner: format!("prompt '{}'", prompt.name()),
                        name: var.clone(),
                    },
                ));
            }
        }
    }
}

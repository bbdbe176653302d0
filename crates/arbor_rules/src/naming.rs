//! Naming and version format rules.

use crate::finding::Finding;
use arbor_core::{DefinitionError, IDENTIFIER_PATTERN, SEMVER_PATTERN, Version, is_identifier};
use arbor_model::AgentDefinition;

fn check_name(field: &str, value: &str, path: String, out: &mut Vec<Finding>) {
    if !is_identifier(value) {
        out.push(Finding::error(
            path,
            DefinitionError::invalid_format(field, value, IDENTIFIER_PATTERN),
        ));
    }
}

/// Run the identifier grammar over every declared name
pub fn check_names(agent: &AgentDefinition, out: &mut Vec<Finding>) {
    check_name("agent name", agent.name(), "name".to_string(), out);

    for (i, workflow) in agent.workflows().iter().enumerate() {
        check_name("workflow name", workflow.name(), format!("workflows[{i}].name"), out);
        for (j, node) in workflow.nodes().iter().enumerate() {
            check_name(
                "node name",
                node.name(),
                format!("workflows[{i}].nodes[{j}].name"),
                out,
            );
        }
    }

    for (i, module) in agent.modules().iter().enumerate() {
        check_name("module name", module.name(), format!("modules[{i}].name"), out);
    }
    for (i, prompt) in agent.prompts().iter().enumerate() {
        check_name("prompt name", prompt.name(), format!("prompts[{i}].name"), out);
    }
    for (i, tool) in agent.tools().iter().enumerate() {
        check_name("tool name", tool.name(), format!("tools[{i}].name"), out);
    }
}

/// Check the agent version against the semver grammar
pub fn check_version(agent: &AgentDefinition, out: &mut Vec<Finding>) {
    if Version::parse(agent.version()).is_err() {
        out.push(Finding::error(
            "version",
            DefinitionError::invalid_format("version", agent.version(), SEMVER_PATTERN),
        ));
    }
}

//! Uniqueness and empty-collection rules.

use crate::finding::Finding;
use arbor_core::DefinitionError;
use arbor_model::AgentDefinition;
use indexmap::IndexMap;

/// Names that occur more than once, in order of first appearance
fn duplicates<'a>(names: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for name in names {
        *counts.entry(name).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name)
        .collect()
}

fn report(scope: &str, path: &str, names: Vec<&str>, out: &mut Vec<Finding>) {
    for name in names {
        out.push(Finding::error(
            path,
            DefinitionError::Duplicate {
                scope: scope.to_string(),
                name: name.to_string(),
            },
        ));
    }
}

/// One duplicate finding per repeated name in each collection
pub fn check_uniqueness(agent: &AgentDefinition, out: &mut Vec<Finding>) {
    let agent_scope = |collection: &str| format!("{collection} of agent '{}'", agent.name());

    report(
        &agent_scope("workflows"),
        "workflows",
        duplicates(agent.workflows().iter().map(|w| w.name())),
        out,
    );
    report(
        &agent_scope("modules"),
        "modules",
        duplicates(agent.modules().iter().map(|m| m.name())),
        out,
    );
    report(
        &agent_scope("prompts"),
        "prompts",
        duplicates(agent.prompts().iter().map(|p| p.name())),
        out,
    );
    report(
        &agent_scope("tools"),
        "tools",
        duplicates(agent.tools().iter().map(|t| t.name())),
        out,
    );

    for (i, workflow) in agent.workflows().iter().enumerate() {
        report(
            &format!("nodes of workflow '{}'", workflow.name()),
            &format!("workflows[{i}].nodes"),
            duplicates(workflow.nodes().iter().map(|n| n.name())),
            out,
        );
    }
}

/// Warn about an agent without workflows and workflows without nodes
pub fn check_empty(agent: &AgentDefinition, out: &mut Vec<Finding>) {
    if agent.workflows().is_empty() {
        out.push(Finding::warning(
            "workflows",
            DefinitionError::EmptyCollection {
                collection: "workflows".to_string(),
                parent: format!("agent '{}'", agent.name()),
            },
        ));
    }

    for (i, workflow) in agent.workflows().iter().enumerate() {
        if workflow.is_empty() {
            out.push(Finding::warning(
                format!("workflows[{i}].nodes"),
                DefinitionError::EmptyCollection {
                    collection: "nodes".to_string(),
                    parent: format!("workflow '{}'", workflow.name()),
                },
            ));
        }
    }
}

//! Reference resolution rules.
//!
//! Which collection a node reference resolves against depends on the
//! node type: task nodes may name a module or a tool, module and tool
//! nodes only their own kind, subworkflow nodes another workflow.

use crate::finding::Finding;
use arbor_core::DefinitionError;
use arbor_model::{AgentDefinition, NodeType};
use std::collections::HashSet;

/// Check every entry node, dependency and node reference
pub fn check_references(agent: &AgentDefinition, out: &mut Vec<Finding>) {
    let modules: HashSet<&str> = agent.modules().iter().map(|m| m.name()).collect();
    let tools: HashSet<&str> = agent.tools().iter().map(|t| t.name()).collect();
    let workflows: HashSet<&str> = agent.workflows().iter().map(|w| w.name()).collect();

    for (i, workflow) in agent.workflows().iter().enumerate() {
        let nodes: HashSet<&str> = workflow.nodes().iter().map(|n| n.name()).collect();

        if !nodes.contains(workflow.entry_node()) {
            out.push(Finding::error(
                format!("workflows[{i}].entry_node"),
                DefinitionError::reference(workflow.name(), workflow.entry_node()),
            ));
        }

        for (j, node) in workflow.nodes().iter().enumerate() {
            for (k, dep) in node.depends_on().iter().enumerate() {
                if !nodes.contains(dep.as_str()) {
                    out.push(Finding::error(
                        format!("workflows[{i}].nodes[{j}].depends_on[{k}]"),
                        DefinitionError::reference(node.name(), dep),
                    ));
                }
            }

            let Some(target) = node.reference() else {
                continue;
            };
            let resolves = match node.node_type() {
                NodeType::Task => modules.contains(target) || tools.contains(target),
                NodeType::Module => modules.contains(target),
                NodeType::Tool => tools.contains(target),
                NodeType::Subworkflow => workflows.contains(target),
            };
            if !resolves {
                out.push(Finding::error(
                    format!("workflows[{i}].nodes[{j}].reference"),
                    DefinitionError::reference(node.name(), target),
                ));
            }
        }
    }
}

/// Report modules and tools that no node references
pub fn check_unused(agent: &AgentDefinition, out: &mut Vec<Finding>) {
    let referenced: HashSet<&str> = agent
        .workflows()
        .iter()
        .flat_map(|w| w.nodes())
        .filter(|n| n.node_type() != NodeType::Subworkflow)
        .filter_map(|n| n.reference())
        .collect();

    let owner = format!("agent '{}'", agent.name());
    for (i, module) in agent.modules().iter().enumerate() {
        if !referenced.contains(module.name()) {
            out.push(Finding::info(
                format!("modules[{i}]"),
                DefinitionError::UnusedDeclaration {
                    owner: owner.clone(),
                    name: module.name().to_string(),
                },
            ));
        }
    }
    for (i, tool) in agent.tools().iter().enumerate() {
        if !referenced.contains(tool.name()) {
            out.push(Finding::info(
                format!("tools[{i}]"),
                DefinitionError::UnusedDeclaration {
                    owner: owner.clone(),
                    name: tool.name().to_string(),
                },
            ));
        }
    }
}

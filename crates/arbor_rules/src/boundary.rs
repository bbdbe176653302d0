//! Platform boundary scan.
//!
//! A definition describes work; it must not try to drive execution,
//! scheduling or billing. This is a token scan over declared text, not a
//! parser, and it only ever produces warnings.

use crate::finding::Finding;
use arbor_core::DefinitionError;
use arbor_model::AgentDefinition;

/// Terms that signal an attempt to use the definition as an execution engine
pub const DEFAULT_RESERVED_TERMS: &[&str] = &[
    "execute",
    "execution",
    "runtime",
    "scheduler",
    "cron",
    "billing",
    "payment",
    "invoice",
    "daemon",
    "autorun",
];

/// Lowercased alphanumeric runs
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Every (location, text) pair subject to the scan
fn scanned_text(agent: &AgentDefinition) -> Vec<(String, &str)> {
    let mut texts = vec![
        ("name".to_string(), agent.name()),
        ("description".to_string(), agent.description()),
    ];
    if let Some(goal) = agent.task_goal() {
        texts.push(("task_goal".to_string(), goal));
    }
    if let Some(criteria) = agent.completion_criteria() {
        texts.push(("completion_criteria.success".to_string(), criteria.success()));
        texts.push(("completion_criteria.failure".to_string(), criteria.failure()));
    }

    for (i, workflow) in agent.workflows().iter().enumerate() {
        texts.push((format!("workflows[{i}].name"), workflow.name()));
        texts.push((format!("workflows[{i}].description"), workflow.description()));
        texts.push((format!("workflows[{i}].entry_node"), workflow.entry_node()));
        for (j, node) in workflow.nodes().iter().enumerate() {
            let at = format!("workflows[{i}].nodes[{j}]");
            texts.push((format!("{at}.name"), node.name()));
            texts.push((format!("{at}.goal"), node.goal()));
            if let Some(description) = node.description() {
                texts.push((format!("{at}.description"), description));
            }
            if let Some(reference) = node.reference() {
                texts.push((format!("{at}.reference"), reference));
            }
            for (k, input) in node.inputs().iter().enumerate() {
                texts.push((format!("{at}.inputs[{k}]"), input.as_str()));
            }
            for (k, output) in node.outputs().iter().enumerate() {
                texts.push((format!("{at}.outputs[{k}]"), output.as_str()));
            }
        }
    }
    for (i, module) in agent.modules().iter().enumerate() {
        texts.push((format!("modules[{i}].name"), module.name()));
        texts.push((format!("modules[{i}].description"), module.description()));
    }
    for (i, prompt) in agent.prompts().iter().enumerate() {
        texts.push((format!("prompts[{i}].name"), prompt.name()));
        texts.push((format!("prompts[{i}].description"), prompt.description()));
        texts.push((format!("prompts[{i}].template"), prompt.template()));
        for (k, variable) in prompt.variables().iter().enumerate() {
            texts.push((format!("prompts[{i}].variables[{k}]"), variable.as_str()));
        }
    }
    for (i, tool) in agent.tools().iter().enumerate() {
        texts.push((format!("tools[{i}].name"), tool.name()));
        texts.push((format!("tools[{i}].description"), tool.description()));
    }
    texts
}

/// Scan declared text for reserved terms
///
/// Multi-word terms such as `execution_id` match as consecutive tokens.
pub fn check_boundary(agent: &AgentDefinition, terms: &[String], out: &mut Vec<Finding>) {
    let terms: Vec<(&String, Vec<String>)> = terms
        .iter()
        .map(|t| (t, tokenize(t)))
        .filter(|(_, tokens)| !tokens.is_empty())
        .collect();
    if terms.is_empty() {
        return;
    }

    for (location, text) in scanned_text(agent) {
        let tokens = tokenize(text);
        for (term, term_tokens) in &terms {
            if tokens.windows(term_tokens.len()).any(|w| w == term_tokens.as_slice()) {
                out.push(Finding::warning(
                    &location,
                    DefinitionError::ReservedTerm {
                        location: location.clone(),
                        term: (*term).clone(),
                    },
                ));
            }
        }
    }
}

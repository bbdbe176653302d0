//! Rule engine: runs every enabled rule and aggregates the findings.

use crate::boundary::{DEFAULT_RESERVED_TERMS, check_boundary};
use crate::collections::{check_empty, check_uniqueness};
use crate::finding::{Finding, ValidationResult};
use crate::graph::{check_cycles, check_reachability};
use crate::naming::{check_names, check_version};
use crate::prompt::check_prompts;
use crate::reference::{check_references, check_unused};
use crate::schema::check_schemas;
use arbor_model::AgentDefinition;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// A single validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Identifier grammar on names
    Naming,
    /// Semver grammar on the agent version
    Version,
    /// Unique names per collection
    Uniqueness,
    /// Warn about empty workflow and node lists
    EmptyCollections,
    /// Entry nodes, dependencies and node references resolve
    References,
    /// Modules and tools that nothing references
    Unused,
    /// Dependency and subworkflow cycles
    Cycles,
    /// Nodes unreachable from the entry node
    Reachability,
    /// Input and output schema shape
    Schemas,
    /// Prompt template placeholders
    Prompts,
    /// Reserved-term scan
    Boundary,
}

impl Rule {
    /// Every rule, in execution order
    pub const ALL: [Rule; 11] = [
        Rule::Naming,
        Rule::Version,
        Rule::Uniqueness,
        Rule::EmptyCollections,
        Rule::References,
        Rule::Unused,
        Rule::Cycles,
        Rule::Reachability,
        Rule::Schemas,
        Rule::Prompts,
        Rule::Boundary,
    ];

    /// Configuration name of the rule
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Naming => "naming",
            Self::Version => "version",
            Self::Uniqueness => "uniqueness",
            Self::EmptyCollections => "empty_collections",
            Self::References => "references",
            Self::Unused => "unused",
            Self::Cycles => "cycles",
            Self::Reachability => "reachability",
            Self::Schemas => "schemas",
            Self::Prompts => "prompts",
            Self::Boundary => "boundary",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs the enabled rules over a complete definition
///
/// The engine holds only configuration, so one instance can validate any
/// number of definitions, from any number of threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEngine {
    rules: IndexSet<Rule>,
    reserved_terms: Vec<String>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEngine {
    /// Engine with every rule and the default reserved terms
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: Rule::ALL.into_iter().collect(),
            reserved_terms: DEFAULT_RESERVED_TERMS.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Run only the given rules
    #[must_use]
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        let wanted: IndexSet<Rule> = rules.into_iter().collect();
        // Keep execution order stable regardless of how the caller lists them.
        self.rules = Rule::ALL.into_iter().filter(|r| wanted.contains(r)).collect();
        self
    }

    /// Disable one rule
    #[must_use]
    pub fn without_rule(mut self, rule: Rule) -> Self {
        self.rules.shift_remove(&rule);
        self
    }

    /// Replace the reserved-term list
    #[must_use]
    pub fn with_reserved_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_terms = terms.into_iter().map(Into::into).collect();
        self
    }

    /// Add terms to the reserved-term list
    #[must_use]
    pub fn with_extra_reserved_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for term in terms {
            let term = term.into();
            if !self.reserved_terms.contains(&term) {
                self.reserved_terms.push(term);
            }
        }
        self
    }

    /// Check whether a rule will run
    #[must_use]
    pub fn is_enabled(&self, rule: Rule) -> bool {
        self.rules.contains(&rule)
    }

    /// Active reserved terms
    #[must_use]
    pub fn reserved_terms(&self) -> &[String] {
        &self.reserved_terms
    }

    /// Validate a definition
    ///
    /// Every enabled rule runs; findings are never short-circuited.
    #[must_use]
    pub fn validate(&self, agent: &AgentDefinition) -> ValidationResult {
        let mut findings: Vec<Finding> = Vec::new();

        for &rule in &self.rules {
            let before = findings.len();
            match rule {
                Rule::Naming => check_names(agent, &mut findings),
                Rule::Version => check_version(agent, &mut findings),
                Rule::Uniqueness => check_uniqueness(agent, &mut findings),
                Rule::EmptyCollections => check_empty(agent, &mut findings),
                Rule::References => check_references(agent, &mut findings),
                Rule::Unused => check_unused(agent, &mut findings),
                Rule::Cycles => check_cycles(agent, &mut findings),
                Rule::Reachability => check_reachability(agent, &mut findings),
                Rule::Schemas => check_schemas(agent, &mut findings),
                Rule::Prompts => check_prompts(agent, &mut findings),
                Rule::Boundary => check_boundary(agent, &self.reserved_terms, &mut findings),
            }
            debug!(
                rule = rule.as_str(),
                agent = agent.name(),
                findings = findings.len() - before,
                "rule pass complete"
            );
        }

        ValidationResult::new(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::Severity;
    use arbor_core::DefinitionError;
    use arbor_model::{AgentBuilder, ModuleBuilder, NodeBuilder, WorkflowBuilder};

    fn node(name: &str, deps: &[&str]) -> arbor_model::Node {
        deps.iter()
            .fold(NodeBuilder::new(name).goal("Do work"), |b, d| b.depends_on(*d))
            .build()
            .unwrap()
    }

    fn valid_agent() -> AgentDefinition {
        AgentBuilder::new("greeter")
            .version("1.0.0")
            .description("Generates personalized greetings")
            .add_module(ModuleBuilder::new("formatter").build().unwrap())
            .add_workflow(
                WorkflowBuilder::new("main")
                    .entry_node("greet")
                    .add_node(
                        NodeBuilder::new("greet")
                            .goal("Compose a greeting")
                            .uses_module("formatter")
                            .build()
                            .unwrap(),
                    )
                    .add_node(node("review", &["greet"]))
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_valid_definition_has_no_findings() {
        let result = RuleEngine::new().validate(&valid_agent());
        assert!(result.is_empty(), "{:?}", result.findings());
        assert!(result.is_valid());
    }

    #[test]
    fn test_findings_are_aggregated() {
        let agent = AgentBuilder::new("agent")
            .version("1.0.0")
            .add_workflow(
                WorkflowBuilder::new("main")
                    .entry_node("A")
                    .add_node(node("A", &["C"]))
                    .add_node(node("B", &["A"]))
                    .add_node(node("C", &["B"]))
                    .add_node(node("bad name", &[]))
                    .add_node(node("B", &[]))
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let result = RuleEngine::new().validate(&agent);
        assert!(result.count(Severity::Error) >= 3);
        let codes: Vec<_> = result.errors().map(Finding::code).collect();
        assert!(codes.contains(&"INVALID_FORMAT"));
        assert!(codes.contains(&"DUPLICATE_NAME"));
        assert!(codes.contains(&"CYCLIC_DEPENDENCY"));
    }

    #[test]
    fn test_disabled_rule_is_skipped() {
        let agent = AgentBuilder::new("agent").version("1.0").build().unwrap();
        let all = RuleEngine::new().validate(&agent);
        assert!(!all.is_valid());

        let engine = RuleEngine::new().without_rule(Rule::Version);
        assert!(!engine.is_enabled(Rule::Version));
        assert!(engine.validate(&agent).is_valid());
    }

    #[test]
    fn test_with_rules_keeps_execution_order() {
        let engine = RuleEngine::new().with_rules([Rule::Cycles, Rule::Naming]);
        let agent = AgentBuilder::new("bad agent")
            .version("1.0.0")
            .add_workflow(
                WorkflowBuilder::new("main")
                    .entry_node("A")
                    .add_node(node("A", &["A"]))
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let codes: Vec<_> = engine.validate(&agent).findings().iter().map(Finding::code).collect();
        assert_eq!(codes, vec!["INVALID_FORMAT", "CYCLIC_DEPENDENCY"]);
    }

    #[test]
    fn test_extra_reserved_terms() {
        let agent = AgentBuilder::new("agent")
            .version("1.0.0")
            .description("Tracks the ledger")
            .add_workflow(
                WorkflowBuilder::new("main")
                    .entry_node("a")
                    .add_node(node("a", &[]))
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        assert!(RuleEngine::new().validate(&agent).is_empty());

        let engine = RuleEngine::new().with_extra_reserved_terms(["ledger"]);
        let result = engine.validate(&agent);
        assert_eq!(result.count(Severity::Warning), 1);
        assert!(matches!(
            &result.findings()[0].error,
            DefinitionError::ReservedTerm { term, .. } if term == "ledger"
        ));
    }

    #[test]
    fn test_rule_serde_names() {
        for rule in Rule::ALL {
            let json = serde_json::to_string(&rule).unwrap();
            assert_eq!(json, format!("\"{}\"", rule.as_str()));
        }
    }
}

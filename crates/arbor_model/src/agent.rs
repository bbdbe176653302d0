//! Agent definition: the aggregate root.

use crate::capability::{Module, Tool};
use crate::criteria::CompletionCriteria;
use crate::prompt::Prompt;
use crate::schema::Schema;
use crate::workflow::Workflow;
use serde::{Deserialize, Serialize};

/// Whether the agent is a single capability or composes others
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentType {
    /// Self-contained agent
    #[default]
    Atomic,
    /// Agent assembled from other agents' capabilities
    Composite,
}

/// Complete description of a task-oriented agent
///
/// Collections keep insertion order and may contain duplicate names;
/// uniqueness is a rule engine finding, not a construction failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentDefinition {
    pub(crate) name: String,
    pub(crate) version: String,
    pub(crate) description: String,
    pub(crate) agent_type: AgentType,
    pub(crate) task_goal: Option<String>,
    pub(crate) completion_criteria: Option<CompletionCriteria>,
    pub(crate) input_schema: Option<Schema>,
    pub(crate) output_schema: Option<Schema>,
    pub(crate) workflows: Vec<Workflow>,
    pub(crate) modules: Vec<Module>,
    pub(crate) prompts: Vec<Prompt>,
    pub(crate) tools: Vec<Tool>,
}

impl AgentDefinition {
    /// Agent name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version string, not yet checked against the semver grammar
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Free-text description
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Agent kind
    #[must_use]
    pub fn agent_type(&self) -> AgentType {
        self.agent_type
    }

    /// Overall goal, if set
    #[must_use]
    pub fn task_goal(&self) -> Option<&str> {
        self.task_goal.as_deref()
    }

    /// Success and failure conditions, if set
    #[must_use]
    pub fn completion_criteria(&self) -> Option<&CompletionCriteria> {
        self.completion_criteria.as_ref()
    }

    /// Schema of accepted input, if set
    #[must_use]
    pub fn input_schema(&self) -> Option<&Schema> {
        self.input_schema.as_ref()
    }

    /// Schema of produced output, if set
    #[must_use]
    pub fn output_schema(&self) -> Option<&Schema> {
        self.output_schema.as_ref()
    }

    /// Workflows in insertion order
    #[must_use]
    pub fn workflows(&self) -> &[Workflow] {
        &self.workflows
    }

    /// Modules in insertion order
    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Prompts in insertion order
    #[must_use]
    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    /// Tools in insertion order
    #[must_use]
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// First workflow with the given name
    #[must_use]
    pub fn workflow(&self, name: &str) -> Option<&Workflow> {
        self.workflows.iter().find(|w| w.name == name)
    }

    /// First module with the given name
    #[must_use]
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// First prompt with the given name
    #[must_use]
    pub fn prompt(&self, name: &str) -> Option<&Prompt> {
        self.prompts.iter().find(|p| p.name == name)
    }

    /// First tool with the given name
    #[must_use]
    pub fn tool(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.name == name)
    }
}

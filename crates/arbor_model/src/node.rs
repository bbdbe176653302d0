//! Workflow nodes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of work a node declares
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Free-form task described by its goal
    #[default]
    Task,
    /// Invokes a module
    Module,
    /// Invokes a tool
    Tool,
    /// Runs another workflow of the same agent
    Subworkflow,
}

impl NodeType {
    /// Whether nodes of this type must carry a reference
    #[must_use]
    pub fn requires_reference(self) -> bool {
        !matches!(self, Self::Task)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Task => "task",
            Self::Module => "module",
            Self::Tool => "tool",
            Self::Subworkflow => "subworkflow",
        };
        f.write_str(s)
    }
}

/// Smallest unit of declared work within a workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) goal: String,
    pub(crate) description: Option<String>,
    pub(crate) node_type: NodeType,
    pub(crate) reference: Option<String>,
    pub(crate) depends_on: Vec<String>,
    pub(crate) inputs: Vec<String>,
    pub(crate) outputs: Vec<String>,
}

impl Node {
    /// Node name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// What this node is meant to achieve
    #[must_use]
    pub fn goal(&self) -> &str {
        &self.goal
    }

    /// Free-text description
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Node type, which decides what `reference` resolves against
    #[must_use]
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Name of the module, tool or workflow this node invokes
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Sibling nodes this node depends on, in declaration order
    #[must_use]
    pub fn depends_on(&self) -> &[String] {
        &self.depends_on
    }

    /// Names of values the node consumes
    #[must_use]
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    /// Names of values the node produces
    #[must_use]
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }
}

//! ARBOR Definition Model
//!
//! Immutable value types describing a task-oriented agent, and the
//! fluent builders that are the only way to construct them.
//!
//! Builders check required fields only. Cross-entity invariants
//! (uniqueness, references, cycles) need the assembled graph and are
//! left to `arbor_rules`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod agent;
pub mod builder;
pub mod capability;
pub mod criteria;
pub mod node;
pub mod prompt;
pub mod schema;
pub mod workflow;

pub use agent::{AgentDefinition, AgentType};
pub use builder::{
    AgentBuilder, CompletionCriteriaBuilder, ModuleBuilder, NodeBuilder, PromptBuilder,
    ToolBuilder, WorkflowBuilder,
};
pub use capability::{Module, Tool};
pub use criteria::CompletionCriteria;
pub use node::{Node, NodeType};
pub use prompt::Prompt;
pub use schema::Schema;
pub use workflow::{Edge, Workflow};

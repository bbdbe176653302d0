//! Serialized document layout.
//!
//! Field declaration order is the key order of the emitted YAML. Fields
//! the builders require are `Option` here so that a document missing one
//! fails in the builder with `MissingField`, not in the parser.

use arbor_core::DefinitionResult;
use arbor_model::{
    AgentBuilder, AgentDefinition, AgentType, CompletionCriteria, CompletionCriteriaBuilder,
    Module, ModuleBuilder, Node, NodeBuilder, NodeType, Prompt, PromptBuilder, Schema, Tool,
    ToolBuilder, Workflow, WorkflowBuilder,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

fn schema_value(schema: Option<&Schema>) -> Option<Value> {
    schema.map(|s| s.as_value().clone())
}

/// A present key is always a schema, even when its value is `null`
fn present_schema<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

/// Apply an optional value to a builder
fn set<B>(builder: B, value: Option<String>, apply: impl FnOnce(B, String) -> B) -> B {
    match value {
        Some(value) => apply(builder, value),
        None => builder,
    }
}

/// Top-level document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub agent_type: AgentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_criteria: Option<CriteriaDocument>,
    #[serde(
        default,
        deserialize_with = "present_schema",
        skip_serializing_if = "Option::is_none"
    )]
    pub input_schema: Option<Value>,
    #[serde(
        default,
        deserialize_with = "present_schema",
        skip_serializing_if = "Option::is_none"
    )]
    pub output_schema: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub workflows: Vec<WorkflowDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<CapabilityDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prompts: Vec<PromptDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<CapabilityDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CriteriaDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkflowDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_node: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<NodeDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<String>,
}

/// Modules and tools share one layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CapabilityDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "present_schema",
        skip_serializing_if = "Option::is_none"
    )]
    pub input_schema: Option<Value>,
    #[serde(
        default,
        deserialize_with = "present_schema",
        skip_serializing_if = "Option::is_none"
    )]
    pub output_schema: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromptDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<String>,
}

impl From<&AgentDefinition> for AgentDocument {
    fn from(agent: &AgentDefinition) -> Self {
        Self {
            name: Some(agent.name().to_string()),
            version: Some(agent.version().to_string()),
            description: non_empty(agent.description()),
            agent_type: agent.agent_type(),
            task_goal: agent.task_goal().map(str::to_string),
            completion_criteria: agent.completion_criteria().map(CriteriaDocument::from),
            input_schema: schema_value(agent.input_schema()),
            output_schema: schema_value(agent.output_schema()),
            workflows: agent.workflows().iter().map(WorkflowDocument::from).collect(),
            modules: agent.modules().iter().map(CapabilityDocument::from).collect(),
            prompts: agent.prompts().iter().map(PromptDocument::from).collect(),
            tools: agent.tools().iter().map(CapabilityDocument::from).collect(),
        }
    }
}

impl From<&CompletionCriteria> for CriteriaDocument {
    fn from(criteria: &CompletionCriteria) -> Self {
        Self {
            success: Some(criteria.success().to_string()),
            failure: Some(criteria.failure().to_string()),
        }
    }
}

impl From<&Workflow> for WorkflowDocument {
    fn from(workflow: &Workflow) -> Self {
        Self {
            name: Some(workflow.name().to_string()),
            description: non_empty(workflow.description()),
            entry_node: Some(workflow.entry_node().to_string()),
            nodes: workflow.nodes().iter().map(NodeDocument::from).collect(),
        }
    }
}

impl From<&Node> for NodeDocument {
    fn from(node: &Node) -> Self {
        Self {
            name: Some(node.name().to_string()),
            goal: Some(node.goal().to_string()),
            description: node.description().map(str::to_string),
            node_type: node.node_type(),
            reference: node.reference().map(str::to_string),
            depends_on: node.depends_on().to_vec(),
            inputs: node.inputs().to_vec(),
            outputs: node.outputs().to_vec(),
        }
    }
}

impl From<&Module> for CapabilityDocument {
    fn from(module: &Module) -> Self {
        Self {
            name: Some(module.name().to_string()),
            description: non_empty(module.description()),
            input_schema: schema_value(module.input_schema()),
            output_schema: schema_value(module.output_schema()),
        }
    }
}

impl From<&Tool> for CapabilityDocument {
    fn from(tool: &Tool) -> Self {
        Self {
            name: Some(tool.name().to_string()),
            description: non_empty(tool.description()),
            input_schema: schema_value(tool.input_schema()),
            output_schema: schema_value(tool.output_schema()),
        }
    }
}

impl From<&Prompt> for PromptDocument {
    fn from(prompt: &Prompt) -> Self {
        Self {
            name: Some(prompt.name().to_string()),
            description: non_empty(prompt.description()),
            template: Some(prompt.template().to_string()),
            variables: prompt.variables().to_vec(),
        }
    }
}

impl AgentDocument {
    /// Rebuild the entity graph through the builders
    ///
    /// # Errors
    ///
    /// Returns the first `MissingField` any builder reports
    pub fn into_definition(self) -> DefinitionResult<AgentDefinition> {
        let mut builder = AgentBuilder::default().agent_type(self.agent_type);
        builder = set(builder, self.name, AgentBuilder::name);
        builder = set(builder, self.version, AgentBuilder::version);
        builder = set(builder, self.description, AgentBuilder::description);
        builder = set(builder, self.task_goal, AgentBuilder::task_goal);

        if let Some(criteria) = self.completion_criteria {
            builder = builder.completion_criteria(criteria.into_criteria()?);
        }
        if let Some(schema) = self.input_schema {
            builder = builder.input_schema(schema);
        }
        if let Some(schema) = self.output_schema {
            builder = builder.output_schema(schema);
        }

        for workflow in self.workflows {
            builder = builder.add_workflow(workflow.into_workflow()?);
        }
        for module in self.modules {
            builder = builder.add_module(module.into_module()?);
        }
        for prompt in self.prompts {
            builder = builder.add_prompt(prompt.into_prompt()?);
        }
        for tool in self.tools {
            builder = builder.add_tool(tool.into_tool()?);
        }

        builder.build()
    }
}

impl CriteriaDocument {
    fn into_criteria(self) -> DefinitionResult<CompletionCriteria> {
        let mut builder = CompletionCriteriaBuilder::new();
        builder = set(builder, self.success, CompletionCriteriaBuilder::success);
        builder = set(builder, self.failure, CompletionCriteriaBuilder::failure);
        builder.build()
    }
}

impl WorkflowDocument {
    fn into_workflow(self) -> DefinitionResult<Workflow> {
        let mut builder = WorkflowBuilder::default();
        builder = set(builder, self.name, WorkflowBuilder::name);
        builder = set(builder, self.description, WorkflowBuilder::description);
        builder = set(builder, self.entry_node, WorkflowBuilder::entry_node);
        for node in self.nodes {
            builder = builder.add_node(node.into_node()?);
        }
        builder.build()
    }
}

impl NodeDocument {
    fn into_node(self) -> DefinitionResult<Node> {
        let mut builder = NodeBuilder::default()
            .node_type(self.node_type)
            .inputs(self.inputs)
            .outputs(self.outputs);
        builder = set(builder, self.name, NodeBuilder::name);
        builder = set(builder, self.goal, NodeBuilder::goal);
        builder = set(builder, self.description, NodeBuilder::description);
        builder = set(builder, self.reference, NodeBuilder::reference);
        for dep in self.depends_on {
            builder = builder.depends_on(dep);
        }
        builder.build()
    }
}

impl CapabilityDocument {
    fn into_module(self) -> DefinitionResult<Module> {
        let mut builder = ModuleBuilder::default();
        builder = set(builder, self.name, ModuleBuilder::name);
        builder = set(builder, self.description, ModuleBuilder::description);
        if let Some(schema) = self.input_schema {
            builder = builder.input_schema(schema);
        }
        if let Some(schema) = self.output_schema {
            builder = builder.output_schema(schema);
        }
        builder.build()
    }

    fn into_tool(self) -> DefinitionResult<Tool> {
        let mut builder = ToolBuilder::default();
        builder = set(builder, self.name, ToolBuilder::name);
        builder = set(builder, self.description, ToolBuilder::description);
        if let Some(schema) = self.input_schema {
            builder = builder.input_schema(schema);
        }
        if let Some(schema) = self.output_schema {
            builder = builder.output_schema(schema);
        }
        builder.build()
    }
}

impl PromptDocument {
    fn into_prompt(self) -> DefinitionResult<Prompt> {
        let mut builder = PromptBuilder::default().variables(self.variables);
        builder = set(builder, self.name, PromptBuilder::name);
        builder = set(builder, self.description, PromptBuilder::description);
        builder = set(builder, self.template, PromptBuilder::template);
        builder.build()
    }
}

//! Fluent builders for every entity type.
//!
//! Each builder stages optional fields and checks only its own required
//! fields on `build()`. A builder is a single-use, single-threaded
//! staging object: build one entity with it and drop it.

use crate::agent::{AgentDefinition, AgentType};
use crate::capability::{Module, Tool};
use crate::criteria::CompletionCriteria;
use crate::node::{Node, NodeType};
use crate::prompt::Prompt;
use crate::schema::Schema;
use crate::workflow::Workflow;
use arbor_core::{DefinitionError, DefinitionResult};
use serde_json::Value;

fn require(field: Option<String>, name: &str, builder: &str) -> DefinitionResult<String> {
    field.ok_or_else(|| DefinitionError::missing_field(name, builder))
}

/// Builder for [`AgentDefinition`]
#[derive(Debug, Clone, Default)]
pub struct AgentBuilder {
    name: Option<String>,
    version: Option<String>,
    description: Option<String>,
    agent_type: AgentType,
    task_goal: Option<String>,
    completion_criteria: Option<CompletionCriteria>,
    input_schema: Option<Schema>,
    output_schema: Option<Schema>,
    workflows: Vec<Workflow>,
    modules: Vec<Module>,
    prompts: Vec<Prompt>,
    tools: Vec<Tool>,
}

impl AgentBuilder {
    /// Start building an agent with the given name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::default().name(name)
    }

    /// Set the name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the version string
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the agent kind
    #[must_use]
    pub fn agent_type(mut self, agent_type: AgentType) -> Self {
        self.agent_type = agent_type;
        self
    }

    /// Set the overall goal
    #[must_use]
    pub fn task_goal(mut self, goal: impl Into<String>) -> Self {
        self.task_goal = Some(goal.into());
        self
    }

    /// Attach completion criteria
    #[must_use]
    pub fn completion_criteria(mut self, criteria: CompletionCriteria) -> Self {
        self.completion_criteria = Some(criteria);
        self
    }

    /// Set the input schema
    #[must_use]
    pub fn input_schema(mut self, schema: Value) -> Self {
        self.input_schema = Some(Schema::new(schema));
        self
    }

    /// Set the output schema
    #[must_use]
    pub fn output_schema(mut self, schema: Value) -> Self {
        self.output_schema = Some(Schema::new(schema));
        self
    }

    /// Append a workflow
    #[must_use]
    pub fn add_workflow(mut self, workflow: Workflow) -> Self {
        self.workflows.push(workflow);
        self
    }

    /// Append a module
    #[must_use]
    pub fn add_module(mut self, module: Module) -> Self {
        self.modules.push(module);
        self
    }

    /// Append a prompt
    #[must_use]
    pub fn add_prompt(mut self, prompt: Prompt) -> Self {
        self.prompts.push(prompt);
        self
    }

    /// Append a tool
    #[must_use]
    pub fn add_tool(mut self, tool: Tool) -> Self {
        self.tools.push(tool);
        self
    }

    /// Finalize the agent
    ///
    /// # Errors
    ///
    /// Returns `MissingField` if `name` or `version` is unset
    pub fn build(self) -> DefinitionResult<AgentDefinition> {
        Ok(AgentDefinition {
            name: require(self.name, "name", "AgentBuilder")?,
            version: require(self.version, "version", "AgentBuilder")?,
            description: self.description.unwrap_or_default(),
            agent_type: self.agent_type,
            task_goal: self.task_goal,
            completion_criteria: self.completion_criteria,
            input_schema: self.input_schema,
            output_schema: self.output_schema,
            workflows: self.workflows,
            modules: self.modules,
            prompts: self.prompts,
            tools: self.tools,
        })
    }
}

/// Builder for [`Workflow`]
#[derive(Debug, Clone, Default)]
pub struct WorkflowBuilder {
    name: Option<String>,
    description: Option<String>,
    entry_node: Option<String>,
    nodes: Vec<Node>,
}

impl WorkflowBuilder {
    /// Start building a workflow with the given name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::default().name(name)
    }

    /// Set the name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the entry node name
    #[must_use]
    pub fn entry_node(mut self, node: impl Into<String>) -> Self {
        self.entry_node = Some(node.into());
        self
    }

    /// Append a node; insertion order is kept through export
    #[must_use]
    pub fn add_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Finalize the workflow
    ///
    /// # Errors
    ///
    /// Returns `MissingField` if `name` or `entry_node` is unset
    pub fn build(self) -> DefinitionResult<Workflow> {
        Ok(Workflow {
            name: require(self.name, "name", "WorkflowBuilder")?,
            entry_node: require(self.entry_node, "entry_node", "WorkflowBuilder")?,
            description: self.description.unwrap_or_default(),
            nodes: self.nodes,
        })
    }
}

/// Builder for [`Node`]
#[derive(Debug, Clone, Default)]
pub struct NodeBuilder {
    name: Option<String>,
    goal: Option<String>,
    description: Option<String>,
    node_type: NodeType,
    reference: Option<String>,
    depends_on: Vec<String>,
    inputs: Vec<String>,
    outputs: Vec<String>,
}

impl NodeBuilder {
    /// Start building a node with the given name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::default().name(name)
    }

    /// Set the name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the goal
    #[must_use]
    pub fn goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(goal.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the node type
    #[must_use]
    pub fn node_type(mut self, node_type: NodeType) -> Self {
        self.node_type = node_type;
        self
    }

    /// Set the name this node refers to
    #[must_use]
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Invoke a module of the agent
    #[must_use]
    pub fn uses_module(self, module: impl Into<String>) -> Self {
        self.node_type(NodeType::Module).reference(module)
    }

    /// Invoke a tool of the agent
    #[must_use]
    pub fn uses_tool(self, tool: impl Into<String>) -> Self {
        self.node_type(NodeType::Tool).reference(tool)
    }

    /// Run another workflow of the agent
    #[must_use]
    pub fn runs_workflow(self, workflow: impl Into<String>) -> Self {
        self.node_type(NodeType::Subworkflow).reference(workflow)
    }

    /// Add one sibling dependency
    #[must_use]
    pub fn depends_on(mut self, node: impl Into<String>) -> Self {
        self.depends_on.push(node.into());
        self
    }

    /// Append input names
    #[must_use]
    pub fn inputs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs.extend(names.into_iter().map(Into::into));
        self
    }

    /// Append output names
    #[must_use]
    pub fn outputs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outputs.extend(names.into_iter().map(Into::into));
        self
    }

    /// Finalize the node
    ///
    /// # Errors
    ///
    /// Returns `MissingField` if `name` or `goal` is unset, or if a
    /// module/tool/subworkflow node has no `reference`
    pub fn build(self) -> DefinitionResult<Node> {
        let name = require(self.name, "name", "NodeBuilder")?;
        let goal = require(self.goal, "goal", "NodeBuilder")?;
        if self.node_type.requires_reference() && self.reference.is_none() {
            return Err(DefinitionError::missing_field("reference", "NodeBuilder"));
        }
        Ok(Node {
            name,
            goal,
            description: self.description,
            node_type: self.node_type,
            reference: self.reference,
            depends_on: self.depends_on,
            inputs: self.inputs,
            outputs: self.outputs,
        })
    }
}

/// Builder for [`Module`]
#[derive(Debug, Clone, Default)]
pub struct ModuleBuilder {
    name: Option<String>,
    description: Option<String>,
    input_schema: Option<Schema>,
    output_schema: Option<Schema>,
}

impl ModuleBuilder {
    /// Start building a module with the given name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::default().name(name)
    }

    /// Set the name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the input schema
    #[must_use]
    pub fn input_schema(mut self, schema: Value) -> Self {
        self.input_schema = Some(Schema::new(schema));
        self
    }

    /// Set the output schema
    #[must_use]
    pub fn output_schema(mut self, schema: Value) -> Self {
        self.output_schema = Some(Schema::new(schema));
        self
    }

    /// Finalize the module
    ///
    /// # Errors
    ///
    /// Returns `MissingField` if `name` is unset
    pub fn build(self) -> DefinitionResult<Module> {
        Ok(Module {
            name: require(self.name, "name", "ModuleBuilder")?,
            description: self.description.unwrap_or_default(),
            input_schema: self.input_schema,
            output_schema: self.output_schema,
        })
    }
}

/// Builder for [`Tool`]
#[derive(Debug, Clone, Default)]
pub struct ToolBuilder {
    name: Option<String>,
    description: Option<String>,
    input_schema: Option<Schema>,
    output_schema: Option<Schema>,
}

impl ToolBuilder {
    /// Start building a tool with the given name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::default().name(name)
    }

    /// Set the name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the input schema
    #[must_use]
    pub fn input_schema(mut self, schema: Value) -> Self {
        self.input_schema = Some(Schema::new(schema));
        self
    }

    /// Set the output schema
    #[must_use]
    pub fn output_schema(mut self, schema: Value) -> Self {
        self.output_schema = Some(Schema::new(schema));
        self
    }

    /// Finalize the tool
    ///
    /// # Errors
    ///
    /// Returns `MissingField` if `name` is unset
    pub fn build(self) -> DefinitionResult<Tool> {
        Ok(Tool {
            name: require(self.name, "name", "ToolBuilder")?,
            description: self.description.unwrap_or_default(),
            input_schema: self.input_schema,
            output_schema: self.output_schema,
        })
    }
}

/// Builder for [`Prompt`]
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    name: Option<String>,
    description: Option<String>,
    template: Option<String>,
    variables: Vec<String>,
}

impl PromptBuilder {
    /// Start building a prompt with the given name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::default().name(name)
    }

    /// Set the name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the template text
    #[must_use]
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Declare the placeholder names the template is expected to use
    #[must_use]
    pub fn variables<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variables.extend(names.into_iter().map(Into::into));
        self
    }

    /// Finalize the prompt
    ///
    /// # Errors
    ///
    /// Returns `MissingField` if `name` or `template` is unset
    pub fn build(self) -> DefinitionResult<Prompt> {
        Ok(Prompt {
            name: require(self.name, "name", "PromptBuilder")?,
            template: require(self.template, "template", "PromptBuilder")?,
            description: self.description.unwrap_or_default(),
            variables: self.variables,
        })
    }
}

/// Builder for [`CompletionCriteria`]
#[derive(Debug, Clone, Default)]
pub struct CompletionCriteriaBuilder {
    success: Option<String>,
    failure: Option<String>,
}

impl CompletionCriteriaBuilder {
    /// Start building empty criteria
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the success condition
    #[must_use]
    pub fn success(mut self, condition: impl Into<String>) -> Self {
        self.success = Some(condition.into());
        self
    }

    /// Set the failure condition
    #[must_use]
    pub fn failure(mut self, condition: impl Into<String>) -> Self {
        self.failure = Some(condition.into());
        self
    }

    /// Finalize the criteria
    ///
    /// # Errors
    ///
    /// Returns `MissingField` if either condition is unset
    pub fn build(self) -> DefinitionResult<CompletionCriteria> {
        Ok(CompletionCriteria {
            success: require(self.success, "success", "CompletionCriteriaBuilder")?,
            failure: require(self.failure, "failure", "CompletionCriteriaBuilder")?,
        })
    }
}

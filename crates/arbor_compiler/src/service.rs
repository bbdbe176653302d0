//! Compiler service: validate, then export.

use crate::config::CompilerConfig;
use arbor_export::{ExportResult, YamlExporter};
use arbor_model::AgentDefinition;
use arbor_rules::{RuleEngine, Severity, ValidationResult};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Outcome of a compile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    result: ValidationResult,
    output: Option<String>,
    output_path: Option<PathBuf>,
}

impl Compilation {
    /// Findings of the validation pass
    #[must_use]
    pub fn result(&self) -> &ValidationResult {
        &self.result
    }

    /// Rendered document, present only when validation allowed export
    #[must_use]
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// Where the document was written, for file compiles
    #[must_use]
    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    /// Check if a document was produced
    #[must_use]
    pub fn is_successful(&self) -> bool {
        self.output.is_some()
    }

    /// Take the validation result and output apart
    #[must_use]
    pub fn into_parts(self) -> (ValidationResult, Option<String>) {
        (self.result, self.output)
    }
}

/// Validates definitions and renders the ones that pass
///
/// Holds only configuration; a single compiler can serve any number of
/// definitions.
#[derive(Debug, Clone)]
pub struct Compiler {
    engine: RuleEngine,
    exporter: YamlExporter,
    strict: bool,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(&CompilerConfig::default())
    }
}

impl Compiler {
    /// Create a compiler from configuration
    #[must_use]
    pub fn new(config: &CompilerConfig) -> Self {
        Self {
            engine: config.rule_engine(),
            exporter: YamlExporter::new(),
            strict: config.strict,
        }
    }

    /// Whether warnings block export
    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Run every enabled rule
    #[must_use]
    pub fn validate(&self, agent: &AgentDefinition) -> ValidationResult {
        self.engine.validate(agent)
    }

    /// Render without validating
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Serialize` if rendering fails
    pub fn export(&self, agent: &AgentDefinition) -> ExportResult<String> {
        self.exporter.export(agent)
    }

    /// Render and write without validating
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if rendering or writing fails
    pub fn export_to_file(&self, agent: &AgentDefinition, path: &Path) -> ExportResult<()> {
        let content = self.exporter.export(agent)?;
        self.exporter.write(&content, path)
    }

    /// Validate, and render only if the result allows it
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Serialize` if rendering fails
    pub fn compile(&self, agent: &AgentDefinition) -> ExportResult<Compilation> {
        let result = self.validate(agent);
        let output = if result.is_usable(self.strict) {
            Some(self.exporter.export(agent)?)
        } else {
            warn!(
                agent = agent.name(),
                errors = result.count(Severity::Error),
                warnings = result.count(Severity::Warning),
                strict = self.strict,
                "compile blocked"
            );
            None
        };

        info!(
            agent = agent.name(),
            findings = result.findings().len(),
            exported = output.is_some(),
            "compile finished"
        );
        Ok(Compilation {
            result,
            output,
            output_path: None,
        })
    }

    /// Compile and write the document when one was produced
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if rendering or writing fails
    pub fn compile_to_file(&self, agent: &AgentDefinition, path: &Path) -> ExportResult<Compilation> {
        let mut compilation = self.compile(agent)?;
        if let Some(content) = &compilation.output {
            self.exporter.write(content, path)?;
            compilation.output_path = Some(path.to_path_buf());
        }
        Ok(compilation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_model::{AgentBuilder, NodeBuilder, WorkflowBuilder};
    use arbor_rules::Rule;

    fn agent(name: &str, nodes: Vec<arbor_model::Node>) -> AgentDefinition {
        let workflow = nodes
            .into_iter()
            .fold(WorkflowBuilder::new("main").entry_node("start"), |wf, n| wf.add_node(n))
            .build()
            .unwrap();
        AgentBuilder::new(name)
            .version("1.0.0")
            .description("Answers questions")
            .add_workflow(workflow)
            .build()
            .unwrap()
    }

    fn node(name: &str, deps: &[&str]) -> arbor_model::Node {
        deps.iter()
            .fold(NodeBuilder::new(name).goal("Answer"), |b, d| b.depends_on(*d))
            .build()
            .unwrap()
    }

    fn valid() -> AgentDefinition {
        agent("helper", vec![node("start", &[]), node("finish", &["start"])])
    }

    /// Valid apart from one unreachable node
    fn with_warning() -> AgentDefinition {
        agent("helper", vec![node("start", &[]), node("orphan", &[])])
    }

    fn invalid() -> AgentDefinition {
        agent("helper", vec![node("start", &["ghost"])])
    }

    #[test]
    fn test_compile_valid() {
        let compilation = Compiler::default().compile(&valid()).unwrap();
        assert!(compilation.is_successful());
        assert!(compilation.result().is_empty());
        assert!(compilation.output().unwrap().contains("name: helper"));
    }

    #[test]
    fn test_compile_twice_is_identical() {
        let compiler = Compiler::default();
        let first = compiler.compile(&valid()).unwrap();
        let second = compiler.compile(&valid()).unwrap();
        assert_eq!(first.output(), second.output());
    }

    #[test]
    fn test_errors_block_output() {
        let compilation = Compiler::default().compile(&invalid()).unwrap();
        assert!(!compilation.is_successful());
        assert!(!compilation.result().is_valid());
    }

    #[test]
    fn test_warnings_do_not_block() {
        let compilation = Compiler::default().compile(&with_warning()).unwrap();
        assert!(compilation.is_successful());
        assert_eq!(compilation.result().count(Severity::Warning), 1);
    }

    #[test]
    fn test_strict_mode_blocks_warnings() {
        let compiler = Compiler::new(&CompilerConfig::default().with_strict(true));
        assert!(compiler.is_strict());
        let compilation = compiler.compile(&with_warning()).unwrap();
        assert!(!compilation.is_successful());
        assert!(compilation.result().is_valid());
    }

    #[test]
    fn test_disabled_rule_unblocks_strict() {
        let config = CompilerConfig::default()
            .with_strict(true)
            .with_disabled_rule(Rule::Reachability);
        let compilation = Compiler::new(&config).compile(&with_warning()).unwrap();
        assert!(compilation.is_successful());
    }

    #[test]
    fn test_validate_does_not_mutate() {
        let agent = invalid();
        let before = agent.clone();
        let _ = Compiler::default().validate(&agent);
        assert_eq!(agent, before);
    }

    #[test]
    fn test_export_skips_validation() {
        let text = Compiler::default().export(&invalid()).unwrap();
        assert!(text.contains("ghost"));
    }

    #[test]
    fn test_compile_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = Compiler::default();

        let out = dir.path().join("out").join("helper.yaml");
        let compilation = compiler.compile_to_file(&valid(), &out).unwrap();
        assert_eq!(compilation.output_path(), Some(out.as_path()));
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            compilation.output().unwrap()
        );

        let blocked = dir.path().join("blocked.yaml");
        let compilation = compiler.compile_to_file(&invalid(), &blocked).unwrap();
        assert!(compilation.output_path().is_none());
        assert!(!blocked.exists());
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.yaml");
        Compiler::default().export_to_file(&invalid(), &path).unwrap();
        let loaded = arbor_export::load_file(&path).unwrap();
        assert_eq!(loaded, invalid());
    }
}

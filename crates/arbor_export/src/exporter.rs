//! YAML exporter.

use crate::document::AgentDocument;
use arbor_model::AgentDefinition;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Comment block placed at the top of every exported document
pub const ADVISORY_HEADER: &str = concat!(
    "# Generated by arbor ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "# This document describes an agent. It does not execute one.\n",
    "# Submit it to the platform for review; do not edit by hand.\n",
);

/// Export failure
#[derive(Debug, Error)]
pub enum ExportError {
    /// Document could not be serialized
    #[error("Failed to serialize definition: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// Output could not be written
    #[error("Failed to write {path}: {source}")]
    Io {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Renders agent definitions as YAML documents
///
/// Output depends only on the definition, so exporting the same
/// definition twice yields byte-identical text.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlExporter;

impl YamlExporter {
    /// Create an exporter
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Render a definition to YAML text, advisory header included
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Serialize` if serialization fails
    pub fn export(&self, agent: &AgentDefinition) -> ExportResult<String> {
        let body = serde_yaml::to_string(&AgentDocument::from(agent))?;
        debug!(agent = agent.name(), bytes = body.len(), "definition rendered");
        Ok(format!("{ADVISORY_HEADER}{body}"))
    }

    /// Write rendered text to `path`, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Io` if a directory or the file cannot be written
    pub fn write(&self, content: &str, path: &Path) -> ExportResult<()> {
        let io_error = |source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(path, content).map_err(io_error)?;
        debug!(path = %path.display(), "definition written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_model::{
        AgentBuilder, CompletionCriteriaBuilder, ModuleBuilder, NodeBuilder, PromptBuilder,
        WorkflowBuilder,
    };
    use serde_json::json;

    fn sample() -> AgentDefinition {
        AgentBuilder::new("greeter")
            .version("1.0.0")
            .description("Generates personalized greetings")
            .task_goal("Greet the user")
            .completion_criteria(
                CompletionCriteriaBuilder::new()
                    .success("A greeting was produced")
                    .failure("No name was given")
                    .build()
                    .unwrap(),
            )
            .input_schema(json!({
                "type": "object",
                "required": ["user_name"],
                "properties": {"user_name": {"type": "string"}}
            }))
            .add_module(ModuleBuilder::new("formatter").description("Formats text").build().unwrap())
            .add_prompt(
                PromptBuilder::new("greeting")
                    .template("Hello {{user_name}}")
                    .variables(["user_name"])
                    .build()
                    .unwrap(),
            )
            .add_workflow(
                WorkflowBuilder::new("main")
                    .entry_node("greet")
                    .add_node(
                        NodeBuilder::new("greet")
                            .goal("Compose a greeting")
                            .uses_module("formatter")
                            .outputs(["greeting"])
                            .build()
                            .unwrap(),
                    )
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    fn key_position(text: &str, key: &str) -> usize {
        text.lines()
            .position(|l| l.starts_with(&format!("{key}:")))
            .unwrap_or_else(|| panic!("missing key {key}"))
    }

    #[test]
    fn test_header_comes_first() {
        let text = YamlExporter::new().export(&sample()).unwrap();
        assert!(text.starts_with("# Generated by arbor "));
        assert!(text.contains("does not execute"));
    }

    #[test]
    fn test_top_level_key_order() {
        let text = YamlExporter::new().export(&sample()).unwrap();
        let order = [
            "name",
            "version",
            "description",
            "agent_type",
            "task_goal",
            "completion_criteria",
            "input_schema",
            "workflows",
            "modules",
            "prompts",
        ];
        let positions: Vec<_> = order.iter().map(|k| key_position(&text, k)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{text}");
    }

    #[test]
    fn test_empty_fields_are_omitted() {
        let agent = AgentBuilder::new("bare").version("0.1.0").build().unwrap();
        let text = YamlExporter::new().export(&agent).unwrap();
        for key in ["description", "task_goal", "input_schema", "workflows", "tools"] {
            assert!(!text.lines().any(|l| l.starts_with(&format!("{key}:"))), "{key}");
        }
        assert!(text.contains("agent_type: atomic"));
    }

    #[test]
    fn test_node_keys() {
        let text = YamlExporter::new().export(&sample()).unwrap();
        assert!(text.contains("type: module"));
        assert!(text.contains("reference: formatter"));
        let goal = text.find("goal: Compose a greeting").unwrap();
        let ty = text.find("type: module").unwrap();
        assert!(goal < ty);
    }

    #[test]
    fn test_schema_keys_are_sorted() {
        let text = YamlExporter::new().export(&sample()).unwrap();
        let props = text.find("  properties:").unwrap();
        let required = text.find("  required:").unwrap();
        let ty = text.find("  type: object").unwrap();
        assert!(props < required && required < ty);
    }

    #[test]
    fn test_export_is_deterministic() {
        let exporter = YamlExporter::new();
        let first = exporter.export(&sample()).unwrap();
        assert_eq!(first, exporter.export(&sample()).unwrap());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("agent.yaml");
        YamlExporter::new().write("name: x\n", &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "name: x\n");
    }

    #[test]
    fn test_write_failure_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();
        let err = YamlExporter::new()
            .write("x", &blocker.join("agent.yaml"))
            .unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}

//! Loading exported documents back into the entity model.

use crate::document::AgentDocument;
use arbor_core::DefinitionError;
use arbor_model::AgentDefinition;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Load failure
#[derive(Debug, Error)]
pub enum LoadError {
    /// Input could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Source path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Input is not a valid definition document
    #[error("Failed to parse definition: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A builder rejected the document
    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

/// Parse document text; comment lines are ignored
///
/// # Errors
///
/// Returns `LoadError::Parse` for malformed YAML or unknown keys, and
/// `LoadError::Definition` when a required field is missing
pub fn load_str(text: &str) -> Result<AgentDefinition, LoadError> {
    let document: AgentDocument = serde_yaml::from_str(text)?;
    let agent = document.into_definition()?;
    debug!(agent = agent.name(), "definition loaded");
    Ok(agent)
}

/// Read and parse a document file
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be read, otherwise as
/// [`load_str`]
pub fn load_file(path: &Path) -> Result<AgentDefinition, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_str(&text)
}

//! ARBOR Exporter
//!
//! Deterministic YAML rendering of agent definitions, and the loader
//! that reads the same document format back through the builders.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod document;
pub mod exporter;
pub mod loader;

pub use exporter::{ADVISORY_HEADER, ExportError, ExportResult, YamlExporter};
pub use loader::{LoadError, load_file, load_str};

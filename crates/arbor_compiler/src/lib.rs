//! ARBOR Compiler
//!
//! The service that ties the rule engine to the exporter: validate a
//! definition, and render it only when the findings allow.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod service;

pub use config::{CompilerConfig, ConfigError};
pub use service::{Compilation, Compiler};

pub use arbor_export::{ExportError, ExportResult, LoadError, load_file, load_str};
pub use arbor_rules::{Finding, Rule, Severity, ValidationResult};

//! Command implementations and exit status mapping.

use crate::report::{Format, Report};
use arbor_compiler::{
    Compiler, CompilerConfig, ConfigError, ExportError, Finding, LoadError, ValidationResult,
    load_file,
};
use arbor_core::DefinitionError;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

/// Definition valid, or compiled
pub const EXIT_OK: u8 = 0;
/// Definition has blocking findings
pub const EXIT_INVALID: u8 = 1;
/// Input, output or config file problem
pub const EXIT_FILE: u8 = 2;

/// Failure of a command before a report could be produced
#[derive(Debug, Error)]
pub enum CommandError {
    /// Input could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Output could not be written
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Report could not be written
    #[error("Failed to write report: {0}")]
    Io(#[from] io::Error),
}

impl CommandError {
    /// Process exit status for this failure
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Load(LoadError::Definition(_)) => EXIT_INVALID,
            _ => EXIT_FILE,
        }
    }
}

/// Effective configuration: the file at `path` if given, then flag overrides
///
/// # Errors
///
/// Returns `CommandError::Config` if the file cannot be read or parsed
pub fn load_config(path: Option<&Path>, strict: bool) -> Result<CompilerConfig, CommandError> {
    let config = match path {
        Some(path) => CompilerConfig::from_file(path)?,
        None => CompilerConfig::default(),
    };
    // The flag can only switch strict mode on.
    Ok(if strict { config.with_strict(true) } else { config })
}

/// A configured compiler plus output format
#[derive(Debug, Clone)]
pub struct Session {
    compiler: Compiler,
    format: Format,
    strict: bool,
}

impl Session {
    /// Create a session from configuration
    #[must_use]
    pub fn new(config: &CompilerConfig, format: Format) -> Self {
        Self {
            compiler: Compiler::new(config),
            format,
            strict: config.strict,
        }
    }

    /// Validate `file` and report the findings
    ///
    /// # Errors
    ///
    /// Returns `CommandError` if the file cannot be loaded or the report
    /// cannot be written
    pub fn validate(&self, file: &Path, out: &mut impl Write) -> Result<u8, CommandError> {
        let agent = load_file(file)?;
        let result = self.compiler.validate(&agent);
        Report::new(file, &result, self.strict).write(self.format, out)?;
        Ok(if result.is_usable(self.strict) {
            EXIT_OK
        } else {
            EXIT_INVALID
        })
    }

    /// Compile `file` into `output` and report the findings
    ///
    /// # Errors
    ///
    /// Returns `CommandError` if the file cannot be loaded, the output
    /// cannot be written, or the report cannot be written
    pub fn compile(
        &self,
        file: &Path,
        output: &Path,
        out: &mut impl Write,
    ) -> Result<u8, CommandError> {
        let agent = load_file(file)?;
        let compilation = self.compiler.compile_to_file(&agent, output)?;
        Report::new(file, compilation.result(), self.strict)
            .with_output(compilation.output_path())
            .write(self.format, out)?;
        Ok(if compilation.is_successful() {
            EXIT_OK
        } else {
            EXIT_INVALID
        })
    }

    /// Report a builder rejection found while loading as a finding
    ///
    /// # Errors
    ///
    /// Returns an I/O error if `out` cannot be written
    pub fn report_definition_error(
        &self,
        file: &Path,
        error: DefinitionError,
        out: &mut impl Write,
    ) -> io::Result<()> {
        let result = ValidationResult::new(vec![Finding::error("document", error)]);
        Report::new(file, &result, self.strict).write(self.format, out)
    }
}

//! Finding output in text and JSON form.

use arbor_compiler::{Finding, Severity, ValidationResult};
use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One line per finding plus a summary
    #[default]
    Text,
    /// A single JSON object
    Json,
}

/// What one command run found
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    file: &'a Path,
    valid: bool,
    blocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<&'a Path>,
    findings: &'a [Finding],
}

impl<'a> Report<'a> {
    /// Report over a validation result
    #[must_use]
    pub fn new(file: &'a Path, result: &'a ValidationResult, strict: bool) -> Self {
        Self {
            file,
            valid: result.is_valid(),
            blocked: !result.is_usable(strict),
            output: None,
            findings: result.findings(),
        }
    }

    /// Record where the compiled document went
    #[must_use]
    pub fn with_output(mut self, output: Option<&'a Path>) -> Self {
        self.output = output;
        self
    }

    fn count(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }

    /// Write the report
    ///
    /// # Errors
    ///
    /// Returns an I/O error if `out` cannot be written
    pub fn write(&self, format: Format, out: &mut impl Write) -> io::Result<()> {
        match format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *out, self)?;
                writeln!(out)
            }
            Format::Text => {
                for finding in self.findings {
                    writeln!(out, "{finding}")?;
                }
                writeln!(
                    out,
                    "{}: {} error(s), {} warning(s), {} info",
                    self.file.display(),
                    self.count(Severity::Error),
                    self.count(Severity::Warning),
                    self.count(Severity::Info),
                )?;
                if let Some(path) = self.output {
                    writeln!(out, "wrote {}", path.display())?;
                } else if self.blocked {
                    writeln!(out, "blocked")?;
                }
                Ok(())
            }
        }
    }
}

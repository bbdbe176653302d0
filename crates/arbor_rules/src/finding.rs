//! Validation findings and the aggregated result.

use arbor_core::DefinitionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How much a finding matters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only
    Info,
    /// Likely authoring mistake, never blocks export on its own
    Warning,
    /// Definition is unusable
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// One structured validation item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Severity
    pub severity: Severity,
    /// Location inside the definition, e.g. `workflows[0].nodes[1].reference`
    pub path: String,
    /// Rendered message
    pub message: String,
    /// Structured kind
    pub error: DefinitionError,
}

impl Finding {
    /// Create a finding with explicit severity
    #[must_use]
    pub fn new(severity: Severity, path: impl Into<String>, error: DefinitionError) -> Self {
        Self {
            severity,
            path: path.into(),
            message: error.to_string(),
            error,
        }
    }

    /// Create an error finding
    #[must_use]
    pub fn error(path: impl Into<String>, error: DefinitionError) -> Self {
        Self::new(Severity::Error, path, error)
    }

    /// Create a warning finding
    #[must_use]
    pub fn warning(path: impl Into<String>, error: DefinitionError) -> Self {
        Self::new(Severity::Warning, path, error)
    }

    /// Create an info finding
    #[must_use]
    pub fn info(path: impl Into<String>, error: DefinitionError) -> Self {
        Self::new(Severity::Info, path, error)
    }

    /// Stable code of the underlying kind
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.error.code()
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}: {}", self.severity, self.code(), self.path, self.message)
    }
}

/// All findings from one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    findings: Vec<Finding>,
}

impl ValidationResult {
    /// Wrap a list of findings
    #[must_use]
    pub fn new(findings: Vec<Finding>) -> Self {
        Self { findings }
    }

    /// Every finding, in the order rules produced them
    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Whether no error finding is present
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    /// Whether the definition may be exported
    ///
    /// In strict mode warnings block as well; info never blocks.
    #[must_use]
    pub fn is_usable(&self, strict: bool) -> bool {
        if strict {
            self.is_valid() && !self.has_warnings()
        } else {
            self.is_valid()
        }
    }

    /// Whether any warning finding is present
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Warning)
    }

    /// Findings of the given severity
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }

    /// Error findings
    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.with_severity(Severity::Error)
    }

    /// Warning findings
    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.with_severity(Severity::Warning)
    }

    /// Number of findings of the given severity
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.with_severity(severity).count()
    }

    /// Check if there are no findings at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

//! Prompt templates.

use once_cell::sync::Lazy;
use regex::Regex;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([^{}\s]+)\s*\}\}").expect("placeholder pattern is valid"));

/// Named prompt template with `{{name}}` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) template: String,
    pub(crate) variables: Vec<String>,
}

impl Prompt {
    /// Prompt name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-text description
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Template text with `{{name}}` placeholders
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Declared variable names
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Placeholder names used in the template, first appearance first
    #[must_use]
    pub fn placeholders(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for cap in PLACEHOLDER.captures_iter(&self.template) {
            if let Some(m) = cap.get(1) {
                if !seen.contains(&m.as_str()) {
                    seen.push(m.as_str());
                }
            }
        }
        seen
    }
}

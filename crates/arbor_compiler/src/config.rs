//! Compiler configuration.

use arbor_rules::{DEFAULT_RESERVED_TERMS, Rule, RuleEngine};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration load failure
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// Config path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// File is not a valid configuration
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Compiler configuration
///
/// ```yaml
/// strict: true
/// disabled_rules: [reachability]
/// extra_reserved_terms: [ledger]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Treat warnings as blocking
    pub strict: bool,
    /// Rules that do not run
    pub disabled_rules: Vec<Rule>,
    /// Terms added to the reserved-term list
    pub extra_reserved_terms: Vec<String>,
    /// Replaces the default reserved-term list when set
    pub replace_reserved_terms: Option<Vec<String>>,
}

impl CompilerConfig {
    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed YAML, unknown keys or
    /// unknown rule names
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        // An empty file deserializes as null, not as an empty mapping.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Read configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise as
    /// [`CompilerConfig::from_yaml`]
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// Enable or disable strict mode
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Disable one rule
    #[must_use]
    pub fn with_disabled_rule(mut self, rule: Rule) -> Self {
        if !self.disabled_rules.contains(&rule) {
            self.disabled_rules.push(rule);
        }
        self
    }

    /// Add terms to the reserved-term list
    #[must_use]
    pub fn with_extra_reserved_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_reserved_terms.extend(terms.into_iter().map(Into::into));
        self
    }

    /// Replace the default reserved-term list
    #[must_use]
    pub fn with_reserved_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.replace_reserved_terms = Some(terms.into_iter().map(Into::into).collect());
        self
    }

    /// Build the rule engine this configuration describes
    #[must_use]
    pub fn rule_engine(&self) -> RuleEngine {
        let base: Vec<String> = match &self.replace_reserved_terms {
            Some(terms) => terms.clone(),
            None => DEFAULT_RESERVED_TERMS.iter().map(|t| t.to_string()).collect(),
        };
        let engine = RuleEngine::new()
            .with_reserved_terms(base)
            .with_extra_reserved_terms(self.extra_reserved_terms.iter().cloned());
        self.disabled_rules
            .iter()
            .fold(engine, |engine, &rule| engine.without_rule(rule))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CompilerConfig::default();
        assert!(!config.strict);
        let engine = config.rule_engine();
        assert!(Rule::ALL.iter().all(|&r| engine.is_enabled(r)));
        assert_eq!(engine.reserved_terms().len(), DEFAULT_RESERVED_TERMS.len());
    }

    #[test]
    fn test_from_yaml() {
        let config = CompilerConfig::from_yaml(
            "strict: true\ndisabled_rules: [reachability, empty_collections]\nextra_reserved_terms: [ledger]\n",
        )
        .unwrap();
        assert!(config.strict);
        assert_eq!(
            config.disabled_rules,
            vec![Rule::Reachability, Rule::EmptyCollections]
        );
        let engine = config.rule_engine();
        assert!(!engine.is_enabled(Rule::Reachability));
        assert!(engine.is_enabled(Rule::Cycles));
        assert!(engine.reserved_terms().contains(&"ledger".to_string()));
        assert!(engine.reserved_terms().contains(&"billing".to_string()));
    }

    #[test]
    fn test_replace_reserved_terms() {
        let config = CompilerConfig::default()
            .with_reserved_terms(["deploy"])
            .with_extra_reserved_terms(["ship"]);
        assert_eq!(
            config.rule_engine().reserved_terms(),
            &["deploy".to_string(), "ship".to_string()]
        );
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(CompilerConfig::from_yaml("  \n").unwrap(), CompilerConfig::default());
    }

    #[test]
    fn test_unknown_rule_is_rejected() {
        let err = CompilerConfig::from_yaml("disabled_rules: [spelling]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = CompilerConfig::from_file(Path::new("/nonexistent/arbor.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

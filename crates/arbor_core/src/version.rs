//! Semantic version grammar for agent definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Human-readable version grammar, used in findings
pub const SEMVER_PATTERN: &str = "MAJOR.MINOR.PATCH[-PRERELEASE]";

/// Semantic version with optional prerelease tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    /// Major version
    pub major: u64,
    /// Minor version
    pub minor: u64,
    /// Patch version
    pub patch: u64,
    /// Prerelease identifier, without the leading `-`
    pub pre: Option<String>,
}

impl Version {
    /// Create a new release version
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            pre: None,
        }
    }

    /// Parse from string
    ///
    /// # Errors
    ///
    /// Returns error if format is invalid
    pub fn parse(s: &str) -> Result<Self, VersionError> {
        let (core, pre) = match s.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (s, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionError::InvalidFormat(s.to_string()));
        }

        let major = parse_component(parts[0])?;
        let minor = parse_component(parts[1])?;
        let patch = parse_component(parts[2])?;

        let pre = match pre {
            Some(pre) => {
                let valid = pre.split('.').all(|ident| {
                    !ident.is_empty()
                        && ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
                });
                if !valid {
                    return Err(VersionError::InvalidPrerelease(pre.to_string()));
                }
                Some(pre.to_string())
            }
            None => None,
        };

        Ok(Self {
            major,
            minor,
            patch,
            pre,
        })
    }

    /// Whether this is a prerelease version
    #[must_use]
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some()
    }
}

/// Numeric component: ASCII digits only, no leading zeros
fn parse_component(part: &str) -> Result<u64, VersionError> {
    let digits_only = !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    let leading_zero = part.len() > 1 && part.starts_with('0');
    if !digits_only || leading_zero {
        return Err(VersionError::InvalidComponent(part.to_string()));
    }
    part.parse()
        .map_err(|_| VersionError::InvalidComponent(part.to_string()))
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Version-related errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    /// Invalid format
    #[error("Invalid version format: {0}")]
    InvalidFormat(String),
    /// Invalid numeric component
    #[error("Invalid version component: {0}")]
    InvalidComponent(String),
    /// Invalid prerelease tag
    #[error("Invalid prerelease tag: {0}")]
    InvalidPrerelease(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_version_parse() {
        let v = Version::parse("1.2.3").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
        assert!(!v.is_prerelease());
    }

    #[test]
    fn test_version_parse_prerelease() {
        let v = Version::parse("1.0.0-beta").unwrap();
        assert_eq!(v.pre.as_deref(), Some("beta"));

        let v = Version::parse("2.1.0-rc.1").unwrap();
        assert_eq!(v.pre.as_deref(), Some("rc.1"));
    }

    #[test]
    fn test_version_display() {
        assert_eq!(Version::new(1, 2, 3).to_string(), "1.2.3");
        assert_eq!(Version::parse("1.0.0-beta").unwrap().to_string(), "1.0.0-beta");
    }

    #[test]
    fn test_version_parse_error() {
        let result = Version::parse("1.0");
        assert!(matches!(result, Err(VersionError::InvalidFormat(_))));

        let result = Version::parse("a.b.c");
        assert!(matches!(result, Err(VersionError::InvalidComponent(_))));

        let result = Version::parse("01.0.0");
        assert!(matches!(result, Err(VersionError::InvalidComponent(_))));

        let result = Version::parse("+1.0.0");
        assert!(matches!(result, Err(VersionError::InvalidComponent(_))));

        let result = Version::parse("1.0.0-");
        assert!(matches!(result, Err(VersionError::InvalidPrerelease(_))));

        let result = Version::parse("1.0.0-beta..1");
        assert!(matches!(result, Err(VersionError::InvalidPrerelease(_))));

        let result = Version::parse("1.0.0+build");
        assert!(result.is_err());
    }

    proptest::proptest! {
        #[test]
        fn prop_display_parse_roundtrip(
            major in 0u64..10_000,
            minor in 0u64..10_000,
            patch in 0u64..10_000,
            pre in proptest::option::of("[0-9A-Za-z-]{1,6}(\\.[0-9A-Za-z-]{1,6}){0,2}"),
        ) {
            let v = Version { major, minor, patch, pre };
            prop_assert_eq!(Version::parse(&v.to_string()), Ok(v));
        }
    }
}

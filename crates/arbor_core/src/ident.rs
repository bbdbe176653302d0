//! Identifier grammar.

use once_cell::sync::Lazy;
use regex::Regex;

/// Identifier pattern shared by every named entity
pub const IDENTIFIER_PATTERN: &str = "[A-Za-z_][A-Za-z0-9_-]*";

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^{IDENTIFIER_PATTERN}$")).expect("identifier pattern is valid")
});

/// Check whether `s` is a valid identifier
#[must_use]
pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER.is_match(s)
}

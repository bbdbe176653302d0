//! ARBOR Core Types
//!
//! Grammar checks and the definition error taxonomy shared by every
//! ARBOR crate. This crate performs no I/O.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod ident;
pub mod version;

// Re-exports
pub use error::{DefinitionError, DefinitionResult};
pub use ident::{IDENTIFIER_PATTERN, is_identifier};
pub use version::{SEMVER_PATTERN, Version, VersionError};

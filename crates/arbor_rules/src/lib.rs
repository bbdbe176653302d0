//! ARBOR Rule Engine
//!
//! Pure checks over a fully built agent definition. Every rule reports
//! into one aggregated `ValidationResult`; nothing here fails fast.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod boundary;
pub mod collections;
pub mod engine;
pub mod finding;
pub mod graph;
pub mod naming;
pub mod prompt;
pub mod reference;
pub mod schema;

pub use boundary::DEFAULT_RESERVED_TERMS;
pub use engine::{Rule, RuleEngine};
pub use finding::{Finding, Severity, ValidationResult};

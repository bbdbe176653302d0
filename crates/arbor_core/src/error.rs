//! Definition error taxonomy.
//!
//! Every problem found in an agent definition is one of these kinds,
//! whether it is raised by a builder or reported by the rule engine.
//! Infrastructure failures (file I/O, document parsing) live in their
//! own error types and are never folded into this enum.

use serde::Serialize;

/// Definition result type
pub type DefinitionResult<T> = Result<T, DefinitionError>;

/// Definition error kind
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DefinitionError {
    /// A builder was finalized without a required field
    #[error("Required field '{field}' is not set in {builder}")]
    MissingField {
        /// Field name
        field: String,
        /// Builder type name
        builder: String,
    },

    /// A value does not match its expected grammar
    #[error("Invalid {field} '{value}': expected {expected}")]
    InvalidFormat {
        /// Field that holds the value
        field: String,
        /// Offending value
        value: String,
        /// Expected pattern or shape
        expected: String,
    },

    /// A name reference does not resolve
    #[error("'{origin}' references undefined '{target}'")]
    Reference {
        /// Referring entity
        origin: String,
        /// Name that failed to resolve
        target: String,
    },

    /// Two entities share a name within one scope
    #[error("Duplicate name '{name}' in {scope}")]
    Duplicate {
        /// Collection scope, e.g. `workflow 'main' nodes`
        scope: String,
        /// Duplicated name
        name: String,
    },

    /// A collection that should hold entries is empty
    #[error("{parent} has no {collection}")]
    EmptyCollection {
        /// Collection name
        collection: String,
        /// Owning entity
        parent: String,
    },

    /// Node dependencies loop back on themselves
    #[error("Cyclic dependency in workflow '{workflow}': {}", path.join(" -> "))]
    CyclicDependency {
        /// Workflow name
        workflow: String,
        /// Cycle path, first node repeated at the end
        path: Vec<String>,
    },

    /// Node cannot be reached from the workflow entry
    #[error("Node '{node}' in workflow '{workflow}' is unreachable from the entry node")]
    UnreachableNode {
        /// Workflow name
        workflow: String,
        /// Node name
        node: String,
    },

    /// Declared entity that nothing uses
    #[error("{owner} declares '{name}' but nothing uses it")]
    UnusedDeclaration {
        /// Declaring entity
        owner: String,
        /// Unused name
        name: String,
    },

    /// Text contains a term reserved for execution platforms
    #[error("{location} contains reserved term '{term}'")]
    ReservedTerm {
        /// Where the term was found
        location: String,
        /// Matched term
        term: String,
    },
}

impl DefinitionError {
    /// Stable machine-readable code for this kind
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "MISSING_FIELD",
            Self::InvalidFormat { .. } => "INVALID_FORMAT",
            Self::Reference { .. } => "INVALID_REFERENCE",
            Self::Duplicate { .. } => "DUPLICATE_NAME",
            Self::EmptyCollection { .. } => "EMPTY_COLLECTION",
            Self::CyclicDependency { .. } => "CYCLIC_DEPENDENCY",
            Self::UnreachableNode { .. } => "UNREACHABLE_NODE",
            Self::UnusedDeclaration { .. } => "UNUSED_DECLARATION",
            Self::ReservedTerm { .. } => "RESERVED_TERM",
        }
    }

    /// Create a missing field error
    #[must_use]
    pub fn missing_field(field: &str, builder: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
            builder: builder.to_string(),
        }
    }

    /// Create an invalid format error
    #[must_use]
    pub fn invalid_format(field: &str, value: &str, expected: &str) -> Self {
        Self::InvalidFormat {
            field: field.to_string(),
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Create a reference error
    #[must_use]
    pub fn reference(origin: &str, target: &str) -> Self {
        Self::Reference {
            origin: origin.to_string(),
            target: target.to_string(),
        }
    }
}

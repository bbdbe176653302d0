//! Schema documents attached to agents, modules and tools.

use serde_json::Value;

/// A JSON-Schema-like document
///
/// The document is stored as given; structural checks happen in the
/// rule engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema(Value);

impl Schema {
    /// Wrap a schema document
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Borrow the underlying document
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Schema {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

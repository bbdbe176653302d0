//! Completion criteria for an agent's task.

/// Free-text success and failure conditions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCriteria {
    pub(crate) success: String,
    pub(crate) failure: String,
}

impl CompletionCriteria {
    /// Condition under which the task counts as done
    #[must_use]
    pub fn success(&self) -> &str {
        &self.success
    }

    /// Condition under which the task counts as failed
    #[must_use]
    pub fn failure(&self) -> &str {
        &self.failure
    }
}

//! Error types for the persistence collaborator

/// Store operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Referenced record does not exist
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Record kind (patent, employee, ...)
        kind: &'static str,
        /// Stringified identifier
        id: String,
    },

    /// Tracking identifier already in use by another patent
    #[error("duplicate tracking id: {0}")]
    DuplicateTracking(String),

    /// Timeline hash chain does not verify
    #[error("timeline integrity violation for patent {0}")]
    IntegrityViolation(String),

    /// Backend/network failure, not recoverable locally
    #[error("backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    /// Convenience constructor for missing records
    #[inline]
    #[must_use]
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

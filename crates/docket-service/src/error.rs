//! Error types for the service layer
//!
//! Mirrors the three-way taxonomy consumed by the UI: validation errors
//! (per-row, never fatal to a batch), authorization errors (blocked before
//! the collaborator is reached), and collaborator failures (surfaced,
//! operation treated as not applied).

use docket_engine::EngineError;
use docket_store::StoreError;

/// Main service error type
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The acting employee may not perform this mutation
    #[error("not authorized: {0}")]
    Unauthorized(String),

    /// Malformed input, rejected before any state changes
    #[error("validation failed: {0}")]
    Validation(String),

    /// The workflow engine rejected the state change
    #[error("transition rejected: {0}")]
    Transition(#[from] EngineError),

    /// Collaborator failure; the operation was not applied
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Whether retrying the same request could succeed
    ///
    /// Authorization and validation failures are deterministic; only
    /// collaborator failures are worth retrying.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(StoreError::Backend(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_display() {
        let err = ServiceError::Unauthorized("filer may not approve".to_string());
        assert!(err.to_string().contains("not authorized"));
    }

    #[test]
    fn only_backend_failures_retryable() {
        assert!(ServiceError::Store(StoreError::Backend("timeout".into())).is_retryable());
        assert!(!ServiceError::Unauthorized("no".into()).is_retryable());
        assert!(!ServiceError::Store(StoreError::DuplicateTracking("P-1".into())).is_retryable());
    }
}

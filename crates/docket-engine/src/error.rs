//! Error types for the workflow engine

use docket_record::{StageId, SubStageKind};

/// Workflow transition errors
///
/// Returned when a requested state change would violate the sequential
/// completion invariant or the two-step review protocol.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Patent is withdrawn; no stage mutation is legal
    #[error("patent is withdrawn")]
    PatentWithdrawn,

    /// FER sub-stage addressed while no FER cycle is active
    #[error("no active FER cycle")]
    FerInactive,

    /// Stage has no addressable sub-stage (terminal derivation result)
    #[error("stage {0} has no sub-stage to mutate")]
    NotAddressable(&'static str),

    /// Sub-stage already carries the authoritative completion flag
    #[error("{} {} is already completed", .0.label(), .1.label())]
    AlreadyCompleted(StageId, SubStageKind),

    /// Sub-stage is already awaiting review
    #[error("{} {} is already awaiting review", .0.label(), .1.label())]
    AlreadyAwaitingReview(StageId, SubStageKind),

    /// Approval or rejection without an outstanding review
    #[error("{} {} is not awaiting review", .0.label(), .1.label())]
    NotAwaitingReview(StageId, SubStageKind),

    /// An earlier required sub-stage is still incomplete
    #[error("prerequisite {} {} is incomplete", .0.label(), .1.label())]
    PrerequisiteIncomplete(StageId, SubStageKind),
}

//! Two-step completion protocol
//!
//! Workers request completion (`mark_done`: incomplete → awaiting review);
//! admins `approve` (flips the authoritative completion flag) or `reject`
//! (returns the sub-stage to its prior incomplete state, assignee
//! preserved, reason recorded). Every application validates first and
//! mutates only on success.

use crate::error::EngineError;
use crate::stage::{Stage, STAGE_STEPS};
use docket_record::{Patent, StageId, SubStageKind};

/// Resolve a stage to its sub-stage address, rejecting terminal stages
fn address(stage: Stage) -> Result<(StageId, SubStageKind), EngineError> {
    stage
        .key()
        .ok_or(EngineError::NotAddressable(stage.label()))
}

/// Common validation shared by every sub-stage transition
fn validate_live(patent: &Patent, id: StageId) -> Result<(), EngineError> {
    if patent.withdrawn {
        return Err(EngineError::PatentWithdrawn);
    }
    if !patent.stage_required(id) {
        return Err(EngineError::FerInactive);
    }
    Ok(())
}

/// Every required sub-stage preceding `(id, kind)` must be complete
///
/// Enforces the monotonic-sequence invariant: CS cannot progress before
/// PS, and a filing half cannot progress before its drafting half.
fn validate_prerequisites(
    patent: &Patent,
    id: StageId,
    kind: SubStageKind,
) -> Result<(), EngineError> {
    for step in &STAGE_STEPS {
        if step.id == id && step.kind == kind {
            break;
        }
        if !patent.stage_required(step.id) {
            continue;
        }
        if !patent.sub_stage(step.id, step.kind).completed {
            return Err(EngineError::PrerequisiteIncomplete(step.id, step.kind));
        }
    }
    Ok(())
}

/// Validate a mark-done request without mutating
pub fn validate_mark_done(patent: &Patent, stage: Stage) -> Result<(), EngineError> {
    let (id, kind) = address(stage)?;
    validate_live(patent, id)?;
    let sub = patent.sub_stage(id, kind);
    if sub.completed {
        return Err(EngineError::AlreadyCompleted(id, kind));
    }
    if sub.awaiting_review {
        return Err(EngineError::AlreadyAwaitingReview(id, kind));
    }
    validate_prerequisites(patent, id, kind)
}

/// Worker marked the sub-stage done: set the awaiting-review flag
///
/// Clears any earlier rejection reason; the record is back under review.
pub fn apply_mark_done(patent: &mut Patent, stage: Stage) -> Result<(), EngineError> {
    validate_mark_done(patent, stage)?;
    let (id, kind) = address(stage)?;
    let sub = patent.sub_stage_mut(id, kind);
    sub.awaiting_review = true;
    sub.rejection_reason = None;
    Ok(())
}

/// Validate an approval without mutating
pub fn validate_approve(patent: &Patent, stage: Stage) -> Result<(), EngineError> {
    let (id, kind) = address(stage)?;
    validate_live(patent, id)?;
    let sub = patent.sub_stage(id, kind);
    if sub.completed {
        return Err(EngineError::AlreadyCompleted(id, kind));
    }
    if !sub.awaiting_review {
        return Err(EngineError::NotAwaitingReview(id, kind));
    }
    validate_prerequisites(patent, id, kind)
}

/// Admin approved: flip the authoritative completion flag
pub fn apply_approve(patent: &mut Patent, stage: Stage) -> Result<(), EngineError> {
    validate_approve(patent, stage)?;
    let (id, kind) = address(stage)?;
    let sub = patent.sub_stage_mut(id, kind);
    sub.completed = true;
    sub.awaiting_review = false;
    sub.rejection_reason = None;
    Ok(())
}

/// Validate a rejection without mutating
pub fn validate_reject(patent: &Patent, stage: Stage) -> Result<(), EngineError> {
    let (id, kind) = address(stage)?;
    validate_live(patent, id)?;
    let sub = patent.sub_stage(id, kind);
    if !sub.awaiting_review {
        return Err(EngineError::NotAwaitingReview(id, kind));
    }
    Ok(())
}

/// Admin rejected: clear the review flag, record the reason
///
/// The assignee is preserved: the sub-stage returns to incomplete, not to
/// not-started.
pub fn apply_reject(
    patent: &mut Patent,
    stage: Stage,
    reason: impl Into<String>,
) -> Result<(), EngineError> {
    validate_reject(patent, stage)?;
    let (id, kind) = address(stage)?;
    let sub = patent.sub_stage_mut(id, kind);
    sub.awaiting_review = false;
    sub.rejection_reason = Some(reason.into());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::derive_stage;
    use crate::status::{derive_display_status, DisplayStatus};
    use docket_record::TrackingId;
    use std::str::FromStr;

    fn patent(tracking: &str) -> Patent {
        let mut p = Patent::new(TrackingId::from_str(tracking).unwrap(), "Widget", "Acme");
        p.sub_stage_mut(StageId::Ps, SubStageKind::Drafting).assignee =
            Some("R. Iyer".to_string());
        p
    }

    #[test]
    fn two_step_completion_advances_stage() {
        let mut p = patent("P-400");

        apply_mark_done(&mut p, Stage::PsDrafting).unwrap();
        assert_eq!(derive_display_status(&p), DisplayStatus::Pending);
        assert_eq!(derive_stage(&p), Stage::PsDrafting);

        apply_approve(&mut p, Stage::PsDrafting).unwrap();
        assert!(p.sub_stage(StageId::Ps, SubStageKind::Drafting).completed);
        assert_eq!(derive_stage(&p), Stage::PsFiling);
    }

    #[test]
    fn reject_preserves_assignee_and_records_reason() {
        let mut p = patent("P-401");
        apply_mark_done(&mut p, Stage::PsDrafting).unwrap();
        apply_reject(&mut p, Stage::PsDrafting, "claims too broad").unwrap();

        let sub = p.sub_stage(StageId::Ps, SubStageKind::Drafting);
        assert!(!sub.awaiting_review);
        assert!(!sub.completed);
        assert_eq!(sub.assignee.as_deref(), Some("R. Iyer"));
        assert_eq!(sub.rejection_reason.as_deref(), Some("claims too broad"));
    }

    #[test]
    fn mark_done_clears_rejection_reason() {
        let mut p = patent("P-402");
        apply_mark_done(&mut p, Stage::PsDrafting).unwrap();
        apply_reject(&mut p, Stage::PsDrafting, "missing drawings").unwrap();
        apply_mark_done(&mut p, Stage::PsDrafting).unwrap();

        let sub = p.sub_stage(StageId::Ps, SubStageKind::Drafting);
        assert!(sub.awaiting_review);
        assert!(sub.rejection_reason.is_none());
    }

    #[test]
    fn approve_requires_outstanding_review() {
        let mut p = patent("P-403");
        assert_eq!(
            apply_approve(&mut p, Stage::PsDrafting),
            Err(EngineError::NotAwaitingReview(StageId::Ps, SubStageKind::Drafting))
        );
    }

    #[test]
    fn filing_blocked_before_drafting_complete() {
        let mut p = patent("P-404");
        p.sub_stage_mut(StageId::Ps, SubStageKind::Filing).assignee =
            Some("A. Rao".to_string());

        assert_eq!(
            apply_mark_done(&mut p, Stage::PsFiling),
            Err(EngineError::PrerequisiteIncomplete(StageId::Ps, SubStageKind::Drafting))
        );
    }

    #[test]
    fn cs_blocked_before_ps_complete() {
        let mut p = patent("P-405");
        assert_eq!(
            apply_mark_done(&mut p, Stage::CsDrafting),
            Err(EngineError::PrerequisiteIncomplete(StageId::Ps, SubStageKind::Drafting))
        );
    }

    #[test]
    fn fer_transitions_require_active_cycle() {
        let mut p = patent("P-406");
        assert_eq!(
            apply_mark_done(&mut p, Stage::FerDrafting),
            Err(EngineError::FerInactive)
        );
    }

    #[test]
    fn withdrawn_blocks_all_transitions() {
        let mut p = patent("P-407");
        p.withdrawn = true;
        assert_eq!(
            apply_mark_done(&mut p, Stage::PsDrafting),
            Err(EngineError::PatentWithdrawn)
        );
    }

    #[test]
    fn double_mark_done_rejected() {
        let mut p = patent("P-408");
        apply_mark_done(&mut p, Stage::PsDrafting).unwrap();
        assert_eq!(
            apply_mark_done(&mut p, Stage::PsDrafting),
            Err(EngineError::AlreadyAwaitingReview(StageId::Ps, SubStageKind::Drafting))
        );
    }

    #[test]
    fn terminal_stage_not_addressable() {
        let mut p = patent("P-409");
        assert_eq!(
            apply_mark_done(&mut p, Stage::Completed),
            Err(EngineError::NotAddressable("completed"))
        );
    }
}

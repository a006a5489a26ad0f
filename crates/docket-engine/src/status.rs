//! Coarse display status for badge rendering

use crate::stage::{current_step, Stage};
use docket_record::Patent;
use serde::{Deserialize, Serialize};

/// Coarse status label derived from the current pipeline position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayStatus {
    /// All required sub-stages complete
    Completed,
    /// Current sub-stage assigned and being worked
    InProgress,
    /// Current sub-stage marked done, approval outstanding
    Pending,
    /// Current sub-stage has no assignee
    NotStarted,
    /// Patent withdrawn
    Withdrawn,
}

impl DisplayStatus {
    /// Human-facing label
    #[inline]
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DisplayStatus::Completed => "completed",
            DisplayStatus::InProgress => "in progress",
            DisplayStatus::Pending => "pending approval",
            DisplayStatus::NotStarted => "not started",
            DisplayStatus::Withdrawn => "withdrawn",
        }
    }
}

/// Derive the display status of a patent
///
/// Withdrawn and completed map directly. Otherwise the current sub-stage
/// decides: awaiting review → `Pending`, assigned → `InProgress`, no
/// assignee → `NotStarted`. Nothing can be in progress without an actor.
#[must_use]
pub fn derive_display_status(patent: &Patent) -> DisplayStatus {
    if patent.withdrawn {
        return DisplayStatus::Withdrawn;
    }
    let Some(step) = current_step(patent) else {
        return DisplayStatus::Completed;
    };
    let sub = patent.sub_stage(step.id, step.kind);
    if sub.awaiting_review {
        DisplayStatus::Pending
    } else if sub.assignee.is_some() {
        DisplayStatus::InProgress
    } else {
        DisplayStatus::NotStarted
    }
}

/// Map a derived stage to its display status for already-terminal stages
///
/// Convenience for callers holding a [`Stage`] without the record.
#[inline]
#[must_use]
pub fn terminal_status(stage: Stage) -> Option<DisplayStatus> {
    match stage {
        Stage::Completed => Some(DisplayStatus::Completed),
        Stage::Withdrawn => Some(DisplayStatus::Withdrawn),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_record::{StageId, SubStageKind, TrackingId};
    use std::str::FromStr;

    fn patent(tracking: &str) -> Patent {
        Patent::new(TrackingId::from_str(tracking).unwrap(), "Widget", "Acme")
    }

    #[test]
    fn unassigned_is_not_started() {
        assert_eq!(derive_display_status(&patent("P-200")), DisplayStatus::NotStarted);
    }

    #[test]
    fn assigned_is_in_progress() {
        let mut p = patent("P-201");
        p.sub_stage_mut(StageId::Ps, SubStageKind::Drafting).assignee =
            Some("R. Iyer".to_string());
        assert_eq!(derive_display_status(&p), DisplayStatus::InProgress);
    }

    #[test]
    fn awaiting_review_is_pending() {
        let mut p = patent("P-202");
        let sub = p.sub_stage_mut(StageId::Ps, SubStageKind::Drafting);
        sub.assignee = Some("R. Iyer".to_string());
        sub.awaiting_review = true;
        assert_eq!(derive_display_status(&p), DisplayStatus::Pending);
    }

    #[test]
    fn withdrawn_beats_pending() {
        let mut p = patent("P-203");
        p.sub_stage_mut(StageId::Ps, SubStageKind::Drafting).awaiting_review = true;
        p.withdrawn = true;
        assert_eq!(derive_display_status(&p), DisplayStatus::Withdrawn);
    }

    #[test]
    fn all_complete_is_completed() {
        let mut p = patent("P-204");
        for id in [StageId::Ps, StageId::Cs] {
            p.sub_stage_mut(id, SubStageKind::Drafting).completed = true;
            p.sub_stage_mut(id, SubStageKind::Filing).completed = true;
        }
        assert_eq!(derive_display_status(&p), DisplayStatus::Completed);
    }

    #[test]
    fn status_serde_camel_case() {
        let json = serde_json::to_string(&DisplayStatus::InProgress).unwrap();
        assert_eq!(json, "\"inProgress\"");
        let json = serde_json::to_string(&DisplayStatus::NotStarted).unwrap();
        assert_eq!(json, "\"notStarted\"");
    }
}

//! Row-level authorization predicate
//!
//! Pure predicate consumed before every mutation in the service layer. The
//! acting employee is always passed in explicitly; there is no ambient
//! session state to consult.

use crate::stage::Stage;
use docket_record::{Employee, Patent, Role, SubStageKind};
use serde::{Deserialize, Serialize};

/// Mutations the predicate gates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageAction {
    /// Worker marks own sub-stage done (incomplete → awaiting review)
    MarkDone,
    /// Admin approves an outstanding review
    Approve,
    /// Admin rejects an outstanding review
    Reject,
    /// Admin changes a sub-stage assignee
    EditAssignment,
    /// Admin sets a sub-stage deadline
    SetDeadline,
    /// Admin records a filed form
    FileForm,
    /// Admin withdraws the patent
    Withdraw,
    /// Admin deletes the patent (cascades)
    Delete,
}

/// Whether `user` may perform `action` on `stage` of `patent`
///
/// Admins may do anything. Drafters and filers may only mark their own
/// assigned sub-stage done (drafters on drafting halves, filers on filing
/// halves), and only while it is incomplete on a live patent. Approval is
/// admin-only: workers never flip the authoritative completion flag.
#[must_use]
pub fn can_mutate_stage(
    user: &Employee,
    patent: &Patent,
    stage: Stage,
    action: StageAction,
) -> bool {
    if user.role.is_admin() {
        return true;
    }

    // Workers: only mark-done, only on an addressable sub-stage
    if action != StageAction::MarkDone {
        return false;
    }
    let Some((id, kind)) = stage.key() else {
        return false;
    };
    let kind_matches = matches!(
        (user.role, kind),
        (Role::Drafter, SubStageKind::Drafting) | (Role::Filer, SubStageKind::Filing)
    );
    if !kind_matches {
        return false;
    }

    let sub = patent.sub_stage(id, kind);
    !patent.withdrawn && sub.is_assigned_to(&user.full_name) && !sub.completed
}

//! Pipeline stage derivation
//!
//! The traversal is data-driven: [`STAGE_STEPS`] lists every sub-stage in
//! prosecution order, and [`derive_stage`] returns the first required step
//! whose completion flag is unset. Adding a stage means adding a table row,
//! not new control flow.

use docket_record::{Patent, StageId, SubStageKind};
use serde::{Deserialize, Serialize};

/// Derived pipeline position of a patent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    /// Drafting the provisional specification
    PsDrafting,
    /// Filing the provisional specification
    PsFiling,
    /// Drafting the complete specification
    CsDrafting,
    /// Filing the complete specification
    CsFiling,
    /// Drafting the FER response
    FerDrafting,
    /// Filing the FER response
    FerFiling,
    /// All required sub-stages complete
    Completed,
    /// Terminal withdrawal, overrides everything
    Withdrawn,
}

impl Stage {
    /// Record-level address of this stage, if it is a sub-stage
    ///
    /// `Completed` and `Withdrawn` are derivation results with no
    /// addressable sub-stage.
    #[inline]
    #[must_use]
    pub fn key(self) -> Option<(StageId, SubStageKind)> {
        match self {
            Stage::PsDrafting => Some((StageId::Ps, SubStageKind::Drafting)),
            Stage::PsFiling => Some((StageId::Ps, SubStageKind::Filing)),
            Stage::CsDrafting => Some((StageId::Cs, SubStageKind::Drafting)),
            Stage::CsFiling => Some((StageId::Cs, SubStageKind::Filing)),
            Stage::FerDrafting => Some((StageId::Fer, SubStageKind::Drafting)),
            Stage::FerFiling => Some((StageId::Fer, SubStageKind::Filing)),
            Stage::Completed | Stage::Withdrawn => None,
        }
    }

    /// Human-facing label
    #[inline]
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Stage::PsDrafting => "PS drafting",
            Stage::PsFiling => "PS filing",
            Stage::CsDrafting => "CS drafting",
            Stage::CsFiling => "CS filing",
            Stage::FerDrafting => "FER drafting",
            Stage::FerFiling => "FER filing",
            Stage::Completed => "completed",
            Stage::Withdrawn => "withdrawn",
        }
    }
}

/// One row of the ordered traversal table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageStep {
    /// Derivation result when this step is the frontier
    pub stage: Stage,
    /// Record-level stage
    pub id: StageId,
    /// Record-level sub-stage kind
    pub kind: SubStageKind,
}

/// Every sub-stage in fixed prosecution order PS → CS → FER
pub static STAGE_STEPS: [StageStep; 6] = [
    StageStep {
        stage: Stage::PsDrafting,
        id: StageId::Ps,
        kind: SubStageKind::Drafting,
    },
    StageStep {
        stage: Stage::PsFiling,
        id: StageId::Ps,
        kind: SubStageKind::Filing,
    },
    StageStep {
        stage: Stage::CsDrafting,
        id: StageId::Cs,
        kind: SubStageKind::Drafting,
    },
    StageStep {
        stage: Stage::CsFiling,
        id: StageId::Cs,
        kind: SubStageKind::Filing,
    },
    StageStep {
        stage: Stage::FerDrafting,
        id: StageId::Fer,
        kind: SubStageKind::Drafting,
    },
    StageStep {
        stage: Stage::FerFiling,
        id: StageId::Fer,
        kind: SubStageKind::Filing,
    },
];

/// First required step whose completion flag is unset, if any
///
/// Skips steps whose stage is not required for this patent (FER while no
/// cycle is active).
#[must_use]
pub fn current_step(patent: &Patent) -> Option<&'static StageStep> {
    STAGE_STEPS
        .iter()
        .filter(|step| patent.stage_required(step.id))
        .find(|step| !patent.sub_stage(step.id, step.kind).completed)
}

/// Derive the pipeline stage of a patent
///
/// `withdrawn` wins unconditionally; otherwise the first incomplete
/// required sub-stage in PS → CS → FER order; `Completed` when none remain.
#[must_use]
pub fn derive_stage(patent: &Patent) -> Stage {
    if patent.withdrawn {
        return Stage::Withdrawn;
    }
    match current_step(patent) {
        Some(step) => step.stage,
        None => Stage::Completed,
    }
}

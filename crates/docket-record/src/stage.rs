//! Prosecution stage addressing and sub-stage state
//!
//! A patent moves through up to three sequential stages (PS, CS, FER), each
//! split into a drafting and a filing sub-stage. Every sub-stage carries an
//! assignee, a deadline, a completion flag, and an awaiting-review flag.
//! Drafting and filing sub-stages are shaped identically: both go through
//! the mark-done / approve protocol.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The three sequential prosecution stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageId {
    /// Provisional specification
    Ps,
    /// Complete specification
    Cs,
    /// First examination report response
    Fer,
}

impl StageId {
    /// Stages in prosecution order
    pub const ORDERED: [StageId; 3] = [StageId::Ps, StageId::Cs, StageId::Fer];

    /// Human-facing label
    #[inline]
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StageId::Ps => "PS",
            StageId::Cs => "CS",
            StageId::Fer => "FER",
        }
    }
}

/// Drafting vs filing half of a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubStageKind {
    /// Preparing the paperwork
    Drafting,
    /// Submitting the paperwork
    Filing,
}

impl SubStageKind {
    /// Human-facing label
    #[inline]
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SubStageKind::Drafting => "drafting",
            SubStageKind::Filing => "filing",
        }
    }
}

/// State of a single drafting or filing sub-stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubStage {
    /// Assigned employee (full name), if any
    pub assignee: Option<String>,
    /// Due date, if set
    pub deadline: Option<NaiveDate>,
    /// Authoritative completion flag, set only on admin approval
    pub completed: bool,
    /// Worker marked done, admin approval outstanding
    pub awaiting_review: bool,
    /// Reason recorded on the most recent rejection, if any
    pub rejection_reason: Option<String>,
}

impl SubStage {
    /// Unassigned, incomplete sub-stage
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With an assignee
    #[inline]
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// With a deadline
    #[inline]
    #[must_use]
    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Whether the named employee is the assignee
    #[inline]
    #[must_use]
    pub fn is_assigned_to(&self, full_name: &str) -> bool {
        self.assignee.as_deref() == Some(full_name)
    }
}

/// Drafting/filing sub-stage pair for one prosecution stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagePair {
    /// Drafting half
    pub drafting: SubStage,
    /// Filing half
    pub filing: SubStage,
}

impl StagePair {
    /// Fresh pair, both halves unassigned and incomplete
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sub-stage by kind
    #[inline]
    #[must_use]
    pub fn sub(&self, kind: SubStageKind) -> &SubStage {
        match kind {
            SubStageKind::Drafting => &self.drafting,
            SubStageKind::Filing => &self.filing,
        }
    }

    /// Mutable sub-stage by kind
    #[inline]
    pub fn sub_mut(&mut self, kind: SubStageKind) -> &mut SubStage {
        match kind {
            SubStageKind::Drafting => &mut self.drafting,
            SubStageKind::Filing => &mut self.filing,
        }
    }

    /// Both halves approved
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.drafting.completed && self.filing.completed
    }
}

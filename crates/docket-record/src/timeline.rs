//! Timeline events
//!
//! Immutable append-only log entries attached to a patent. Written once by
//! the mutation layer, read-only for display. Chain sealing and integrity
//! verification live in the store layer.

use crate::id::{EventId, PatentId};
use crate::stage::{StageId, SubStageKind};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Patent record created
    Created,
    /// Sub-stage assignee changed
    Assigned,
    /// Sub-stage deadline set
    DeadlineSet,
    /// Worker marked a sub-stage done
    MarkedDone,
    /// Admin approved a sub-stage
    Approved,
    /// Admin rejected a sub-stage review
    Rejected,
    /// Statutory form filed
    FormFiled,
    /// Patent withdrawn
    Withdrawn,
    /// Payment recorded
    PaymentRecorded,
    /// FER cycle opened
    FerOpened,
    /// FER response filed
    FerFiled,
    /// Record arrived via bulk upload
    Imported,
}

/// One immutable log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Event identifier
    pub id: EventId,
    /// Patent the event belongs to
    pub patent_id: PatentId,
    /// Event type
    pub kind: EventKind,
    /// Human-facing description
    pub description: String,
    /// Acting employee (full name), if any
    pub actor: Option<String>,
    /// Stage the event concerns, if any
    pub stage: Option<StageId>,
    /// Sub-stage kind the event concerns, if any
    pub sub_stage: Option<SubStageKind>,
    /// Associated deadline, if any
    pub deadline: Option<NaiveDate>,
    /// Event timestamp
    pub at: DateTime<Utc>,
}

impl TimelineEvent {
    /// Create an event stamped now
    #[must_use]
    pub fn new(patent_id: PatentId, kind: EventKind, description: impl Into<String>) -> Self {
        Self {
            id: EventId::new(),
            patent_id,
            kind,
            description: description.into(),
            actor: None,
            stage: None,
            sub_stage: None,
            deadline: None,
            at: Utc::now(),
        }
    }

    /// With the acting employee
    #[inline]
    #[must_use]
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// With the concerned sub-stage
    #[inline]
    #[must_use]
    pub fn with_sub_stage(mut self, stage: StageId, kind: SubStageKind) -> Self {
        self.stage = Some(stage);
        self.sub_stage = Some(kind);
        self
    }

    /// With an associated deadline
    #[inline]
    #[must_use]
    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

//! FER entry child records
//!
//! A patent may go through several FER cycles. Each cycle beyond the
//! sub-stage pair on the patent itself is tracked as a detachable child
//! record with its own number, dates, and filing completion.

use crate::id::{FerEntryId, PatentId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One FER cycle attached to a patent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FerEntry {
    /// Entry identifier
    pub id: FerEntryId,
    /// Owning patent
    pub patent_id: PatentId,
    /// Cycle number (1-based, in issue order)
    pub number: u32,
    /// Date the examination report issued
    pub issued_on: Option<NaiveDate>,
    /// Response deadline
    pub deadline: Option<NaiveDate>,
    /// Whether the response has been filed
    pub filing_completed: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl FerEntry {
    /// Open a new FER cycle for a patent
    #[inline]
    #[must_use]
    pub fn new(patent_id: PatentId, number: u32) -> Self {
        Self {
            id: FerEntryId::new(),
            patent_id,
            number,
            issued_on: None,
            deadline: None,
            filing_completed: false,
            created_at: Utc::now(),
        }
    }

    /// With the report issue date
    #[inline]
    #[must_use]
    pub fn with_issued_on(mut self, date: NaiveDate) -> Self {
        self.issued_on = Some(date);
        self
    }

    /// With a response deadline
    #[inline]
    #[must_use]
    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

//! Bulk-upload ingress
//!
//! Spreadsheet rows arrive already decoded into [`ImportRow`] records;
//! byte-level CSV/Excel parsing happens upstream. Validation is per row:
//! invalid rows collect an error message and never abort the batch, valid
//! rows are created independently.

use crate::error::ServiceError;
use crate::service::DocketService;
use chrono::NaiveDate;
use docket_engine::STAGE_STEPS;
use docket_record::{
    Employee, EventKind, Inventor, Patent, PatentId, StageId, SubStageKind, TimelineEvent,
    TrackingId,
};
use docket_store::Store;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// One decoded spreadsheet row
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportRow {
    /// Unique tracking identifier (required)
    pub tracking_id: String,
    /// Patent title (required)
    pub title: String,
    /// Applicant name (required)
    pub applicant: String,
    /// Applicant address
    pub applicant_addr: Option<String>,
    /// Owning client
    pub client_id: Option<String>,
    /// Inventor name, one per row
    pub inventor_name: Option<String>,
    /// Inventor address
    pub inventor_addr: Option<String>,
    /// PS drafting assignee
    pub ps_drafting_assignee: Option<String>,
    /// PS drafting deadline
    pub ps_drafting_deadline: Option<NaiveDate>,
    /// PS filing assignee
    pub ps_filing_assignee: Option<String>,
    /// PS filing deadline
    pub ps_filing_deadline: Option<NaiveDate>,
    /// CS drafting assignee
    pub cs_drafting_assignee: Option<String>,
    /// CS drafting deadline
    pub cs_drafting_deadline: Option<NaiveDate>,
    /// CS filing assignee
    pub cs_filing_assignee: Option<String>,
    /// CS filing deadline
    pub cs_filing_deadline: Option<NaiveDate>,
    /// Whether an FER cycle is already active
    pub fer_active: bool,
}

impl ImportRow {
    fn sub_stage_input(
        &self,
        stage: StageId,
        kind: SubStageKind,
    ) -> (Option<String>, Option<NaiveDate>) {
        match (stage, kind) {
            (StageId::Ps, SubStageKind::Drafting) => {
                (self.ps_drafting_assignee.clone(), self.ps_drafting_deadline)
            }
            (StageId::Ps, SubStageKind::Filing) => {
                (self.ps_filing_assignee.clone(), self.ps_filing_deadline)
            }
            (StageId::Cs, SubStageKind::Drafting) => {
                (self.cs_drafting_assignee.clone(), self.cs_drafting_deadline)
            }
            (StageId::Cs, SubStageKind::Filing) => {
                (self.cs_filing_assignee.clone(), self.cs_filing_deadline)
            }
            (StageId::Fer, _) => (None, None),
        }
    }
}

/// A rejected row with its 1-based position and message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    /// 1-based row number
    pub row: usize,
    /// What was wrong
    pub message: String,
}

/// Outcome of a bulk upload
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    /// Rows received
    pub total_rows: usize,
    /// Patents created, in row order
    pub created: Vec<PatentId>,
    /// Rejected rows, in row order
    pub errors: Vec<RowError>,
}

impl ImportReport {
    /// Rows accepted
    #[inline]
    #[must_use]
    pub fn accepted(&self) -> usize {
        self.created.len()
    }

    /// Whether every row was accepted
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a row in isolation, producing the patent it would create
///
/// Duplicate checks against the batch and the store happen in
/// [`DocketService::import_rows`]; this covers per-field validation only.
pub fn build_patent(row: &ImportRow) -> Result<Patent, String> {
    let tracking =
        TrackingId::from_str(&row.tracking_id).map_err(|e| format!("tracking_id: {e}"))?;
    if row.title.trim().is_empty() {
        return Err("title is required".to_string());
    }
    if row.applicant.trim().is_empty() {
        return Err("applicant is required".to_string());
    }

    let mut patent = Patent::new(tracking, row.title.trim(), row.applicant.trim());
    patent.applicant_addr = row.applicant_addr.clone();
    patent.client_id = row.client_id.clone();
    patent.fer_active = row.fer_active;

    if let Some(name) = &row.inventor_name {
        let mut inventor = Inventor::new(name.clone());
        inventor.address = row.inventor_addr.clone();
        patent.inventors.push(inventor);
    }

    for step in &STAGE_STEPS {
        let (assignee, deadline) = row.sub_stage_input(step.id, step.kind);
        let sub = patent.sub_stage_mut(step.id, step.kind);
        sub.assignee = assignee;
        sub.deadline = deadline;
    }

    Ok(patent)
}

impl<S: Store> DocketService<S> {
    /// Ingest a batch of decoded spreadsheet rows (admin only)
    ///
    /// Row failures are collected per row and never abort the batch; the
    /// report lists both created patents and rejected rows. The batch-size
    /// limit and the authorization check are the only whole-batch errors.
    pub async fn import_rows(
        &self,
        user: &Employee,
        rows: Vec<ImportRow>,
    ) -> Result<ImportReport, ServiceError> {
        if !user.role.is_admin() {
            return Err(ServiceError::Unauthorized(format!(
                "{} may not bulk-upload patents",
                user.role
            )));
        }
        if rows.len() > self.config().max_batch_rows {
            return Err(ServiceError::Validation(format!(
                "batch of {} rows exceeds limit of {}",
                rows.len(),
                self.config().max_batch_rows
            )));
        }

        let mut report = ImportReport {
            total_rows: rows.len(),
            ..ImportReport::default()
        };
        let mut seen: HashSet<String> = HashSet::new();

        for (idx, row) in rows.iter().enumerate() {
            let row_no = idx + 1;
            match self.ingest_row(user, row, &mut seen).await {
                Ok(id) => report.created.push(id),
                Err(message) => report.errors.push(RowError {
                    row: row_no,
                    message,
                }),
            }
        }

        tracing::info!(
            accepted = report.accepted(),
            rejected = report.errors.len(),
            "bulk upload finished"
        );
        Ok(report)
    }

    async fn ingest_row(
        &self,
        user: &Employee,
        row: &ImportRow,
        seen: &mut HashSet<String>,
    ) -> Result<PatentId, String> {
        let patent = build_patent(row)?;
        let tracking = patent.tracking_id.as_str().to_string();

        if !seen.insert(tracking.clone()) {
            return Err(format!("duplicate tracking id in batch: {tracking}"));
        }
        let existing = self
            .store()
            .find_by_tracking(&patent.tracking_id)
            .await
            .map_err(|e| e.to_string())?;
        if existing.is_some() {
            return Err(format!("tracking id already exists: {tracking}"));
        }

        let created = self
            .store()
            .create_patent(patent)
            .await
            .map_err(|e| e.to_string())?;
        self.store()
            .append_event(
                TimelineEvent::new(created.id, EventKind::Imported, "arrived via bulk upload")
                    .with_actor(user.full_name.clone()),
            )
            .await
            .map_err(|e| e.to_string())?;
        Ok(created.id)
    }
}

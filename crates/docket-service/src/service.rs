//! Docket service - authorization-gated mutation pipeline
//!
//! Every mutation follows the same sequence:
//! 1. Load the records involved
//! 2. Evaluate the authorization predicate; a denial blocks the request
//!    before it reaches the collaborator
//! 3. Validate and apply the workflow transition on an owned copy
//! 4. Persist through the store
//! 5. Append a timeline event
//!
//! The acting employee is an explicit parameter on every operation; the
//! service holds no session state.

use crate::config::ServiceConfig;
use crate::error::ServiceError;
use chrono::NaiveDate;
use docket_engine::{
    apply_approve, apply_mark_done, apply_reject, can_mutate_stage, conversion_stats,
    deadlines_within, group_by_state, summary_stats, ConversionStats, Stage, StageAction,
    StateDistribution, SummaryStats,
};
use docket_record::{
    Employee, EmployeeId, EventKind, FerEntry, FormId, Inventor, Patent, PatentId, Payment,
    TimelineEvent, TrackingId,
};
use docket_store::{Store, StoreError};

/// Input for creating a patent together with its owned inventors
#[derive(Debug, Clone)]
pub struct NewPatent {
    /// Unique tracking identifier
    pub tracking_id: TrackingId,
    /// Patent title
    pub title: String,
    /// Applicant name
    pub applicant: String,
    /// Applicant address
    pub applicant_addr: Option<String>,
    /// Owning client
    pub client_id: Option<String>,
    /// Inventors created with the patent
    pub inventors: Vec<Inventor>,
}

/// The orchestration layer over engine and store
#[derive(Debug)]
pub struct DocketService<S> {
    config: ServiceConfig,
    store: S,
}

impl<S: Store> DocketService<S> {
    /// Create a service over a store
    #[inline]
    #[must_use]
    pub fn new(config: ServiceConfig, store: S) -> Self {
        Self { config, store }
    }

    /// The underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Service configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn require_admin(user: &Employee, what: &str) -> Result<(), ServiceError> {
        if user.role.is_admin() {
            Ok(())
        } else {
            Err(ServiceError::Unauthorized(format!(
                "{} may not {what}",
                user.role
            )))
        }
    }

    fn authorize(
        user: &Employee,
        patent: &Patent,
        stage: Stage,
        action: StageAction,
    ) -> Result<(), ServiceError> {
        if can_mutate_stage(user, patent, stage, action) {
            Ok(())
        } else {
            Err(ServiceError::Unauthorized(format!(
                "{} ({}) may not act on {} of {}",
                user.full_name,
                user.role,
                stage.label(),
                patent.tracking_id
            )))
        }
    }

    // ---- patent lifecycle -------------------------------------------------

    /// Create a patent with its inventors (admin only)
    pub async fn create_patent(
        &self,
        user: &Employee,
        new: NewPatent,
    ) -> Result<Patent, ServiceError> {
        Self::require_admin(user, "create patents")?;
        if new.title.trim().is_empty() {
            return Err(ServiceError::Validation("title is empty".to_string()));
        }
        if new.applicant.trim().is_empty() {
            return Err(ServiceError::Validation("applicant is empty".to_string()));
        }

        let mut patent = Patent::new(new.tracking_id, new.title, new.applicant);
        patent.applicant_addr = new.applicant_addr;
        patent.client_id = new.client_id;
        patent.inventors = new.inventors;

        let created = self.store.create_patent(patent).await?;
        tracing::info!(patent = %created.tracking_id, "patent created");
        self.store
            .append_event(
                TimelineEvent::new(created.id, EventKind::Created, "patent record created")
                    .with_actor(user.full_name.clone()),
            )
            .await?;
        Ok(created)
    }

    /// Withdraw a patent, recording the reason (admin only)
    pub async fn withdraw_patent(
        &self,
        user: &Employee,
        patent_id: PatentId,
        reason: impl Into<String>,
    ) -> Result<Patent, ServiceError> {
        Self::require_admin(user, "withdraw patents")?;
        let mut patent = self.store.get_patent(patent_id).await?;
        let reason = reason.into();
        patent.withdrawn = true;
        patent.withdrawal_reason = Some(reason.clone());
        patent.touch();

        let updated = self.store.update_patent(patent).await?;
        tracing::info!(patent = %updated.tracking_id, "patent withdrawn");
        self.store
            .append_event(
                TimelineEvent::new(
                    updated.id,
                    EventKind::Withdrawn,
                    format!("withdrawn: {reason}"),
                )
                .with_actor(user.full_name.clone()),
            )
            .await?;
        Ok(updated)
    }

    /// Delete a patent and cascade its children (admin only)
    pub async fn delete_patent(
        &self,
        user: &Employee,
        patent_id: PatentId,
    ) -> Result<(), ServiceError> {
        Self::require_admin(user, "delete patents")?;
        self.store.delete_patent(patent_id).await?;
        tracing::info!(patent = %patent_id, "patent deleted");
        Ok(())
    }

    // ---- stage mutations --------------------------------------------------

    /// Assign an employee to a sub-stage (admin only)
    pub async fn assign_stage(
        &self,
        user: &Employee,
        patent_id: PatentId,
        stage: Stage,
        assignee: &Employee,
    ) -> Result<Patent, ServiceError> {
        let mut patent = self.store.get_patent(patent_id).await?;
        Self::authorize(user, &patent, stage, StageAction::EditAssignment)?;
        let (id, kind) = stage.key().ok_or_else(|| {
            ServiceError::Validation(format!("{} is not assignable", stage.label()))
        })?;

        patent.sub_stage_mut(id, kind).assignee = Some(assignee.full_name.clone());
        patent.touch();
        let updated = self.store.update_patent(patent).await?;
        self.store
            .append_event(
                TimelineEvent::new(
                    updated.id,
                    EventKind::Assigned,
                    format!("{} assigned to {}", assignee.full_name, stage.label()),
                )
                .with_actor(user.full_name.clone())
                .with_sub_stage(id, kind),
            )
            .await?;
        Ok(updated)
    }

    /// Set a sub-stage deadline (admin only)
    pub async fn set_stage_deadline(
        &self,
        user: &Employee,
        patent_id: PatentId,
        stage: Stage,
        deadline: NaiveDate,
    ) -> Result<Patent, ServiceError> {
        let mut patent = self.store.get_patent(patent_id).await?;
        Self::authorize(user, &patent, stage, StageAction::SetDeadline)?;
        let (id, kind) = stage.key().ok_or_else(|| {
            ServiceError::Validation(format!("{} takes no deadline", stage.label()))
        })?;

        patent.sub_stage_mut(id, kind).deadline = Some(deadline);
        patent.touch();
        let updated = self.store.update_patent(patent).await?;
        self.store
            .append_event(
                TimelineEvent::new(
                    updated.id,
                    EventKind::DeadlineSet,
                    format!("{} deadline set", stage.label()),
                )
                .with_actor(user.full_name.clone())
                .with_sub_stage(id, kind)
                .with_deadline(deadline),
            )
            .await?;
        Ok(updated)
    }

    /// Worker marks their assigned sub-stage done (incomplete → awaiting review)
    pub async fn mark_stage_done(
        &self,
        user: &Employee,
        patent_id: PatentId,
        stage: Stage,
    ) -> Result<Patent, ServiceError> {
        let mut patent = self.store.get_patent(patent_id).await?;
        Self::authorize(user, &patent, stage, StageAction::MarkDone)?;
        apply_mark_done(&mut patent, stage)?;
        patent.touch();

        let updated = self.store.update_patent(patent).await?;
        tracing::info!(patent = %updated.tracking_id, stage = stage.label(), "marked done");
        if let Some((id, kind)) = stage.key() {
            self.store
                .append_event(
                    TimelineEvent::new(
                        updated.id,
                        EventKind::MarkedDone,
                        format!("{} marked done, awaiting review", stage.label()),
                    )
                    .with_actor(user.full_name.clone())
                    .with_sub_stage(id, kind),
                )
                .await?;
        }
        Ok(updated)
    }

    /// Admin approves an outstanding review, flipping the completion flag
    pub async fn approve_stage(
        &self,
        user: &Employee,
        patent_id: PatentId,
        stage: Stage,
    ) -> Result<Patent, ServiceError> {
        let mut patent = self.store.get_patent(patent_id).await?;
        Self::authorize(user, &patent, stage, StageAction::Approve)?;
        apply_approve(&mut patent, stage)?;
        patent.touch();

        let updated = self.store.update_patent(patent).await?;
        tracing::info!(patent = %updated.tracking_id, stage = stage.label(), "approved");
        if let Some((id, kind)) = stage.key() {
            self.store
                .append_event(
                    TimelineEvent::new(
                        updated.id,
                        EventKind::Approved,
                        format!("{} approved", stage.label()),
                    )
                    .with_actor(user.full_name.clone())
                    .with_sub_stage(id, kind),
                )
                .await?;
        }
        Ok(updated)
    }

    /// Admin rejects an outstanding review, recording the reason
    ///
    /// The sub-stage returns to incomplete with its assignee preserved.
    pub async fn reject_stage(
        &self,
        user: &Employee,
        patent_id: PatentId,
        stage: Stage,
        reason: impl Into<String>,
    ) -> Result<Patent, ServiceError> {
        let mut patent = self.store.get_patent(patent_id).await?;
        Self::authorize(user, &patent, stage, StageAction::Reject)?;
        let reason = reason.into();
        apply_reject(&mut patent, stage, reason.clone())?;
        patent.touch();

        let updated = self.store.update_patent(patent).await?;
        tracing::info!(patent = %updated.tracking_id, stage = stage.label(), "rejected");
        if let Some((id, kind)) = stage.key() {
            self.store
                .append_event(
                    TimelineEvent::new(
                        updated.id,
                        EventKind::Rejected,
                        format!("{} rejected: {reason}", stage.label()),
                    )
                    .with_actor(user.full_name.clone())
                    .with_sub_stage(id, kind),
                )
                .await?;
        }
        Ok(updated)
    }

    /// Record a statutory form as filed (admin only)
    pub async fn set_form(
        &self,
        user: &Employee,
        patent_id: PatentId,
        form: FormId,
        filed: bool,
    ) -> Result<Patent, ServiceError> {
        Self::require_admin(user, "record forms")?;
        let mut patent = self.store.get_patent(patent_id).await?;
        patent.forms.set(form, filed);
        patent.touch();

        let updated = self.store.update_patent(patent).await?;
        if filed {
            self.store
                .append_event(
                    TimelineEvent::new(
                        updated.id,
                        EventKind::FormFiled,
                        format!("{} filed", form.label()),
                    )
                    .with_actor(user.full_name.clone()),
                )
                .await?;
        }
        Ok(updated)
    }

    // ---- child records ----------------------------------------------------

    /// Open a new FER cycle (admin only)
    ///
    /// Activates the patent's FER stage on the first cycle.
    pub async fn add_fer_entry(
        &self,
        user: &Employee,
        patent_id: PatentId,
        issued_on: Option<NaiveDate>,
        deadline: Option<NaiveDate>,
    ) -> Result<FerEntry, ServiceError> {
        Self::require_admin(user, "open FER cycles")?;
        let mut patent = self.store.get_patent(patent_id).await?;

        let cycle = self.store.fer_entries_for(patent_id).await?.len() as u32 + 1;
        let mut entry = FerEntry::new(patent_id, cycle);
        entry.issued_on = issued_on;
        entry.deadline = deadline;
        let entry = self.store.add_fer_entry(entry).await?;

        if !patent.fer_active {
            patent.fer_active = true;
            patent.touch();
            self.store.update_patent(patent).await?;
        }

        let mut event = TimelineEvent::new(
            patent_id,
            EventKind::FerOpened,
            format!("FER cycle {cycle} opened"),
        )
        .with_actor(user.full_name.clone());
        if let Some(deadline) = deadline {
            event = event.with_deadline(deadline);
        }
        self.store.append_event(event).await?;
        Ok(entry)
    }

    /// Mark an FER cycle's response as filed (admin only)
    pub async fn complete_fer_filing(
        &self,
        user: &Employee,
        patent_id: PatentId,
        cycle: u32,
    ) -> Result<FerEntry, ServiceError> {
        Self::require_admin(user, "complete FER filings")?;
        let entry = self
            .store
            .fer_entries_for(patent_id)
            .await?
            .into_iter()
            .find(|e| e.number == cycle)
            .ok_or_else(|| StoreError::not_found("fer entry", format!("cycle {cycle}")))?;

        let mut entry = entry;
        entry.filing_completed = true;
        let entry = self.store.update_fer_entry(entry).await?;

        self.store
            .append_event(
                TimelineEvent::new(
                    patent_id,
                    EventKind::FerFiled,
                    format!("FER cycle {cycle} response filed"),
                )
                .with_actor(user.full_name.clone()),
            )
            .await?;
        Ok(entry)
    }

    /// Record a fee payment (admin only)
    pub async fn record_payment(
        &self,
        user: &Employee,
        patent_id: PatentId,
        amount: i64,
        purpose: impl Into<String>,
        paid_on: NaiveDate,
    ) -> Result<Payment, ServiceError> {
        Self::require_admin(user, "record payments")?;
        if amount <= 0 {
            return Err(ServiceError::Validation(format!(
                "payment amount must be positive, got {amount}"
            )));
        }
        let purpose = purpose.into();
        let payment = self
            .store
            .record_payment(Payment::new(patent_id, amount, purpose.clone(), paid_on))
            .await?;

        self.store
            .append_event(
                TimelineEvent::new(
                    patent_id,
                    EventKind::PaymentRecorded,
                    format!("payment recorded: {purpose}"),
                )
                .with_actor(user.full_name.clone()),
            )
            .await?;
        Ok(payment)
    }

    // ---- employees --------------------------------------------------------

    /// Register an employee (admin only); role is fixed at creation
    pub async fn create_employee(
        &self,
        user: &Employee,
        employee: Employee,
    ) -> Result<Employee, ServiceError> {
        Self::require_admin(user, "register employees")?;
        if employee.full_name.trim().is_empty() {
            return Err(ServiceError::Validation("employee name is empty".to_string()));
        }
        let created = self.store.create_employee(employee).await?;
        tracing::info!(employee = %created.full_name, role = %created.role, "employee registered");
        Ok(created)
    }

    /// Remove an employee (admin only)
    ///
    /// Existing sub-stage assignments keep the name; they simply have no
    /// matching employee until reassigned.
    pub async fn delete_employee(
        &self,
        user: &Employee,
        id: EmployeeId,
    ) -> Result<(), ServiceError> {
        Self::require_admin(user, "remove employees")?;
        self.store.delete_employee(id).await?;
        Ok(())
    }

    // ---- reporting --------------------------------------------------------

    /// Completion counts across all patents
    pub async fn summary(&self) -> Result<SummaryStats, ServiceError> {
        let patents = self.store.list_patents().await?;
        Ok(summary_stats(&patents))
    }

    /// PS → CS conversion across all patents
    pub async fn conversion(&self) -> Result<ConversionStats, ServiceError> {
        let patents = self.store.list_patents().await?;
        Ok(conversion_stats(&patents))
    }

    /// Geographic distribution across all patents
    pub async fn state_distribution(&self) -> Result<StateDistribution, ServiceError> {
        let patents = self.store.list_patents().await?;
        Ok(group_by_state(&patents))
    }

    /// Patents with a deadline inside the configured window from `today`
    pub async fn deadlines_approaching(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<Patent>, ServiceError> {
        let patents = self.store.list_patents().await?;
        let near: Vec<Patent> =
            deadlines_within(&patents, today, self.config.deadline_window_days)
                .into_iter()
                .cloned()
                .collect();
        Ok(near)
    }
}

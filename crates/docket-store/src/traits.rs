//! Repository traits for the external persistence collaborator
//!
//! The engine and service layers consume these seams; the hosted backend
//! and the in-memory reference implementation both sit behind them. All
//! operations are discrete asynchronous requests with no retry or
//! idempotency guarantee of their own.

use crate::error::StoreError;
use async_trait::async_trait;
use docket_record::{
    Employee, EmployeeId, EventId, FerEntry, FerEntryId, Patent, PatentId, Payment, PaymentId,
    TimelineEvent, TrackingId,
};

/// Patent CRUD
#[async_trait]
pub trait PatentStore: Send + Sync {
    /// Persist a new patent; fails on duplicate tracking id
    async fn create_patent(&self, patent: Patent) -> Result<Patent, StoreError>;

    /// Fetch by primary id
    async fn get_patent(&self, id: PatentId) -> Result<Patent, StoreError>;

    /// Look up by human-facing tracking id
    async fn find_by_tracking(&self, tracking: &TrackingId)
        -> Result<Option<Patent>, StoreError>;

    /// Replace an existing patent wholesale
    async fn update_patent(&self, patent: Patent) -> Result<Patent, StoreError>;

    /// Delete a patent and all child records (inventors travel with the
    /// record; FER entries, payments, and timeline are cascaded)
    async fn delete_patent(&self, id: PatentId) -> Result<(), StoreError>;

    /// All patents
    async fn list_patents(&self) -> Result<Vec<Patent>, StoreError>;
}

/// Employee CRUD
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Persist a new employee
    async fn create_employee(&self, employee: Employee) -> Result<Employee, StoreError>;

    /// Fetch by id
    async fn get_employee(&self, id: EmployeeId) -> Result<Employee, StoreError>;

    /// Look up by full name (assignments reference names)
    async fn find_employee_by_name(&self, full_name: &str)
        -> Result<Option<Employee>, StoreError>;

    /// Replace an existing employee
    async fn update_employee(&self, employee: Employee) -> Result<Employee, StoreError>;

    /// Delete an employee
    async fn delete_employee(&self, id: EmployeeId) -> Result<(), StoreError>;

    /// All employees
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError>;
}

/// FER entry CRUD
#[async_trait]
pub trait FerStore: Send + Sync {
    /// Attach a new FER cycle entry
    async fn add_fer_entry(&self, entry: FerEntry) -> Result<FerEntry, StoreError>;

    /// Replace an existing entry
    async fn update_fer_entry(&self, entry: FerEntry) -> Result<FerEntry, StoreError>;

    /// Detach an entry
    async fn delete_fer_entry(&self, id: FerEntryId) -> Result<(), StoreError>;

    /// Entries for one patent, in cycle order
    async fn fer_entries_for(&self, patent_id: PatentId) -> Result<Vec<FerEntry>, StoreError>;
}

/// Payment CRUD
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Record a payment
    async fn record_payment(&self, payment: Payment) -> Result<Payment, StoreError>;

    /// Delete a payment
    async fn delete_payment(&self, id: PaymentId) -> Result<(), StoreError>;

    /// Payments for one patent, in date order
    async fn payments_for(&self, patent_id: PatentId) -> Result<Vec<Payment>, StoreError>;
}

/// Append-only timeline access
#[async_trait]
pub trait TimelineStore: Send + Sync {
    /// Append an event; write-only from the mutation layer
    async fn append_event(&self, event: TimelineEvent) -> Result<EventId, StoreError>;

    /// Events for one patent, oldest first; read-only for display
    async fn events_for(&self, patent_id: PatentId) -> Result<Vec<TimelineEvent>, StoreError>;
}

/// The full persistence collaborator surface
pub trait Store:
    PatentStore + EmployeeStore + FerStore + PaymentStore + TimelineStore
{
}

impl<T> Store for T where T: PatentStore + EmployeeStore + FerStore + PaymentStore + TimelineStore {}

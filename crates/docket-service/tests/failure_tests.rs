//! Collaborator-failure behavior: a backend error surfaces as a store
//! error and the operation is treated as not applied.

use async_trait::async_trait;
use docket_engine::{derive_display_status, DisplayStatus, Stage};
use docket_record::{
    Employee, EmployeeId, EventId, FerEntry, FerEntryId, Patent, PatentId, Payment, PaymentId,
    TimelineEvent, TrackingId,
};
use docket_service::{DocketService, NewPatent, ServiceConfig, ServiceError};
use docket_store::{
    EmployeeStore, FerStore, MemoryStore, PatentStore, PaymentStore, StoreError, TimelineStore,
};
use docket_test_utils::{admin, drafter, tracking};
use std::sync::atomic::{AtomicBool, Ordering};

/// Delegates to a `MemoryStore` but fails patent updates on demand,
/// standing in for a hosted backend dropping requests.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_updates: AtomicBool,
}

impl FlakyStore {
    fn start_failing(&self) {
        self.fail_updates.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl PatentStore for FlakyStore {
    async fn create_patent(&self, patent: Patent) -> Result<Patent, StoreError> {
        self.inner.create_patent(patent).await
    }
    async fn get_patent(&self, id: PatentId) -> Result<Patent, StoreError> {
        self.inner.get_patent(id).await
    }
    async fn find_by_tracking(
        &self,
        tracking: &TrackingId,
    ) -> Result<Option<Patent>, StoreError> {
        self.inner.find_by_tracking(tracking).await
    }
    async fn update_patent(&self, patent: Patent) -> Result<Patent, StoreError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("connection reset".to_string()));
        }
        self.inner.update_patent(patent).await
    }
    async fn delete_patent(&self, id: PatentId) -> Result<(), StoreError> {
        self.inner.delete_patent(id).await
    }
    async fn list_patents(&self) -> Result<Vec<Patent>, StoreError> {
        self.inner.list_patents().await
    }
}

#[async_trait]
impl EmployeeStore for FlakyStore {
    async fn create_employee(&self, employee: Employee) -> Result<Employee, StoreError> {
        self.inner.create_employee(employee).await
    }
    async fn get_employee(&self, id: EmployeeId) -> Result<Employee, StoreError> {
        self.inner.get_employee(id).await
    }
    async fn find_employee_by_name(
        &self,
        full_name: &str,
    ) -> Result<Option<Employee>, StoreError> {
        self.inner.find_employee_by_name(full_name).await
    }
    async fn update_employee(&self, employee: Employee) -> Result<Employee, StoreError> {
        self.inner.update_employee(employee).await
    }
    async fn delete_employee(&self, id: EmployeeId) -> Result<(), StoreError> {
        self.inner.delete_employee(id).await
    }
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        self.inner.list_employees().await
    }
}

#[async_trait]
impl FerStore for FlakyStore {
    async fn add_fer_entry(&self, entry: FerEntry) -> Result<FerEntry, StoreError> {
        self.inner.add_fer_entry(entry).await
    }
    async fn update_fer_entry(&self, entry: FerEntry) -> Result<FerEntry, StoreError> {
        self.inner.update_fer_entry(entry).await
    }
    async fn delete_fer_entry(&self, id: FerEntryId) -> Result<(), StoreError> {
        self.inner.delete_fer_entry(id).await
    }
    async fn fer_entries_for(&self, patent_id: PatentId) -> Result<Vec<FerEntry>, StoreError> {
        self.inner.fer_entries_for(patent_id).await
    }
}

#[async_trait]
impl PaymentStore for FlakyStore {
    async fn record_payment(&self, payment: Payment) -> Result<Payment, StoreError> {
        self.inner.record_payment(payment).await
    }
    async fn delete_payment(&self, id: PaymentId) -> Result<(), StoreError> {
        self.inner.delete_payment(id).await
    }
    async fn payments_for(&self, patent_id: PatentId) -> Result<Vec<Payment>, StoreError> {
        self.inner.payments_for(patent_id).await
    }
}

#[async_trait]
impl TimelineStore for FlakyStore {
    async fn append_event(&self, event: TimelineEvent) -> Result<EventId, StoreError> {
        self.inner.append_event(event).await
    }
    async fn events_for(&self, patent_id: PatentId) -> Result<Vec<TimelineEvent>, StoreError> {
        self.inner.events_for(patent_id).await
    }
}

#[tokio::test]
async fn backend_failure_leaves_state_unapplied() {
    let service = DocketService::new(ServiceConfig::new(), FlakyStore::default());
    let admin = admin();
    let drafter = drafter();

    let patent = service
        .create_patent(
            &admin,
            NewPatent {
                tracking_id: tracking("P-850"),
                title: "Valve".to_string(),
                applicant: "Acme".to_string(),
                applicant_addr: None,
                client_id: None,
                inventors: vec![],
            },
        )
        .await
        .unwrap();
    let patent = service
        .assign_stage(&admin, patent.id, Stage::PsDrafting, &drafter)
        .await
        .unwrap();

    service.store().start_failing();

    let result = service
        .mark_stage_done(&drafter, patent.id, Stage::PsDrafting)
        .await;
    match result {
        Err(err @ ServiceError::Store(StoreError::Backend(_))) => {
            assert!(err.is_retryable());
        }
        other => panic!("expected backend failure, got {other:?}"),
    }

    // The stored record never picked up the awaiting-review flag
    let stored = service.store().get_patent(patent.id).await.unwrap();
    assert_eq!(derive_display_status(&stored), DisplayStatus::InProgress);
}

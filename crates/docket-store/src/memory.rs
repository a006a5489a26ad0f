//! In-memory reference implementation of the store traits
//!
//! Backs tests, the CLI's snapshot mode, and local development. Keyed
//! DashMaps per record type plus a tracking-id uniqueness index; list
//! operations return deterministically ordered clones.

use crate::error::StoreError;
use crate::timeline::TimelineLog;
use crate::traits::{EmployeeStore, FerStore, PatentStore, PaymentStore, TimelineStore};
use async_trait::async_trait;
use dashmap::DashMap;
use docket_record::{
    Employee, EmployeeId, EventId, FerEntry, FerEntryId, Patent, PatentId, Payment, PaymentId,
    TimelineEvent, TrackingId,
};

/// DashMap-backed store
#[derive(Debug, Default)]
pub struct MemoryStore {
    patents: DashMap<PatentId, Patent>,
    tracking_index: DashMap<String, PatentId>,
    employees: DashMap<EmployeeId, Employee>,
    fer_entries: DashMap<FerEntryId, FerEntry>,
    payments: DashMap<PaymentId, Payment>,
    timeline: TimelineLog,
}

impl MemoryStore {
    /// Empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify every timeline chain
    pub fn verify_timeline(&self) -> Result<(), StoreError> {
        self.timeline.verify_integrity()
    }
}

#[async_trait]
impl PatentStore for MemoryStore {
    async fn create_patent(&self, patent: Patent) -> Result<Patent, StoreError> {
        use dashmap::mapref::entry::Entry;
        match self.tracking_index.entry(patent.tracking_id.as_str().to_string()) {
            Entry::Occupied(_) => {
                return Err(StoreError::DuplicateTracking(
                    patent.tracking_id.as_str().to_string(),
                ))
            }
            Entry::Vacant(slot) => {
                slot.insert(patent.id);
            }
        }
        self.patents.insert(patent.id, patent.clone());
        Ok(patent)
    }

    async fn get_patent(&self, id: PatentId) -> Result<Patent, StoreError> {
        self.patents
            .get(&id)
            .map(|p| p.value().clone())
            .ok_or_else(|| StoreError::not_found("patent", id))
    }

    async fn find_by_tracking(
        &self,
        tracking: &TrackingId,
    ) -> Result<Option<Patent>, StoreError> {
        let Some(id) = self.tracking_index.get(tracking.as_str()).map(|e| *e) else {
            return Ok(None);
        };
        Ok(self.patents.get(&id).map(|p| p.value().clone()))
    }

    async fn update_patent(&self, patent: Patent) -> Result<Patent, StoreError> {
        let Some(existing) = self.patents.get(&patent.id).map(|p| p.value().clone()) else {
            return Err(StoreError::not_found("patent", patent.id));
        };
        if existing.tracking_id != patent.tracking_id {
            if self.tracking_index.contains_key(patent.tracking_id.as_str()) {
                return Err(StoreError::DuplicateTracking(
                    patent.tracking_id.as_str().to_string(),
                ));
            }
            self.tracking_index.remove(existing.tracking_id.as_str());
            self.tracking_index
                .insert(patent.tracking_id.as_str().to_string(), patent.id);
        }
        self.patents.insert(patent.id, patent.clone());
        Ok(patent)
    }

    async fn delete_patent(&self, id: PatentId) -> Result<(), StoreError> {
        let Some((_, patent)) = self.patents.remove(&id) else {
            return Err(StoreError::not_found("patent", id));
        };
        self.tracking_index.remove(patent.tracking_id.as_str());
        self.fer_entries.retain(|_, e| e.patent_id != id);
        self.payments.retain(|_, p| p.patent_id != id);
        self.timeline.remove_chain(id);
        tracing::debug!(patent = %id, "cascaded delete");
        Ok(())
    }

    async fn list_patents(&self) -> Result<Vec<Patent>, StoreError> {
        let mut patents: Vec<Patent> = self.patents.iter().map(|p| p.value().clone()).collect();
        patents.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(patents)
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn create_employee(&self, employee: Employee) -> Result<Employee, StoreError> {
        self.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn get_employee(&self, id: EmployeeId) -> Result<Employee, StoreError> {
        self.employees
            .get(&id)
            .map(|e| e.value().clone())
            .ok_or_else(|| StoreError::not_found("employee", id))
    }

    async fn find_employee_by_name(
        &self,
        full_name: &str,
    ) -> Result<Option<Employee>, StoreError> {
        Ok(self
            .employees
            .iter()
            .find(|e| e.full_name == full_name)
            .map(|e| e.value().clone()))
    }

    async fn update_employee(&self, employee: Employee) -> Result<Employee, StoreError> {
        if !self.employees.contains_key(&employee.id) {
            return Err(StoreError::not_found("employee", employee.id));
        }
        self.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn delete_employee(&self, id: EmployeeId) -> Result<(), StoreError> {
        self.employees
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("employee", id))
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let mut employees: Vec<Employee> = self.employees.iter().map(|e| e.value().clone()).collect();
        employees.sort_by(|a, b| a.full_name.cmp(&b.full_name).then(a.id.cmp(&b.id)));
        Ok(employees)
    }
}

#[async_trait]
impl FerStore for MemoryStore {
    async fn add_fer_entry(&self, entry: FerEntry) -> Result<FerEntry, StoreError> {
        if !self.patents.contains_key(&entry.patent_id) {
            return Err(StoreError::not_found("patent", entry.patent_id));
        }
        self.fer_entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn update_fer_entry(&self, entry: FerEntry) -> Result<FerEntry, StoreError> {
        if !self.fer_entries.contains_key(&entry.id) {
            return Err(StoreError::not_found("fer entry", entry.id));
        }
        self.fer_entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn delete_fer_entry(&self, id: FerEntryId) -> Result<(), StoreError> {
        self.fer_entries
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("fer entry", id))
    }

    async fn fer_entries_for(&self, patent_id: PatentId) -> Result<Vec<FerEntry>, StoreError> {
        let mut entries: Vec<FerEntry> = self
            .fer_entries
            .iter()
            .filter(|e| e.patent_id == patent_id)
            .map(|e| e.value().clone())
            .collect();
        entries.sort_by_key(|e| e.number);
        Ok(entries)
    }
}

#[async_trait]
impl PaymentStore for MemoryStore {
    async fn record_payment(&self, payment: Payment) -> Result<Payment, StoreError> {
        if !self.patents.contains_key(&payment.patent_id) {
            return Err(StoreError::not_found("patent", payment.patent_id));
        }
        self.payments.insert(payment.id, payment.clone());
        Ok(payment)
    }

    async fn delete_payment(&self, id: PaymentId) -> Result<(), StoreError> {
        self.payments
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("payment", id))
    }

    async fn payments_for(&self, patent_id: PatentId) -> Result<Vec<Payment>, StoreError> {
        let mut payments: Vec<Payment> = self
            .payments
            .iter()
            .filter(|p| p.patent_id == patent_id)
            .map(|p| p.value().clone())
            .collect();
        payments.sort_by(|a, b| a.paid_on.cmp(&b.paid_on).then(a.id.cmp(&b.id)));
        Ok(payments)
    }
}

#[async_trait]
impl TimelineStore for MemoryStore {
    async fn append_event(&self, event: TimelineEvent) -> Result<EventId, StoreError> {
        if !self.patents.contains_key(&event.patent_id) {
            return Err(StoreError::not_found("patent", event.patent_id));
        }
        Ok(self.timeline.append(event))
    }

    async fn events_for(&self, patent_id: PatentId) -> Result<Vec<TimelineEvent>, StoreError> {
        Ok(self.timeline.events_for(patent_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_record::{EventKind, Role};
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn patent(tracking: &str) -> Patent {
        Patent::new(TrackingId::from_str(tracking).unwrap(), "Widget", "Acme")
    }

    #[tokio::test]
    async fn create_and_get_patent() {
        let store = MemoryStore::new();
        let created = store.create_patent(patent("P-600")).await.unwrap();
        let fetched = store.get_patent(created.id).await.unwrap();
        assert_eq!(created, fetched);
    }

    #[tokio::test]
    async fn duplicate_tracking_rejected() {
        let store = MemoryStore::new();
        store.create_patent(patent("P-601")).await.unwrap();

        let result = store.create_patent(patent("P-601")).await;
        assert_eq!(
            result,
            Err(StoreError::DuplicateTracking("P-601".to_string()))
        );
    }

    #[tokio::test]
    async fn find_by_tracking() {
        let store = MemoryStore::new();
        let created = store.create_patent(patent("P-602")).await.unwrap();

        let found = store
            .find_by_tracking(&TrackingId::from_str("P-602").unwrap())
            .await
            .unwrap();
        assert_eq!(found.map(|p| p.id), Some(created.id));

        let missing = store
            .find_by_tracking(&TrackingId::from_str("P-999").unwrap())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn delete_cascades_children() {
        let store = MemoryStore::new();
        let created = store.create_patent(patent("P-603")).await.unwrap();

        store
            .add_fer_entry(FerEntry::new(created.id, 1))
            .await
            .unwrap();
        store
            .record_payment(Payment::new(
                created.id,
                9_000,
                "filing fee",
                chrono::NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            ))
            .await
            .unwrap();
        store
            .append_event(TimelineEvent::new(created.id, EventKind::Created, "created"))
            .await
            .unwrap();

        store.delete_patent(created.id).await.unwrap();

        assert!(store.get_patent(created.id).await.is_err());
        assert!(store.fer_entries_for(created.id).await.unwrap().is_empty());
        assert!(store.payments_for(created.id).await.unwrap().is_empty());
        assert!(store.events_for(created.id).await.unwrap().is_empty());

        // Tracking id is free again
        store.create_patent(patent("P-603")).await.unwrap();
    }

    #[tokio::test]
    async fn employee_lookup_by_name() {
        let store = MemoryStore::new();
        let emp = Employee::new("R. Iyer", Role::Drafter, "iyer@example.com");
        store.create_employee(emp.clone()).await.unwrap();

        let found = store.find_employee_by_name("R. Iyer").await.unwrap();
        assert_eq!(found.map(|e| e.id), Some(emp.id));
        assert!(store.find_employee_by_name("Nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn fer_entries_sorted_by_cycle() {
        let store = MemoryStore::new();
        let created = store.create_patent(patent("P-604")).await.unwrap();
        store.add_fer_entry(FerEntry::new(created.id, 2)).await.unwrap();
        store.add_fer_entry(FerEntry::new(created.id, 1)).await.unwrap();

        let entries = store.fer_entries_for(created.id).await.unwrap();
        let numbers: Vec<u32> = entries.iter().map(|e| e.number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[tokio::test]
    async fn orphan_children_rejected() {
        let store = MemoryStore::new();
        let ghost = PatentId::new();

        assert!(store.add_fer_entry(FerEntry::new(ghost, 1)).await.is_err());
        assert!(store
            .append_event(TimelineEvent::new(ghost, EventKind::Created, "x"))
            .await
            .is_err());
    }
}

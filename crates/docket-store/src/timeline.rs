//! Hash-chained timeline log
//!
//! Events are sealed into a per-patent chain: each entry records the hash
//! of its predecessor, so any rewrite of history is detectable with
//! `verify_integrity`. Chains are independent per patent so a cascade
//! delete removes one chain without disturbing the others.

use crate::error::StoreError;
use docket_record::{EventId, PatentId, TimelineEvent};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// A timeline event sealed into its patent's chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealedEvent {
    /// The immutable event
    pub event: TimelineEvent,
    /// Hash of the preceding entry, zero for the first
    pub prev_hash: [u8; 32],
    /// Hash over this entry's fields and `prev_hash`
    pub hash: [u8; 32],
}

/// Append-only, per-patent hash-chained event log
#[derive(Debug, Default)]
pub struct TimelineLog {
    chains: Mutex<HashMap<PatentId, Vec<SealedEvent>>>,
}

impl TimelineLog {
    /// Empty log
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a log from previously sealed events, preserving order
    ///
    /// No re-hashing happens here; call `verify_integrity` afterwards to
    /// check the chains as loaded.
    #[must_use]
    pub fn from_sealed(events: impl IntoIterator<Item = SealedEvent>) -> Self {
        let log = Self::new();
        {
            let mut chains = log.chains.lock();
            for sealed in events {
                chains.entry(sealed.event.patent_id).or_default().push(sealed);
            }
        }
        log
    }

    /// Sealed entries across all chains, grouped per patent
    #[must_use]
    pub fn sealed_events(&self) -> Vec<SealedEvent> {
        let chains = self.chains.lock();
        let mut out: Vec<SealedEvent> = Vec::with_capacity(chains.values().map(Vec::len).sum());
        let mut ids: Vec<_> = chains.keys().copied().collect();
        ids.sort_unstable();
        for id in ids {
            out.extend(chains[&id].iter().cloned());
        }
        out
    }

    /// Seal and append an event to its patent's chain
    pub fn append(&self, event: TimelineEvent) -> EventId {
        let mut chains = self.chains.lock();
        let chain = chains.entry(event.patent_id).or_default();
        let prev_hash = chain.last().map_or([0u8; 32], |e| e.hash);
        let hash = compute_hash(&event, &prev_hash);
        let id = event.id;
        chain.push(SealedEvent {
            event,
            prev_hash,
            hash,
        });
        id
    }

    /// Events for one patent, oldest first
    #[must_use]
    pub fn events_for(&self, patent_id: PatentId) -> Vec<TimelineEvent> {
        self.chains
            .lock()
            .get(&patent_id)
            .map(|chain| chain.iter().map(|e| e.event.clone()).collect())
            .unwrap_or_default()
    }

    /// Drop a patent's whole chain (cascade delete)
    pub fn remove_chain(&self, patent_id: PatentId) {
        self.chains.lock().remove(&patent_id);
    }

    /// Number of events across all chains
    #[must_use]
    pub fn len(&self) -> usize {
        self.chains.lock().values().map(Vec::len).sum()
    }

    /// Whether the log holds no events
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Verify every chain end to end
    pub fn verify_integrity(&self) -> Result<(), StoreError> {
        let chains = self.chains.lock();
        for (patent_id, chain) in chains.iter() {
            let mut prev = [0u8; 32];
            for sealed in chain {
                if sealed.prev_hash != prev {
                    return Err(StoreError::IntegrityViolation(patent_id.to_string()));
                }
                if compute_hash(&sealed.event, &sealed.prev_hash) != sealed.hash {
                    return Err(StoreError::IntegrityViolation(patent_id.to_string()));
                }
                prev = sealed.hash;
            }
        }
        Ok(())
    }
}

fn compute_hash(event: &TimelineEvent, prev_hash: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(event.id.to_string().as_bytes());
    hasher.update(event.patent_id.to_string().as_bytes());
    hasher.update(event.description.as_bytes());
    hasher.update([0]);
    hasher.update(event.actor.as_deref().unwrap_or("").as_bytes());
    hasher.update([0]);
    hasher.update(event.at.to_rfc3339().as_bytes());
    hasher.update(prev_hash);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_record::EventKind;

    #[test]
    fn append_and_read_back() {
        let log = TimelineLog::new();
        let patent_id = PatentId::new();

        log.append(TimelineEvent::new(patent_id, EventKind::Created, "created"));
        log.append(TimelineEvent::new(patent_id, EventKind::Assigned, "assigned"));

        let events = log.events_for(patent_id);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].description, "created");
        assert_eq!(events[1].description, "assigned");
    }

    #[test]
    fn chains_are_independent() {
        let log = TimelineLog::new();
        let a = PatentId::new();
        let b = PatentId::new();

        log.append(TimelineEvent::new(a, EventKind::Created, "a created"));
        log.append(TimelineEvent::new(b, EventKind::Created, "b created"));
        log.remove_chain(a);

        assert!(log.events_for(a).is_empty());
        assert_eq!(log.events_for(b).len(), 1);
        log.verify_integrity().unwrap();
    }

    #[test]
    fn integrity_verifies_fresh_chains() {
        let log = TimelineLog::new();
        let patent_id = PatentId::new();
        for i in 0..5 {
            log.append(TimelineEvent::new(
                patent_id,
                EventKind::Assigned,
                format!("event {i}"),
            ));
        }
        log.verify_integrity().unwrap();
    }

    #[test]
    fn tampering_is_detected() {
        let log = TimelineLog::new();
        let patent_id = PatentId::new();
        log.append(TimelineEvent::new(patent_id, EventKind::Created, "created"));
        log.append(TimelineEvent::new(patent_id, EventKind::Withdrawn, "withdrawn"));

        {
            let mut chains = log.chains.lock();
            let chain = chains.get_mut(&patent_id).unwrap();
            chain[0].event.description = "rewritten".to_string();
        }

        assert!(matches!(
            log.verify_integrity(),
            Err(StoreError::IntegrityViolation(_))
        ));
    }
}

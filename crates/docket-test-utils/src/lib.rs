//! Testing utilities for the docket workspace
//!
//! Shared fixtures: employees per role, patents at chosen pipeline
//! positions, seeded stores.

#![allow(missing_docs)]

use chrono::NaiveDate;
use docket_record::{
    Employee, Patent, Role, StageId, SubStageKind, TrackingId,
};
use docket_store::MemoryStore;
use std::str::FromStr;

pub fn admin() -> Employee {
    Employee::new("M. Desai", Role::Admin, "desai@example.com")
}

pub fn drafter() -> Employee {
    Employee::new("R. Iyer", Role::Drafter, "iyer@example.com")
}

pub fn filer() -> Employee {
    Employee::new("A. Rao", Role::Filer, "rao@example.com")
}

pub fn tracking(s: &str) -> TrackingId {
    TrackingId::from_str(s).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn create_patent(tracking_id: &str) -> Patent {
    Patent::new(tracking(tracking_id), "Widget", "Acme")
}

/// Patent with PS drafting assigned to the standard drafter fixture
pub fn create_assigned_patent(tracking_id: &str) -> Patent {
    let mut patent = create_patent(tracking_id);
    patent.sub_stage_mut(StageId::Ps, SubStageKind::Drafting).assignee =
        Some(drafter().full_name);
    patent.sub_stage_mut(StageId::Ps, SubStageKind::Filing).assignee =
        Some(filer().full_name);
    patent
}

/// Patent with the first `steps` sub-stages completed, in traversal order
/// PS drafting, PS filing, CS drafting, CS filing, FER drafting, FER filing
pub fn create_patent_at(tracking_id: &str, steps: usize) -> Patent {
    let order = [
        (StageId::Ps, SubStageKind::Drafting),
        (StageId::Ps, SubStageKind::Filing),
        (StageId::Cs, SubStageKind::Drafting),
        (StageId::Cs, SubStageKind::Filing),
        (StageId::Fer, SubStageKind::Drafting),
        (StageId::Fer, SubStageKind::Filing),
    ];
    let mut patent = create_patent(tracking_id);
    if steps > 4 {
        patent.fer_active = true;
    }
    for (id, kind) in order.into_iter().take(steps) {
        patent.sub_stage_mut(id, kind).completed = true;
    }
    patent
}

pub fn empty_store() -> MemoryStore {
    MemoryStore::new()
}

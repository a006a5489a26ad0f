//! Docket Record - Typed case-management records
//!
//! Defines the fundamental records for the docket workspace:
//! - Patent records with PS/CS/FER sub-stage state and owned inventors
//! - Employees and roles
//! - FER entry and payment child records
//! - Immutable timeline events
//! - Statutory form tracking

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod employee;
pub mod fer;
pub mod forms;
pub mod id;
pub mod patent;
pub mod payment;
pub mod stage;
pub mod timeline;

// Re-exports for convenience
pub use employee::{Employee, Role};
pub use fer::FerEntry;
pub use forms::{FormId, FormSet};
pub use id::{
    EmployeeId, EventId, FerEntryId, PatentId, PaymentId, TrackingId, TrackingIdError,
};
pub use patent::{Inventor, Patent};
pub use payment::Payment;
pub use stage::{StageId, StagePair, SubStage, SubStageKind};
pub use timeline::{EventKind, TimelineEvent};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with docket records
    pub use crate::{
        Employee, EventKind, FerEntry, FormId, FormSet, Inventor, Patent, PatentId, Payment, Role,
        StageId, SubStageKind, TimelineEvent, TrackingId,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Docket Store - Persistence collaborator
//!
//! Repository traits the service layer consumes, an in-memory reference
//! implementation, and the hash-chained append-only timeline log.
//!
//! The hosted backend is an opaque external collaborator; anything
//! implementing [`Store`] can stand in for it. Mutations are discrete
//! asynchronous requests; idempotency and retry are the caller's concern.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod memory;
pub mod timeline;
pub mod traits;

// Re-exports for convenience
pub use error::StoreError;
pub use memory::MemoryStore;
pub use timeline::{SealedEvent, TimelineLog};
pub use traits::{EmployeeStore, FerStore, PatentStore, PaymentStore, Store, TimelineStore};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Docket Service - Orchestration layer
//!
//! The mutation pipeline consumed by presentation code:
//! - Authorization-gated stage mutations (two-step completion protocol)
//! - Patent lifecycle (create with inventors, withdraw, cascade delete)
//! - FER cycles, payments, statutory forms
//! - Bulk-upload ingress with per-row validation
//! - Aggregate reporting over the store
//!
//! # Example
//!
//! ```rust,ignore
//! use docket_service::{DocketService, ServiceConfig};
//! use docket_store::MemoryStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = DocketService::new(ServiceConfig::new(), MemoryStore::new());
//! let summary = service.summary().await?;
//! println!("{} patents tracked", summary.total);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod import;
pub mod service;

// Re-exports for convenience
pub use config::ServiceConfig;
pub use error::ServiceError;
pub use import::{build_patent, ImportReport, ImportRow, RowError};
pub use service::{DocketService, NewPatent};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the docket service
    pub use crate::{
        DocketService, ImportReport, ImportRow, NewPatent, ServiceConfig, ServiceError,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

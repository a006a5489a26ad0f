//! Docket Engine - Workflow state logic
//!
//! The pure core of the docket workspace:
//! - Derives a patent's pipeline stage and display status from its flags
//! - Validates and applies the two-step completion protocol
//! - Gates mutations through the row-level authorization predicate
//! - Computes aggregate statistics over patent collections
//!
//! Every function here is synchronous, reentrant, and free of I/O; the
//! acting employee and the current date are always passed in explicitly.
//!
//! # Example
//!
//! ```rust
//! use docket_engine::{derive_stage, Stage};
//! use docket_record::{Patent, TrackingId};
//! use std::str::FromStr;
//!
//! let patent = Patent::new(
//!     TrackingId::from_str("P-001").unwrap(),
//!     "Heat exchanger",
//!     "Acme Thermal",
//! );
//! assert_eq!(derive_stage(&patent), Stage::PsDrafting);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod authz;
pub mod error;
pub mod stage;
pub mod stats;
pub mod status;
pub mod transition;

// Re-exports for convenience
pub use authz::{can_mutate_stage, StageAction};
pub use error::EngineError;
pub use stage::{current_step, derive_stage, Stage, StageStep, STAGE_STEPS};
pub use stats::{
    conversion_stats, deadlines_within, group_by_state, summary_stats, ConversionStats,
    StateDistribution, SummaryStats,
};
pub use status::{derive_display_status, terminal_status, DisplayStatus};
pub use transition::{
    apply_approve, apply_mark_done, apply_reject, validate_approve, validate_mark_done,
    validate_reject,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the workflow engine
    pub use crate::{
        apply_approve, apply_mark_done, apply_reject, can_mutate_stage, conversion_stats,
        deadlines_within, derive_display_status, derive_stage, group_by_state, summary_stats,
        DisplayStatus, EngineError, Stage, StageAction,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

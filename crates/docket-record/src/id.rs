//! Identifier newtypes for docket records
//!
//! All primary identifiers are ULIDs (sortable, collision-free). The
//! human-facing `TrackingId` is a validated string supplied by the filing
//! organisation, unique per patent.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ulid::Ulid;

macro_rules! ulid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub Ulid);

        impl $name {
            /// Generate a fresh identifier
            #[inline]
            #[must_use]
            pub fn new() -> Self {
                Self(Ulid::new())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

ulid_id! {
    /// Unique patent identifier
    PatentId
}

ulid_id! {
    /// Unique employee identifier
    EmployeeId
}

ulid_id! {
    /// Unique FER entry identifier
    FerEntryId
}

ulid_id! {
    /// Unique payment identifier
    PaymentId
}

ulid_id! {
    /// Unique timeline event identifier
    EventId
}

/// Human-facing tracking identifier, unique per patent
///
/// Assigned by the organisation (not the backend) and printed on every
/// docket sheet, so it must be non-empty and free of whitespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingId(String);

impl TrackingId {
    /// View as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TrackingId {
    type Err = TrackingIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TrackingIdError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(TrackingIdError::ContainsWhitespace(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl std::fmt::Display for TrackingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tracking identifier validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackingIdError {
    /// Empty or all-whitespace input
    #[error("tracking id is empty")]
    Empty,

    /// Interior whitespace
    #[error("tracking id contains whitespace: {0:?}")]
    ContainsWhitespace(String),
}

//! Service configuration

use serde::{Deserialize, Serialize};

/// Tunables for the service layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Deadline-proximity window in days (inclusive endpoints)
    pub deadline_window_days: u32,
    /// Maximum rows accepted per bulk upload
    pub max_batch_rows: usize,
}

impl ServiceConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a deadline window
    #[inline]
    #[must_use]
    pub fn with_deadline_window(mut self, days: u32) -> Self {
        self.deadline_window_days = days;
        self
    }

    /// With a batch size limit
    #[inline]
    #[must_use]
    pub fn with_max_batch_rows(mut self, rows: usize) -> Self {
        self.max_batch_rows = rows;
        self
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            deadline_window_days: 7,
            max_batch_rows: 500,
        }
    }
}

//! Payment child records

use crate::id::{PatentId, PaymentId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A fee payment recorded against a patent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Payment identifier
    pub id: PaymentId,
    /// Owning patent
    pub patent_id: PatentId,
    /// Amount in minor currency units
    pub amount: i64,
    /// What the fee covers (filing fee, examination fee, ...)
    pub purpose: String,
    /// Payment date
    pub paid_on: NaiveDate,
    /// Whether receipt has been confirmed
    pub received: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Record a payment against a patent
    #[inline]
    #[must_use]
    pub fn new(
        patent_id: PatentId,
        amount: i64,
        purpose: impl Into<String>,
        paid_on: NaiveDate,
    ) -> Self {
        Self {
            id: PaymentId::new(),
            patent_id,
            amount,
            purpose: purpose.into(),
            paid_on,
            received: false,
            created_at: Utc::now(),
        }
    }

    /// Mark receipt confirmed
    #[inline]
    #[must_use]
    pub fn received(mut self) -> Self {
        self.received = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_builder() {
        let patent_id = PatentId::new();
        let date = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let payment = Payment::new(patent_id, 160_000, "examination fee", date).received();

        assert_eq!(payment.patent_id, patent_id);
        assert_eq!(payment.amount, 160_000);
        assert!(payment.received);
    }
}

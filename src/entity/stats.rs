use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TransactionStatus;

/// Per-status tally, shared by dashboard stats and seed reports
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusDistribution {
    pub confirmed: u64,
    pub pending: u64,
    pub failed: u64,
}

impl StatusDistribution {
    pub fn record(&mut self, status: TransactionStatus) {
        match status {
            TransactionStatus::Confirmed => self.confirmed += 1,
            TransactionStatus::Pending => self.pending += 1,
            TransactionStatus::Failed => self.failed += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.confirmed + self.pending + self.failed
    }
}

/// Aggregated dashboard figures
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionStats {
    pub total_transactions: u64,
    pub total_volume: Decimal,
    pub average_amount: Decimal,
    /// Percentage of confirmed records
    pub success_rate: Decimal,
    pub distribution: StatusDistribution,
}

/// Outcome of a seed run
#[derive(Debug, Clone, PartialEq)]
pub struct SeedReport {
    pub message: String,
    pub count: u64,
    /// `None` when the store was already populated
    pub distribution: Option<StatusDistribution>,
}

use crate::entity::TransactionStats;
use crate::utils::format_fixed;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsView {
    pub total_transactions: u64,
    pub total_volume: String,
    pub average_amount: String,
    pub success_rate: String,
    pub pending_count: u64,
    pub confirmed_count: u64,
    pub failed_count: u64,
}

impl From<&TransactionStats> for StatsView {
    fn from(stats: &TransactionStats) -> Self {
        Self {
            total_transactions: stats.total_transactions,
            total_volume: format_fixed(stats.total_volume, 8),
            average_amount: format_fixed(stats.average_amount, 8),
            success_rate: format_fixed(stats.success_rate, 2),
            pending_count: stats.distribution.pending,
            confirmed_count: stats.distribution.confirmed,
            failed_count: stats.distribution.failed,
        }
    }
}

use crate::entity::{AppResult, StatusDistribution, Transaction, TransactionStats};
use crate::repositories::TransactionRepository;
use crate::utils::amount_or_zero;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;

#[async_trait]
pub trait StatsInteractor: Send + Sync {
    async fn get_stats(&self) -> AppResult<TransactionStats>;
}

pub struct StatsInteractorImpl {
    repository: Arc<dyn TransactionRepository>,
}

impl StatsInteractorImpl {
    pub fn new(repository: Arc<dyn TransactionRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl StatsInteractor for StatsInteractorImpl {
    async fn get_stats(&self) -> AppResult<TransactionStats> {
        let transactions = self.repository.find_all().await?;
        Ok(compute_stats(&transactions))
    }
}

pub fn compute_stats(transactions: &[Transaction]) -> TransactionStats {
    let mut distribution = StatusDistribution::default();
    let mut total_volume = Decimal::ZERO;

    for tx in transactions {
        distribution.record(tx.status);
        total_volume = total_volume.saturating_add(amount_or_zero(&tx.amount));
    }

    let total = transactions.len() as u64;
    let (average_amount, success_rate) = if total > 0 {
        (
            total_volume / Decimal::from(total),
            Decimal::from(distribution.confirmed) / Decimal::from(total) * Decimal::ONE_HUNDRED,
        )
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    TransactionStats {
        total_transactions: total,
        total_volume,
        average_amount,
        success_rate,
        distribution,
    }
}

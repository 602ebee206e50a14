//! Sample data generator for an empty store.
//!
//! Addresses, amounts and gas figures are derived from the item index, so two
//! runs produce the same templates. Hashes, sender addresses and the final
//! status are random.

use crate::entity::{
    AppResult, NewTransaction, SeedReport, StatusDistribution, Transaction, TransactionStatus,
};
use crate::interactor::transaction_interactor::mint_transaction;
use crate::repositories::{SeedOutcome, TransactionRepository};
use crate::services::ConfirmationScheduler;
use crate::utils::is_positive_amount;
use async_trait::async_trait;
use log::info;
use rand::Rng;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::Mutex;

pub const DEFAULT_SEED_COUNT: usize = 100;

const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

const ADDRESS_SEEDS: [u64; 88] = [
    0x742d35, 0x8ba1f1, 0x123456, 0xabcdef, 0x987654, 0x111111, 0x222222, 0x333333,
    0x444444, 0x555555, 0x666666, 0x777777, 0x888888, 0x999999, 0xaaaaaa, 0xbbbbbb,
    0xcccccc, 0xdddddd, 0xeeeeee, 0xffffff, 0x1a2b3c, 0x4d5e6f, 0x789abc, 0xdef012,
    0x345678, 0x9abcde, 0xf01234, 0x567890, 0xabcdef, 0x012345, 0x6789ab, 0xcdef01,
    0x234567, 0x89abcd, 0xef0123, 0x456789, 0xbcdef0, 0x123456, 0x789abc, 0xdef012,
    0x345678, 0x9abcde, 0xf01234, 0x567890, 0xabcdef, 0x012345, 0x6789ab, 0xcdef01,
    0x234567, 0x89abcd, 0xef0123, 0x456789, 0xbcdef0, 0x123456, 0x789abc, 0xdef012,
    0x345678, 0x9abcde, 0xf01234, 0x567890, 0xabcdef, 0x012345, 0x6789ab, 0xcdef01,
    0x234567, 0x89abcd, 0xef0123, 0x456789, 0xbcdef0, 0x123456, 0x789abc, 0xdef012,
    0x345678, 0x9abcde, 0xf01234, 0x567890, 0xabcdef, 0x012345, 0x6789ab, 0xcdef01,
    0x234567, 0x89abcd, 0xef0123, 0x456789, 0xbcdef0, 0x123456, 0x789abc, 0xdef012,
];

// Base amounts in hundredths
const BASE_AMOUNT_CENTS: [i64; 20] = [
    10, 15, 25, 30, 45, 50, 60, 70, 80, 120, 150, 190, 230, 250, 280, 310, 370, 450, 500, 620,
];

const GAS_PRICES: [&str; 5] = [
    "0.00000002",
    "0.00000003",
    "0.00000004",
    "0.00000005",
    "0.00000006",
];

const BASE_GAS_LIMIT: u64 = 21000;

/// Deterministic pseudo-address: char k is HEX[floor((seed + k) * 7.3) mod 16]
pub fn generate_address(seed: u64) -> String {
    let mut address = String::with_capacity(42);
    address.push_str("0x");
    for k in 0..40u64 {
        let idx = (((seed + k) as f64) * 7.3).floor() as u64 % HEX_CHARS.len() as u64;
        address.push(HEX_CHARS[idx as usize] as char);
    }
    address
}

pub fn seed_amount(index: usize, pattern: usize) -> Decimal {
    let cents = BASE_AMOUNT_CENTS[pattern % BASE_AMOUNT_CENTS.len()] + (index % 10) as i64;
    Decimal::new(cents, 2)
}

pub fn seed_gas_limit(amount: Decimal) -> u64 {
    if amount > Decimal::from(5) {
        BASE_GAS_LIMIT * 3 / 2
    } else if amount > Decimal::from(2) {
        BASE_GAS_LIMIT * 6 / 5
    } else {
        BASE_GAS_LIMIT
    }
}

pub fn seed_gas_price(index: usize) -> &'static str {
    GAS_PRICES[index % GAS_PRICES.len()]
}

/// Tiered status distribution; `roll` is a uniform sample in [0, 1)
pub fn pick_status(amount: Decimal, roll: f64) -> TransactionStatus {
    let (confirmed, pending) = if amount > Decimal::from(5) {
        (0.70, 0.95)
    } else if amount > Decimal::from(2) {
        (0.60, 0.90)
    } else {
        (0.55, 0.90)
    };

    if roll < confirmed {
        TransactionStatus::Confirmed
    } else if roll < pending {
        TransactionStatus::Pending
    } else {
        TransactionStatus::Failed
    }
}

/// Creation input for item `index`
pub fn seed_template(index: usize) -> NewTransaction {
    let address_seed = ADDRESS_SEEDS[index % ADDRESS_SEEDS.len()];
    let amount = seed_amount(index, index % BASE_AMOUNT_CENTS.len());

    NewTransaction {
        to_address: generate_address(address_seed + index as u64),
        amount: format!("{:.2}", amount),
        gas_limit: Some(seed_gas_limit(amount).to_string()),
        gas_price: Some(seed_gas_price(index).to_string()),
    }
}

/// Fully formed seed records, skipping templates that fail basic checks
pub fn build_seed_batch<R: Rng>(rng: &mut R, count: usize) -> Vec<Transaction> {
    (0..count)
        .map(seed_template)
        .filter(|template| !template.to_address.is_empty() && is_positive_amount(&template.amount))
        .map(|template| {
            let amount = Decimal::from_str_exact(&template.amount).unwrap_or(Decimal::ZERO);
            let status = pick_status(amount, rng.random::<f64>());
            mint_transaction(&mut *rng, template, status)
        })
        .collect()
}

#[async_trait]
pub trait SeedInteractor: Send + Sync {
    async fn seed_data(&self) -> AppResult<SeedReport>;
}

pub struct SeedInteractorImpl {
    repository: Arc<dyn TransactionRepository>,
    scheduler: ConfirmationScheduler,
    seed_count: usize,
    // Serializes seed runs within this process
    seed_lock: Mutex<()>,
}

impl SeedInteractorImpl {
    pub fn new(
        repository: Arc<dyn TransactionRepository>,
        scheduler: ConfirmationScheduler,
        seed_count: usize,
    ) -> Self {
        Self {
            repository,
            scheduler,
            seed_count,
            seed_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl SeedInteractor for SeedInteractorImpl {
    async fn seed_data(&self) -> AppResult<SeedReport> {
        let _guard = self.seed_lock.lock().await;

        let batch = build_seed_batch(&mut rand::rng(), self.seed_count);
        let stored = match self.repository.seed_if_empty(batch).await? {
            SeedOutcome::Skipped(existing) => {
                info!("Store already has {} transactions, skipping seed", existing);
                return Ok(SeedReport {
                    message: format!(
                        "Database already has {} transactions. Skipping seed.",
                        existing
                    ),
                    count: existing,
                    distribution: None,
                });
            }
            SeedOutcome::Inserted(stored) => stored,
        };

        let mut distribution = StatusDistribution::default();
        for tx in &stored {
            distribution.record(tx.status);
            if tx.status == TransactionStatus::Pending {
                self.scheduler.schedule(tx.id);
            }
        }

        let created = distribution.total();
        let message = format!(
            "Seeded {} transactions ({} confirmed, {} pending, {} failed)",
            created, distribution.confirmed, distribution.pending, distribution.failed
        );
        info!("{}", message);

        Ok(SeedReport {
            message,
            count: created,
            distribution: Some(distribution),
        })
    }
}

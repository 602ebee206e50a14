use crate::entity::{AppError, AppResult, NewTransaction, Transaction, TransactionStatus};
use crate::listing::{self, Listing, ListingQuery};
use crate::repositories::TransactionRepository;
use crate::services::ConfirmationScheduler;
use crate::utils::{is_positive_amount, random_hex, shorten_address, validate_eth_address};
use async_trait::async_trait;
use log::info;
use rand::Rng;
use std::sync::Arc;
use uuid::Uuid;

const HASH_BYTES: usize = 32;
const ADDRESS_BYTES: usize = 20;

#[async_trait]
pub trait TransactionInteractor: Send + Sync {
    async fn create(&self, input: NewTransaction) -> AppResult<Transaction>;
    async fn find_all(&self) -> AppResult<Vec<Transaction>>;
    async fn find_one(&self, id: &str) -> AppResult<Transaction>;
    async fn list(&self, query: &ListingQuery) -> AppResult<Listing>;
    async fn count(&self) -> AppResult<u64>;
}

pub struct TransactionInteractorImpl {
    repository: Arc<dyn TransactionRepository>,
    scheduler: ConfirmationScheduler,
}

impl TransactionInteractorImpl {
    pub fn new(repository: Arc<dyn TransactionRepository>, scheduler: ConfirmationScheduler) -> Self {
        Self {
            repository,
            scheduler,
        }
    }
}

/// Build a record with a random hash and sender address
pub fn mint_transaction<R: Rng>(
    rng: &mut R,
    input: NewTransaction,
    status: TransactionStatus,
) -> Transaction {
    let hash = random_hex(rng, HASH_BYTES);
    let from_address = random_hex(rng, ADDRESS_BYTES);
    Transaction::new(hash, from_address, input, status)
}

fn validate_input(input: &NewTransaction) -> AppResult<()> {
    if !validate_eth_address(&input.to_address) {
        return Err(AppError::Validation(
            "toAddress must be a valid Ethereum address".to_string(),
        ));
    }
    if !is_positive_amount(&input.amount) {
        return Err(AppError::Validation(
            "amount must be a positive number".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl TransactionInteractor for TransactionInteractorImpl {
    async fn create(&self, input: NewTransaction) -> AppResult<Transaction> {
        validate_input(&input)?;
        let input = NewTransaction {
            amount: input.amount.trim().to_string(),
            ..input
        };

        let tx = mint_transaction(&mut rand::rng(), input, TransactionStatus::Pending);
        self.repository.insert(&tx).await?;

        info!(
            "Created transaction {} from {} to {} for {}",
            tx.id,
            shorten_address(&tx.from_address),
            shorten_address(&tx.to_address),
            tx.amount
        );

        self.scheduler.schedule(tx.id);
        Ok(tx)
    }

    async fn find_all(&self) -> AppResult<Vec<Transaction>> {
        self.repository.find_all().await
    }

    async fn find_one(&self, id: &str) -> AppResult<Transaction> {
        let uuid = Uuid::parse_str(id).map_err(|_| AppError::transaction_not_found(id))?;

        self.repository
            .find_by_id(uuid)
            .await?
            .ok_or_else(|| AppError::transaction_not_found(id))
    }

    async fn list(&self, query: &ListingQuery) -> AppResult<Listing> {
        let all = self.repository.find_all().await?;
        Ok(listing::run(all, query))
    }

    async fn count(&self) -> AppResult<u64> {
        self.repository.count().await
    }
}

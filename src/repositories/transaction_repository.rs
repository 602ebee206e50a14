use crate::entity::{AppError, AppResult, Transaction, TransactionStatus};
use crate::interactor::db;
use async_trait::async_trait;
use chrono::Utc;
use log::warn;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Result of a guarded bulk insert into an empty store
#[derive(Debug, Clone, PartialEq)]
pub enum SeedOutcome {
    /// The store already held this many records, nothing was written
    Skipped(u64),
    /// Records that made it into the store
    Inserted(Vec<Transaction>),
}

/// Storage for transaction records
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Number of stored transactions
    async fn count(&self) -> AppResult<u64>;

    /// Store a new record; fails with `DuplicateHash` if the hash is taken
    async fn insert(&self, tx: &Transaction) -> AppResult<()>;

    /// All records, newest first
    async fn find_all(&self) -> AppResult<Vec<Transaction>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Transaction>>;

    /// Set a new status and bump `updated_at`
    async fn update_status(
        &self,
        id: Uuid,
        status: TransactionStatus,
    ) -> AppResult<Option<Transaction>>;

    /// Store `batch` only if the store is empty. A record that fails to
    /// insert is skipped with a warning.
    async fn seed_if_empty(&self, batch: Vec<Transaction>) -> AppResult<SeedOutcome> {
        let existing = self.count().await?;
        if existing > 0 {
            return Ok(SeedOutcome::Skipped(existing));
        }

        let mut stored = Vec::with_capacity(batch.len());
        for tx in batch {
            match self.insert(&tx).await {
                Ok(()) => stored.push(tx),
                Err(e) => warn!("Skipping seed transaction {}: {}", tx.hash, e),
            }
        }
        Ok(SeedOutcome::Inserted(stored))
    }
}

/// PostgreSQL-backed repository
pub struct PgTransactionRepository {
    db_pool: Arc<PgPool>,
}

impl PgTransactionRepository {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl TransactionRepository for PgTransactionRepository {
    async fn count(&self) -> AppResult<u64> {
        let count = db::count_transactions(&self.db_pool).await?;
        Ok(count.max(0) as u64)
    }

    async fn insert(&self, tx: &Transaction) -> AppResult<()> {
        match db::insert_transaction(&self.db_pool, tx).await {
            Ok(()) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                warn!("Rejected duplicate transaction hash {}", tx.hash);
                Err(AppError::DuplicateHash(tx.hash.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_all(&self) -> AppResult<Vec<Transaction>> {
        Ok(db::get_all_transactions(&self.db_pool).await?)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Transaction>> {
        Ok(db::get_transaction_by_id(&self.db_pool, id).await?)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: TransactionStatus,
    ) -> AppResult<Option<Transaction>> {
        Ok(db::update_transaction_status(&self.db_pool, id, status).await?)
    }

    // Check and inserts share one transaction under an advisory lock, so
    // concurrent seeds across server instances write a single batch
    async fn seed_if_empty(&self, batch: Vec<Transaction>) -> AppResult<SeedOutcome> {
        Ok(db::seed_transactions_if_empty(&self.db_pool, batch).await?)
    }
}

/// Process-local repository used when no database is configured and in tests
#[derive(Default)]
pub struct InMemoryTransactionRepository {
    transactions: Mutex<HashMap<Uuid, Transaction>>,
}

impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, HashMap<Uuid, Transaction>>> {
        self.transactions
            .lock()
            .map_err(|_| AppError::Internal("transaction store lock poisoned".to_string()))
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn count(&self) -> AppResult<u64> {
        Ok(self.lock()?.len() as u64)
    }

    async fn insert(&self, tx: &Transaction) -> AppResult<()> {
        let mut store = self.lock()?;
        if store.values().any(|existing| existing.hash == tx.hash) {
            warn!("Rejected duplicate transaction hash {}", tx.hash);
            return Err(AppError::DuplicateHash(tx.hash.clone()));
        }
        store.insert(tx.id, tx.clone());
        Ok(())
    }

    async fn find_all(&self) -> AppResult<Vec<Transaction>> {
        let mut all: Vec<Transaction> = self.lock()?.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Transaction>> {
        Ok(self.lock()?.get(&id).cloned())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: TransactionStatus,
    ) -> AppResult<Option<Transaction>> {
        let mut store = self.lock()?;
        Ok(store.get_mut(&id).map(|tx| {
            tx.status = status;
            tx.updated_at = Utc::now();
            tx.clone()
        }))
    }
}

use crate::entity::{Transaction, TransactionStatus};
use crate::repositories::SeedOutcome;
use chrono::Utc;
use log::{debug, info, warn};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Error as SqlxError, PgPool, Postgres, Row};
use uuid::Uuid;

const INSERT_TRANSACTION: &str =
    "INSERT INTO transactions (id, hash, from_address, to_address, amount, status, gas_limit, gas_price, created_at, updated_at) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)";

const INSERT_TRANSACTION_IF_NEW: &str =
    "INSERT INTO transactions (id, hash, from_address, to_address, amount, status, gas_limit, gas_price, created_at, updated_at) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) ON CONFLICT (hash) DO NOTHING";

// Advisory lock key serializing seed runs
const SEED_LOCK_KEY: i64 = 0x7478_626f_6172_64;

fn bind_transaction<'q>(sql: &'q str, tx: &'q Transaction) -> Query<'q, Postgres, PgArguments> {
    sqlx::query(sql)
        .bind(tx.id)
        .bind(&tx.hash)
        .bind(&tx.from_address)
        .bind(&tx.to_address)
        .bind(&tx.amount)
        .bind(tx.status.as_str())
        .bind(tx.gas_limit.as_deref())
        .bind(tx.gas_price.as_deref())
        .bind(tx.created_at)
        .bind(tx.updated_at)
}

// Count all stored transactions
pub async fn count_transactions(pool: &PgPool) -> Result<i64, SqlxError> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM transactions")
        .fetch_one(pool)
        .await?;

    let count: i64 = row.try_get("count")?;
    Ok(count)
}

// Insert a transaction record
pub async fn insert_transaction(pool: &PgPool, tx: &Transaction) -> Result<(), SqlxError> {
    bind_transaction(INSERT_TRANSACTION, tx)
        .execute(pool)
        .await?;

    debug!("Inserted transaction {} ({})", tx.id, tx.hash);
    Ok(())
}

// Get all transactions, newest first
pub async fn get_all_transactions(pool: &PgPool) -> Result<Vec<Transaction>, SqlxError> {
    let rows = sqlx::query("SELECT * FROM transactions ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;

    let mut transactions = Vec::with_capacity(rows.len());
    for row in rows {
        transactions.push(transaction_from_row(&row)?);
    }

    Ok(transactions)
}

// Get a single transaction by id
pub async fn get_transaction_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<Transaction>, SqlxError> {
    let row = sqlx::query("SELECT * FROM transactions WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.map(|row| transaction_from_row(&row)).transpose()
}

// Update transaction status and return the updated record
pub async fn update_transaction_status(
    pool: &PgPool,
    id: Uuid,
    status: TransactionStatus,
) -> Result<Option<Transaction>, SqlxError> {
    let row = sqlx::query(
        "UPDATE transactions SET status = $1, updated_at = $2 WHERE id = $3 RETURNING *",
    )
    .bind(status.as_str())
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await?;

    if row.is_some() {
        info!("Updated transaction {} status to {}", id, status);
    }

    row.map(|row| transaction_from_row(&row)).transpose()
}

// Insert a seed batch only when the table is empty. Duplicate hashes are
// skipped; any other error rolls the whole batch back.
pub async fn seed_transactions_if_empty(
    pool: &PgPool,
    batch: Vec<Transaction>,
) -> Result<SeedOutcome, SqlxError> {
    let mut db_tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SEED_LOCK_KEY)
        .execute(&mut *db_tx)
        .await?;

    let row = sqlx::query("SELECT COUNT(*) as count FROM transactions")
        .fetch_one(&mut *db_tx)
        .await?;
    let existing: i64 = row.try_get("count")?;
    if existing > 0 {
        db_tx.rollback().await?;
        return Ok(SeedOutcome::Skipped(existing as u64));
    }

    let mut stored = Vec::with_capacity(batch.len());
    for tx in batch {
        let result = bind_transaction(INSERT_TRANSACTION_IF_NEW, &tx)
            .execute(&mut *db_tx)
            .await?;
        if result.rows_affected() == 1 {
            stored.push(tx);
        } else {
            warn!("Skipping seed transaction {}: hash already exists", tx.hash);
        }
    }

    db_tx.commit().await?;
    debug!("Seeded {} transactions in one database transaction", stored.len());
    Ok(SeedOutcome::Inserted(stored))
}

fn transaction_from_row(row: &PgRow) -> Result<Transaction, SqlxError> {
    let status: String = row.try_get("status")?;
    let status = status
        .parse::<TransactionStatus>()
        .map_err(|e| SqlxError::Decode(e.into()))?;

    Ok(Transaction {
        id: row.try_get("id")?,
        hash: row.try_get("hash")?,
        from_address: row.try_get("from_address")?,
        to_address: row.try_get("to_address")?,
        amount: row.try_get("amount")?,
        status,
        gas_limit: row.try_get("gas_limit")?,
        gas_price: row.try_get("gas_price")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Transaction with hash {0} already exists")]
    DuplicateHash(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn transaction_not_found(id: &str) -> Self {
        AppError::NotFound(format!("Transaction with ID {} not found", id))
    }
}

pub type AppResult<T> = Result<T, AppError>;

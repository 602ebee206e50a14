mod app_error;
mod stats;
mod transaction;

pub use app_error::{AppError, AppResult};
pub use stats::{SeedReport, StatusDistribution, TransactionStats};
pub use transaction::{NewTransaction, Transaction, TransactionStatus};

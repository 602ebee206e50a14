pub mod db;
pub mod seed_interactor;
pub mod stats_interactor;
pub mod transaction_interactor;

pub use seed_interactor::{SeedInteractor, SeedInteractorImpl};
pub use stats_interactor::{StatsInteractor, StatsInteractorImpl};
pub use transaction_interactor::{TransactionInteractor, TransactionInteractorImpl};

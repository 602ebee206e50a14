use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::interactor::{
    SeedInteractor, SeedInteractorImpl, StatsInteractor, StatsInteractorImpl,
    TransactionInteractor, TransactionInteractorImpl,
};
use crate::repositories::{
    InMemoryTransactionRepository, PgTransactionRepository, TransactionRepository,
};
use crate::services::{ConfirmationService, ConfirmationSettings};

/// ServiceContainer provides access to core application dependencies
pub struct ServiceContainer {
    // Interactors
    transaction_interactor: Arc<dyn TransactionInteractor>,
    stats_interactor: Arc<dyn StatsInteractor>,
    seed_interactor: Arc<dyn SeedInteractor>,

    // Configuration
    config: AppConfig,
}

impl ServiceContainer {
    /// Wire interactors around a repository. Returns the container together
    /// with the confirmation service, which the caller must start.
    pub fn new(
        repository: Arc<dyn TransactionRepository>,
        config: AppConfig,
    ) -> (Self, ConfirmationService) {
        let confirmation_service = ConfirmationService::new(
            repository.clone(),
            ConfirmationSettings {
                delay: config.confirmation_delay(),
                success_rate: config.confirmation_success_rate,
            },
        );

        let transaction_interactor = Arc::new(TransactionInteractorImpl::new(
            repository.clone(),
            confirmation_service.scheduler(),
        )) as Arc<dyn TransactionInteractor>;

        let stats_interactor =
            Arc::new(StatsInteractorImpl::new(repository.clone())) as Arc<dyn StatsInteractor>;

        let seed_interactor = Arc::new(SeedInteractorImpl::new(
            repository,
            confirmation_service.scheduler(),
            config.seed_count,
        )) as Arc<dyn SeedInteractor>;

        let container = Self {
            transaction_interactor,
            stats_interactor,
            seed_interactor,
            config,
        };

        (container, confirmation_service)
    }

    pub fn with_postgres(db_pool: Arc<PgPool>, config: AppConfig) -> (Self, ConfirmationService) {
        Self::new(Arc::new(PgTransactionRepository::new(db_pool)), config)
    }

    pub fn in_memory(config: AppConfig) -> (Self, ConfirmationService) {
        Self::new(Arc::new(InMemoryTransactionRepository::new()), config)
    }

    // Accessor methods

    pub fn transaction_interactor(&self) -> Arc<dyn TransactionInteractor> {
        self.transaction_interactor.clone()
    }

    pub fn stats_interactor(&self) -> Arc<dyn StatsInteractor> {
        self.stats_interactor.clone()
    }

    pub fn seed_interactor(&self) -> Arc<dyn SeedInteractor> {
        self.seed_interactor.clone()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

use crate::entity::TransactionStatus;
use crate::repositories::TransactionRepository;
use anyhow::Result;
use log::{debug, error, info, warn};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::sleep;
use uuid::Uuid;

#[derive(Debug, Clone, Copy)]
pub struct ConfirmationSettings {
    pub delay: Duration,
    pub success_rate: f64,
}

impl Default for ConfirmationSettings {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(2),
            success_rate: 0.9,
        }
    }
}

/// Cheap handle used by interactors to queue a transaction for confirmation
#[derive(Clone)]
pub struct ConfirmationScheduler {
    queue_tx: mpsc::UnboundedSender<Uuid>,
}

impl ConfirmationScheduler {
    pub fn schedule(&self, id: Uuid) {
        if self.queue_tx.send(id).is_err() {
            warn!("Confirmation queue closed, transaction {} stays pending", id);
        }
    }
}

/// Background service that settles pending transactions after a delay
pub struct ConfirmationService {
    repository: Arc<dyn TransactionRepository>,
    settings: ConfirmationSettings,
    queue_tx: mpsc::UnboundedSender<Uuid>,
    queue_rx: Option<mpsc::UnboundedReceiver<Uuid>>,
    stop_tx: Option<mpsc::Sender<()>>,
}

impl ConfirmationService {
    pub fn new(repository: Arc<dyn TransactionRepository>, settings: ConfirmationSettings) -> Self {
        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        Self {
            repository,
            settings,
            queue_tx,
            queue_rx: Some(queue_rx),
            stop_tx: None,
        }
    }

    pub fn scheduler(&self) -> ConfirmationScheduler {
        ConfirmationScheduler {
            queue_tx: self.queue_tx.clone(),
        }
    }

    // Start the background loop that drains the confirmation queue
    pub async fn start(&mut self) -> Result<()> {
        if self.stop_tx.is_some() {
            warn!("Confirmation service is already running");
            return Ok(());
        }

        let mut queue_rx = match self.queue_rx.take() {
            Some(rx) => rx,
            None => {
                warn!("Confirmation service was stopped and cannot be restarted");
                return Ok(());
            }
        };

        let (stop_tx, mut stop_rx) = mpsc::channel::<()>(1);
        self.stop_tx = Some(stop_tx);

        let repository = self.repository.clone();
        let settings = self.settings;

        tokio::spawn(async move {
            loop {
                select! {
                    next = queue_rx.recv() => {
                        match next {
                            Some(id) => {
                                let repository = repository.clone();
                                tokio::spawn(async move {
                                    sleep(settings.delay).await;
                                    let roll = rand::rng().random::<f64>();
                                    if let Err(e) = Self::settle(repository.as_ref(), id, roll, settings.success_rate).await {
                                        error!("Failed to settle transaction {}: {}", id, e);
                                    }
                                });
                            }
                            None => {
                                debug!("Confirmation queue closed");
                                break;
                            }
                        }
                    }
                    _ = stop_rx.recv() => {
                        info!("Stopping confirmation service");
                        break;
                    }
                }
            }
        });

        info!(
            "Confirmation service started (delay {:?}, success rate {:.2})",
            self.settings.delay, self.settings.success_rate
        );
        Ok(())
    }

    // Stop the background loop
    pub async fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(()).await;
            info!("Confirmation service stop signal sent");
        }
    }

    /// Flip a still-pending transaction to confirmed or failed; `roll` is a
    /// uniform sample in [0, 1)
    pub async fn settle(
        repository: &dyn TransactionRepository,
        id: Uuid,
        roll: f64,
        success_rate: f64,
    ) -> Result<Option<TransactionStatus>> {
        let tx = match repository.find_by_id(id).await? {
            Some(tx) => tx,
            None => {
                debug!("Transaction {} disappeared before confirmation", id);
                return Ok(None);
            }
        };

        if tx.status != TransactionStatus::Pending {
            debug!("Transaction {} already {}, leaving it", id, tx.status);
            return Ok(None);
        }

        let status = if roll < success_rate {
            TransactionStatus::Confirmed
        } else {
            TransactionStatus::Failed
        };

        repository.update_status(id, status).await?;
        info!("Transaction {} settled as {}", id, status);
        Ok(Some(status))
    }
}

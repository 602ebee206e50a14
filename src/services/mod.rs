pub mod confirmation_service;

pub use confirmation_service::{ConfirmationScheduler, ConfirmationService, ConfirmationSettings};

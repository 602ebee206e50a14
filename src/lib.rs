pub mod config;
pub mod di;
pub mod entity;
pub mod handlers;
pub mod interactor;
pub mod listing;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod view;

// Re-export commonly used items
pub use config::AppConfig;
pub use di::*;
pub use entity::*;
pub use services::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

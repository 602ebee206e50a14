//! Application configuration
//!
//! Values are layered: built-in defaults, then `TXBOARD_*` environment
//! variables, then the conventional `DATABASE_URL` and `PORT` variables.

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Interface to bind the HTTP server on
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// PostgreSQL connection string; the in-memory store is used when absent
    pub database_url: Option<String>,

    /// Pool size for the PostgreSQL connection pool
    pub max_connections: u32,

    /// Delay before a created transaction is confirmed or failed
    pub confirmation_delay_ms: u64,

    /// Probability that a simulated confirmation succeeds
    pub confirmation_success_rate: f64,

    /// Number of transactions generated by the seed routine
    pub seed_count: usize,

    /// Seed an empty store when the server starts
    pub seed_on_startup: bool,

    /// Default page size for paginated listings
    pub page_size: usize,

    /// Allowed CORS origin, any origin when absent
    pub cors_origin: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: None,
            max_connections: 10,
            confirmation_delay_ms: 2000,
            confirmation_success_rate: 0.9,
            seed_count: 100,
            seed_on_startup: false,
            page_size: 15,
            cors_origin: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load configuration from an explicit variable map instead of the process
    /// environment
    pub fn from_map(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::load(Some(vars))
    }

    fn load(vars: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let lookup = |key: &str| match &vars {
            Some(map) => map.get(key).cloned(),
            None => std::env::var(key).ok(),
        };
        let database_url = lookup("DATABASE_URL");
        let port = lookup("PORT");

        let config = Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", defaults.port as i64)?
            .set_default("max_connections", defaults.max_connections as i64)?
            .set_default(
                "confirmation_delay_ms",
                defaults.confirmation_delay_ms as i64,
            )?
            .set_default(
                "confirmation_success_rate",
                defaults.confirmation_success_rate,
            )?
            .set_default("seed_count", defaults.seed_count as i64)?
            .set_default("seed_on_startup", defaults.seed_on_startup)?
            .set_default("page_size", defaults.page_size as i64)?
            .add_source(
                Environment::with_prefix("TXBOARD")
                    .try_parsing(true)
                    .source(vars),
            )
            .set_override_option("database_url", database_url)?
            .set_override_option("port", port)?
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.confirmation_success_rate) {
            return Err(ConfigError::Message(format!(
                "confirmation_success_rate must be within [0, 1], got {}",
                self.confirmation_success_rate
            )));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Message(
                "page_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn confirmation_delay(&self) -> Duration {
        Duration::from_millis(self.confirmation_delay_ms)
    }
}

//! txboard - Main executable
//!
//! Serves the REST API behind the mock transaction dashboard: create and list
//! transactions, dashboard stats and one-shot sample data seeding.
use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use log::{error, info, warn};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use txboard::{handlers, AppConfig, ServiceContainer};

/// Application entry point
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!("Starting txboard backend v{}", txboard::VERSION);

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let bind_address = config.bind_address();

    let (container, mut confirmation_service) = match config.database_url.clone() {
        Some(database_url) => {
            // Setup database connection pool
            info!("Connecting to database...");
            let db_pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&database_url)
                .await
                .context("Failed to create database connection pool")?;

            // Run database migrations
            info!("Running database migrations...");
            if let Err(e) = sqlx::migrate!("./migrations").run(&db_pool).await {
                error!("Failed to run migrations: {}", e);
                return Err(anyhow::Error::from(e));
            }
            info!("Migrations completed successfully");

            ServiceContainer::with_postgres(Arc::new(db_pool), config.clone())
        }
        None => {
            warn!("DATABASE_URL is not set, transactions are kept in memory only");
            ServiceContainer::in_memory(config.clone())
        }
    };
    let container = web::Data::new(container);

    // Start simulated confirmation background service
    confirmation_service
        .start()
        .await
        .context("Failed to start confirmation service")?;

    if config.seed_on_startup {
        match container.seed_interactor().seed_data().await {
            Ok(report) => info!("{}", report.message),
            Err(e) => error!("Startup seed failed: {}", e),
        }
    }

    info!("Starting HTTP server on {}", bind_address);

    let cors_origin = config.cors_origin.clone();
    HttpServer::new(move || {
        let cors = match &cors_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header()
                .max_age(3600),
            None => Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600),
        };

        App::new()
            .app_data(container.clone())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(handlers::configure)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await
    .context("HTTP server terminated with an error")?;

    // Stop confirmation service
    info!("Stopping confirmation service...");
    confirmation_service.stop().await;

    Ok(())
}

//! HTTP handlers

use actix_web::{error::InternalError, web, ResponseError};

use crate::entity::AppError;

pub mod error;
mod stats;
mod system;
mod transactions;

pub use error::ApiResult;
pub use stats::*;
pub use system::*;
pub use transactions::*;

pub const API_PREFIX: &str = "/api";

/// Configure all routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Malformed bodies and query strings use the same error envelope
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let response = AppError::Validation(err.to_string()).error_response();
        InternalError::from_response(err, response).into()
    });
    let query_config = web::QueryConfig::default().error_handler(|err, _req| {
        let response = AppError::Validation(err.to_string()).error_response();
        InternalError::from_response(err, response).into()
    });

    cfg.app_data(json_config).app_data(query_config).service(
        web::scope(API_PREFIX)
            .route("/health", web::get().to(health))
            .route("/init", web::post().to(init))
            .route("/stats", web::get().to(get_stats))
            .service(
                web::scope("/transactions")
                    .route("", web::post().to(create_transaction))
                    .route("", web::get().to(list_transactions))
                    .route("/{id}", web::get().to(get_transaction)),
            ),
    );
}

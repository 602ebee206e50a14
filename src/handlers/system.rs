use actix_web::{web, HttpResponse};
use chrono::{SecondsFormat, Utc};
use serde_json::json;

use super::error::ApiResult;
use crate::di::ServiceContainer;
use crate::view::SeedView;

/// Liveness probe
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "message": format!("txboard backend v{} is running", crate::VERSION),
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

/// Populate an empty store with sample transactions
pub async fn init(services: web::Data<ServiceContainer>) -> ApiResult<HttpResponse> {
    let report = services.seed_interactor().seed_data().await?;
    Ok(HttpResponse::Created().json(SeedView::from(report)))
}

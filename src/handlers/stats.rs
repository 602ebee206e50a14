use actix_web::{web, HttpResponse};

use super::error::ApiResult;
use crate::di::ServiceContainer;
use crate::view::{ApiResponse, StatsView};

/// Dashboard aggregates
pub async fn get_stats(services: web::Data<ServiceContainer>) -> ApiResult<HttpResponse> {
    let stats = services.stats_interactor().get_stats().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(StatsView::from(&stats))))
}

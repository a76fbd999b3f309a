// handler/admin.rs
use std::sync::Arc;

use axum::{response::IntoResponse, routing::{get, post}, Extension, Json, Router};

use crate::{
    dtos::analyticsdtos::{PerformanceResponseDto, ProvisionResponseDto},
    error::HttpError,
    AppState,
};

pub fn admin_handler() -> Router {
    Router::new()
        .route("/database/setup", post(setup_database_objects))
        .route("/performance/index-comparison", get(index_comparison))
}

/// Installs (or reinstalls) the derived views, routines, audit tables
/// and triggers. Safe to call repeatedly; not safe to call concurrently.
pub async fn setup_database_objects(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let report = app_state.provision_service.reconcile().await;

    let response = ProvisionResponseDto {
        status: if report.succeeded() { "success" } else { "fail" },
        success: report.succeeded(),
        message: report.message(),
        objects: report.outcomes,
    };

    Ok(Json(response))
}

pub async fn index_comparison(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let comparison = app_state
        .performance_service
        .compare_index_performance()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let response = PerformanceResponseDto {
        status: "success",
        without_index: format!("{}ms", comparison.without_index_ms),
        with_index: format!("{}ms", comparison.with_index_ms),
        improvement: comparison.improvement_label(),
    };

    Ok(Json(response))
}

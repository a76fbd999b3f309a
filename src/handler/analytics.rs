// handler/analytics.rs
//
// Read-only report endpoints. Every report that finds no qualifying
// rows answers 200 with an empty data array.
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::{analyticsdb::AnalyticsExt, relationaldb::RelationalAnalyticsExt, viewdb::DerivedViewExt},
    dtos::analyticsdtos::{ReportResponseDto, ViewQueryDto},
    dtos::userdtos::FilterUserDto,
    error::HttpError,
    service::error::ServiceError,
    AppState,
};

pub fn analytics_handler() -> Router {
    Router::new()
        .route("/stats/roles", get(user_stats_by_role))
        .route("/stats/cities", get(top_cities))
        .route("/stats/registrations", get(registration_trend))
        .route("/stats/rating-distribution", get(rating_distribution))
        .route("/above-average-projects", get(above_average_projects))
        .route("/top-freelancers-by-city", get(top_freelancers_by_city))
        .route("/high-budget-clients", get(high_budget_clients))
        .route("/clients/:client_id/bidders", get(client_bidders))
        .route("/active-projects", get(active_projects))
        .route("/freelancer-reviews", get(freelancer_reviews))
        .route("/client-project-stats", get(client_project_stats))
        .route("/freelancer-bid-stats", get(freelancer_bid_stats))
        .route("/projects/:project_id/statistics", get(project_statistics))
        .route("/clients/:client_id/budget", get(client_budget))
        .route(
            "/freelancers/:freelancer_id/success-rate",
            get(freelancer_success_rate),
        )
}

pub fn views_handler() -> Router {
    Router::new()
        .route("/active-projects", get(active_projects_view))
        .route("/top-freelancers", get(top_freelancers_view))
        .route("/client-stats", get(client_stats_view))
}

fn storage_error(e: sqlx::Error) -> HttpError {
    HttpError::server_error(e.to_string())
}

// -- grouped aggregations ---------------------------------------------

pub async fn user_stats_by_role(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let rows = app_state
        .db_client
        .user_stats_by_role()
        .await
        .map_err(storage_error)?;
    Ok(Json(ReportResponseDto::new(rows)))
}

pub async fn top_cities(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let rows = app_state
        .db_client
        .top_cities_by_user_count()
        .await
        .map_err(storage_error)?;
    Ok(Json(ReportResponseDto::new(rows)))
}

pub async fn registration_trend(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let rows = app_state
        .db_client
        .registration_trend()
        .await
        .map_err(storage_error)?;
    Ok(Json(ReportResponseDto::new(rows)))
}

pub async fn rating_distribution(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let rows = app_state
        .db_client
        .rating_distribution()
        .await
        .map_err(storage_error)?;
    Ok(Json(ReportResponseDto::new(rows)))
}

// -- correlated subqueries --------------------------------------------

pub async fn above_average_projects(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let users = app_state
        .db_client
        .users_with_above_average_projects()
        .await
        .map_err(storage_error)?;
    Ok(Json(ReportResponseDto::new(FilterUserDto::filter_users(&users))))
}

pub async fn top_freelancers_by_city(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let users = app_state
        .db_client
        .top_freelancers_by_city()
        .await
        .map_err(storage_error)?;
    Ok(Json(ReportResponseDto::new(FilterUserDto::filter_users(&users))))
}

pub async fn high_budget_clients(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let users = app_state
        .db_client
        .clients_with_high_budget_projects()
        .await
        .map_err(storage_error)?;
    Ok(Json(ReportResponseDto::new(FilterUserDto::filter_users(&users))))
}

/// Freelancers who placed a bid on any project of the given client.
/// An id that matches no user yields an empty report, not a 404.
pub async fn client_bidders(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(client_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let users = app_state
        .db_client
        .freelancers_who_bid_for_client(client_id)
        .await
        .map_err(storage_error)?;
    Ok(Json(ReportResponseDto::new(FilterUserDto::filter_users(&users))))
}

// -- join reports ------------------------------------------------------

pub async fn active_projects(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let rows = app_state
        .db_client
        .users_with_active_projects()
        .await
        .map_err(storage_error)?;
    Ok(Json(ReportResponseDto::new(rows)))
}

pub async fn freelancer_reviews(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let rows = app_state
        .db_client
        .freelancers_with_review_ratings()
        .await
        .map_err(storage_error)?;
    Ok(Json(ReportResponseDto::new(rows)))
}

pub async fn client_project_stats(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let rows = app_state
        .db_client
        .clients_with_project_stats()
        .await
        .map_err(storage_error)?;
    Ok(Json(ReportResponseDto::new(rows)))
}

pub async fn freelancer_bid_stats(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let rows = app_state
        .db_client
        .freelancers_with_bid_stats()
        .await
        .map_err(storage_error)?;
    Ok(Json(ReportResponseDto::new(rows)))
}

// -- provisioned routines ----------------------------------------------

pub async fn project_statistics(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(project_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let stats = app_state
        .db_client
        .project_statistics(project_id)
        .await
        .map_err(storage_error)?
        .ok_or_else(|| HttpError::from(ServiceError::ProjectNotFound(project_id)))?;
    Ok(Json(serde_json::json!({
        "status": "success",
        "data": stats
    })))
}

pub async fn client_budget(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(client_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let stats = app_state
        .db_client
        .client_average_budget(client_id)
        .await
        .map_err(storage_error)?;
    Ok(Json(serde_json::json!({
        "status": "success",
        "data": stats
    })))
}

pub async fn freelancer_success_rate(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(freelancer_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let stats = app_state
        .db_client
        .freelancer_success_rate(freelancer_id)
        .await
        .map_err(storage_error)?;
    Ok(Json(serde_json::json!({
        "status": "success",
        "data": stats
    })))
}

// -- provisioned views -------------------------------------------------

const DEFAULT_VIEW_LIMIT: i64 = 10;

pub async fn active_projects_view(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<ViewQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;
    let rows = app_state
        .db_client
        .active_projects_view(query.limit.unwrap_or(DEFAULT_VIEW_LIMIT))
        .await
        .map_err(storage_error)?;
    Ok(Json(ReportResponseDto::new(rows)))
}

pub async fn top_freelancers_view(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<ViewQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;
    let rows = app_state
        .db_client
        .top_freelancers_view(query.limit.unwrap_or(DEFAULT_VIEW_LIMIT))
        .await
        .map_err(storage_error)?;
    Ok(Json(ReportResponseDto::new(rows)))
}

pub async fn client_stats_view(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<ViewQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;
    let rows = app_state
        .db_client
        .client_stats_view(query.limit.unwrap_or(DEFAULT_VIEW_LIMIT))
        .await
        .map_err(storage_error)?;
    Ok(Json(ReportResponseDto::new(rows)))
}

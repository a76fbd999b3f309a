// routes.rs
use std::sync::Arc;

use axum::{routing::get, Extension, Json, Router};
use tower_http::trace::TraceLayer;
use serde_json::json;

use crate::{
    handler::{admin::admin_handler, analytics::{analytics_handler, views_handler}, users::users_handler},
    AppState,
};

// Health check handler
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/healthchecker", get(health_check))
        .merge(users_handler())
        .nest("/analytics", analytics_handler())
        .nest("/views", views_handler())
        .nest("/admin", admin_handler());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state))
}

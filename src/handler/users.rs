// handler/users.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::userdb::UserExt,
    dtos::analyticsdtos::RatingUpdateResponseDto,
    dtos::userdtos::*,
    error::HttpError,
    service::error::ServiceError,
    AppState,
};

pub fn users_handler() -> Router {
    Router::new()
        .route("/users", get(get_users))
        .route("/users/:user_id", get(get_user))
        .route(
            "/users/:user_id/rating/recompute",
            post(recompute_user_rating),
        )
}

pub async fn get_users(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<UserQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    // reject unknown role/status/sort input before touching the pool
    let filter = query
        .to_filter()
        .map_err(|e| HttpError::from(ServiceError::Validation(e)))?;

    let (users, total) = app_state
        .db_client
        .list_users(&filter)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let response = UserListResponseDto {
        status: "success".to_string(),
        data: FilterUserDto::filter_users(&users),
        pagination: Pagination::new(filter.page, filter.limit, total),
    };

    Ok(Json(response))
}

pub async fn get_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let user = app_state
        .db_client
        .get_user(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(format!("User with ID {} not found", user_id)))?;

    let response = UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&user),
        },
    };

    Ok(Json(response))
}

pub async fn recompute_user_rating(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let update = app_state
        .rating_service
        .recompute(user_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(RatingUpdateResponseDto::new(update)))
}

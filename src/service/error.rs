// service/error.rs
use thiserror::Error;

use crate::error::HttpError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("User with ID {0} not found")]
    UserNotFound(i32),

    #[error("Project with ID {0} not found")]
    ProjectNotFound(i32),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::UserNotFound(_) | ServiceError::ProjectNotFound(_) => {
                HttpError::not_found(error.to_string())
            }
            ServiceError::Validation(_) => HttpError::bad_request(error.to_string()),
            ServiceError::Database(_) => HttpError::server_error(error.to_string()),
        }
    }
}

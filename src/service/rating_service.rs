// service/rating_service.rs
use std::sync::Arc;

use crate::db::db::DBClient;
use crate::db::ratingdb::RatingExt;
use crate::models::analyticsmodels::RatingUpdate;
use crate::service::error::ServiceError;

/// Recomputes a user's aggregate rating from their received reviews.
/// The whole read-then-write runs in one transaction holding the user
/// row lock, so recomputes for the same user never interleave.
#[derive(Debug, Clone)]
pub struct RatingService {
    db_client: Arc<DBClient>,
}

impl RatingService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn recompute(&self, user_id: i32) -> Result<RatingUpdate, ServiceError> {
        let update = self
            .db_client
            .recompute_user_rating(user_id)
            .await?
            .ok_or(ServiceError::UserNotFound(user_id))?;

        tracing::info!(
            user_id = update.user_id,
            rating = update.new_rating,
            reviews = update.review_count,
            "user rating recomputed"
        );

        Ok(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    #[tokio::test]
    async fn rating_service_compiles() {
        let pool = PgPool::connect_lazy("postgres://localhost/gigmarket").unwrap();
        let db_client = Arc::new(DBClient::new(pool));
        let svc = RatingService::new(db_client);

        let _ = svc.recompute(1);
    }
}

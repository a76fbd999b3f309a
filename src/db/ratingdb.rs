// db/ratingdb.rs
use async_trait::async_trait;
use sqlx::Row;

use super::db::DBClient;
use crate::models::analyticsmodels::RatingUpdate;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[async_trait]
pub trait RatingExt {
    /// Recomputes one user's aggregate rating from their received
    /// reviews inside a single transaction. Returns `None` when the
    /// user row does not exist; any error aborts the transaction and
    /// leaves the stored rating untouched.
    async fn recompute_user_rating(
        &self,
        user_id: i32,
    ) -> Result<Option<RatingUpdate>, sqlx::Error>;
}

#[async_trait]
impl RatingExt for DBClient {
    async fn recompute_user_rating(
        &self,
        user_id: i32,
    ) -> Result<Option<RatingUpdate>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        // Lock the target row. Concurrent recomputes for the same user
        // queue behind this lock; different users proceed independently.
        let locked = sqlx::query("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;

        if locked.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let row = sqlx::query(
            r#"
            SELECT COALESCE(AVG(rating), 0)::float8 AS avg_rating,
                   COUNT(*) AS review_count
            FROM reviews
            WHERE reviewed_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let new_rating = round2(row.get::<f64, _>("avg_rating"));
        let review_count = row.get::<i64, _>("review_count");

        sqlx::query(
            r#"
            UPDATE users
            SET rating = $2,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(new_rating)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(RatingUpdate {
            user_id,
            new_rating,
            review_count,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_decimal_places() {
        // [5.0, 4.0, 3.0] averages to exactly 4.00
        assert_eq!(round2((5.0 + 4.0 + 3.0) / 3.0), 4.0);
        assert_eq!(round2(1.0 / 3.0), 0.33);
        assert_eq!(round2(2.0 / 3.0), 0.67);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(4.995), 5.0);
    }
}

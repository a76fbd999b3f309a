// db/analyticsdb.rs
//
// Fixed grouped-aggregation reports over users. All read-only; zero
// qualifying rows come back as an empty vec, never an error.
use async_trait::async_trait;

use super::db::DBClient;
use crate::models::analyticsmodels::{
    CityStats, RatingBandCount, RegistrationTrend, RoleStats,
};

#[async_trait]
pub trait AnalyticsExt {
    async fn user_stats_by_role(&self) -> Result<Vec<RoleStats>, sqlx::Error>;
    async fn top_cities_by_user_count(&self) -> Result<Vec<CityStats>, sqlx::Error>;
    async fn registration_trend(&self) -> Result<Vec<RegistrationTrend>, sqlx::Error>;
    async fn rating_distribution(&self) -> Result<Vec<RatingBandCount>, sqlx::Error>;
}

#[async_trait]
impl AnalyticsExt for DBClient {
    async fn user_stats_by_role(&self) -> Result<Vec<RoleStats>, sqlx::Error> {
        sqlx::query_as::<_, RoleStats>(
            r#"
            SELECT role,
                   COUNT(*) AS count,
                   AVG(rating)::float8 AS avg_rating,
                   AVG(total_projects)::float8 AS avg_projects
            FROM users
            GROUP BY role
            ORDER BY role
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn top_cities_by_user_count(&self) -> Result<Vec<CityStats>, sqlx::Error> {
        sqlx::query_as::<_, CityStats>(
            r#"
            SELECT city,
                   country,
                   COUNT(*) AS user_count,
                   AVG(rating)::float8 AS avg_rating
            FROM users
            WHERE city IS NOT NULL
            GROUP BY city, country
            ORDER BY user_count DESC
            LIMIT 10
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn registration_trend(&self) -> Result<Vec<RegistrationTrend>, sqlx::Error> {
        sqlx::query_as::<_, RegistrationTrend>(
            r#"
            SELECT to_char(created_at, 'YYYY-MM') AS month,
                   COUNT(*) AS registrations,
                   COUNT(*) FILTER (WHERE role = 'client'::user_role) AS clients,
                   COUNT(*) FILTER (WHERE role = 'freelancer'::user_role) AS freelancers
            FROM users
            GROUP BY to_char(created_at, 'YYYY-MM')
            ORDER BY month DESC
            LIMIT 12
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn rating_distribution(&self) -> Result<Vec<RatingBandCount>, sqlx::Error> {
        sqlx::query_as::<_, RatingBandCount>(
            r#"
            SELECT CASE
                       WHEN rating >= 4.5 THEN '4.5-5.0'
                       WHEN rating >= 4.0 THEN '4.0-4.5'
                       WHEN rating >= 3.5 THEN '3.5-4.0'
                       WHEN rating >= 3.0 THEN '3.0-3.5'
                       ELSE 'Below 3.0'
                   END AS rating_range,
                   COUNT(*) AS user_count,
                   role
            FROM users
            GROUP BY rating_range, role
            ORDER BY role, rating_range DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}

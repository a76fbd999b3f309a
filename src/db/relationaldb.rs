// db/relationaldb.rs
//
// Correlated-subquery and multi-join reports. The join reports keep
// users whose joined side is empty; their aggregates coalesce to zero.
use async_trait::async_trait;

use super::db::DBClient;
use crate::models::analyticsmodels::{
    ActiveProjectUser, ClientProjectStats, FreelancerBidStats, FreelancerReviewStats,
};
use crate::models::usermodel::User;

#[async_trait]
pub trait RelationalAnalyticsExt {
    async fn users_with_above_average_projects(&self) -> Result<Vec<User>, sqlx::Error>;

    async fn top_freelancers_by_city(&self) -> Result<Vec<User>, sqlx::Error>;

    async fn clients_with_high_budget_projects(&self) -> Result<Vec<User>, sqlx::Error>;

    /// Freelancers that placed at least one bid on any project owned by
    /// the given client. An id matching no user yields an empty list.
    async fn freelancers_who_bid_for_client(
        &self,
        client_id: i32,
    ) -> Result<Vec<User>, sqlx::Error>;

    async fn users_with_active_projects(
        &self,
    ) -> Result<Vec<ActiveProjectUser>, sqlx::Error>;

    async fn freelancers_with_review_ratings(
        &self,
    ) -> Result<Vec<FreelancerReviewStats>, sqlx::Error>;

    async fn clients_with_project_stats(
        &self,
    ) -> Result<Vec<ClientProjectStats>, sqlx::Error>;

    async fn freelancers_with_bid_stats(
        &self,
    ) -> Result<Vec<FreelancerBidStats>, sqlx::Error>;
}

#[async_trait]
impl RelationalAnalyticsExt for DBClient {
    async fn users_with_above_average_projects(&self) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, role, status,
                   city, country, bio, hourly_rate, skills, rating,
                   total_projects, created_at, updated_at
            FROM users
            WHERE total_projects > (SELECT AVG(total_projects) FROM users)
            ORDER BY total_projects DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn top_freelancers_by_city(&self) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT u1.id, u1.name, u1.email, u1.password, u1.role, u1.status,
                   u1.city, u1.country, u1.bio, u1.hourly_rate, u1.skills, u1.rating,
                   u1.total_projects, u1.created_at, u1.updated_at
            FROM users u1
            WHERE u1.role = 'freelancer'::user_role
              AND u1.city IS NOT NULL
              AND u1.rating = (
                  SELECT MAX(u2.rating)
                  FROM users u2
                  WHERE u2.city = u1.city
                    AND u2.role = 'freelancer'::user_role
              )
            ORDER BY u1.rating DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn clients_with_high_budget_projects(&self) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.name, u.email, u.password, u.role, u.status,
                   u.city, u.country, u.bio, u.hourly_rate, u.skills, u.rating,
                   u.total_projects, u.created_at, u.updated_at
            FROM users u
            WHERE u.role = 'client'::user_role
              AND u.id IN (
                  SELECT p.client_id
                  FROM projects p
                  WHERE p.budget > (SELECT AVG(budget) FROM projects)
              )
            ORDER BY u.total_projects DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn freelancers_who_bid_for_client(
        &self,
        client_id: i32,
    ) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.name, u.email, u.password, u.role, u.status,
                   u.city, u.country, u.bio, u.hourly_rate, u.skills, u.rating,
                   u.total_projects, u.created_at, u.updated_at
            FROM users u
            WHERE u.id IN (
                  SELECT b.freelancer_id
                  FROM bids b
                  JOIN projects p ON b.project_id = p.id
                  WHERE p.client_id = $1
              )
            ORDER BY u.rating DESC
            "#,
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn users_with_active_projects(
        &self,
    ) -> Result<Vec<ActiveProjectUser>, sqlx::Error> {
        sqlx::query_as::<_, ActiveProjectUser>(
            r#"
            SELECT u.id, u.name, u.email, u.role,
                   COALESCE(array_agg(DISTINCT cp.title)
                            FILTER (WHERE cp.id IS NOT NULL), '{}') AS client_projects,
                   COALESCE(array_agg(DISTINCT fp.title)
                            FILTER (WHERE fp.id IS NOT NULL), '{}') AS freelancer_projects
            FROM users u
            LEFT JOIN projects cp
                   ON u.id = cp.client_id AND cp.status = 'in_progress'::project_status
            LEFT JOIN projects fp
                   ON u.id = fp.freelancer_id AND fp.status = 'in_progress'::project_status
            WHERE cp.id IS NOT NULL OR fp.id IS NOT NULL
            GROUP BY u.id
            ORDER BY u.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn freelancers_with_review_ratings(
        &self,
    ) -> Result<Vec<FreelancerReviewStats>, sqlx::Error> {
        sqlx::query_as::<_, FreelancerReviewStats>(
            r#"
            SELECT u.id, u.name, u.email, u.city, u.country, u.rating,
                   COALESCE(AVG(r.rating), 0)::float8 AS avg_review_rating,
                   COUNT(r.id) AS review_count
            FROM users u
            LEFT JOIN reviews r ON u.id = r.reviewed_id
            WHERE u.role = 'freelancer'::user_role
            GROUP BY u.id
            ORDER BY avg_review_rating DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn clients_with_project_stats(
        &self,
    ) -> Result<Vec<ClientProjectStats>, sqlx::Error> {
        sqlx::query_as::<_, ClientProjectStats>(
            r#"
            SELECT u.id, u.name, u.email, u.city, u.country,
                   COUNT(p.id) AS total_projects_count,
                   COALESCE(SUM(p.budget), 0)::float8 AS total_budget,
                   COALESCE(AVG(p.budget), 0)::float8 AS avg_project_budget
            FROM users u
            LEFT JOIN projects p ON u.id = p.client_id
            WHERE u.role = 'client'::user_role
            GROUP BY u.id
            ORDER BY total_budget DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn freelancers_with_bid_stats(
        &self,
    ) -> Result<Vec<FreelancerBidStats>, sqlx::Error> {
        sqlx::query_as::<_, FreelancerBidStats>(
            r#"
            SELECT u.id, u.name, u.email, u.rating,
                   COUNT(b.id) AS total_bids,
                   COUNT(b.id) FILTER (WHERE b.status = 'accepted'::bid_status) AS accepted_bids,
                   COALESCE(AVG(b.amount), 0)::float8 AS avg_bid_amount
            FROM users u
            LEFT JOIN bids b ON u.id = b.freelancer_id
            WHERE u.role = 'freelancer'::user_role
            GROUP BY u.id
            ORDER BY accepted_bids DESC, total_bids DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}

// db/viewdb.rs
//
// Read paths over the provisioned derived objects. These fail with the
// store's "relation does not exist" error until the provisioning
// service has run; that error surfaces to the caller unchanged.
use async_trait::async_trait;

use super::db::DBClient;
use crate::models::analyticsmodels::{
    ActiveProjectView, ClientBudgetStats, ClientStatsView, FreelancerSuccessRate,
    ProjectStatistics, TopFreelancerView,
};

#[async_trait]
pub trait DerivedViewExt {
    async fn active_projects_view(
        &self,
        limit: i64,
    ) -> Result<Vec<ActiveProjectView>, sqlx::Error>;

    async fn top_freelancers_view(
        &self,
        limit: i64,
    ) -> Result<Vec<TopFreelancerView>, sqlx::Error>;

    async fn client_stats_view(
        &self,
        limit: i64,
    ) -> Result<Vec<ClientStatsView>, sqlx::Error>;

    /// `None` when the project id matches no row.
    async fn project_statistics(
        &self,
        project_id: i32,
    ) -> Result<Option<ProjectStatistics>, sqlx::Error>;

    async fn client_average_budget(
        &self,
        client_id: i32,
    ) -> Result<ClientBudgetStats, sqlx::Error>;

    async fn freelancer_success_rate(
        &self,
        freelancer_id: i32,
    ) -> Result<FreelancerSuccessRate, sqlx::Error>;
}

#[async_trait]
impl DerivedViewExt for DBClient {
    async fn active_projects_view(
        &self,
        limit: i64,
    ) -> Result<Vec<ActiveProjectView>, sqlx::Error> {
        sqlx::query_as::<_, ActiveProjectView>(
            "SELECT * FROM v_active_projects LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn top_freelancers_view(
        &self,
        limit: i64,
    ) -> Result<Vec<TopFreelancerView>, sqlx::Error> {
        sqlx::query_as::<_, TopFreelancerView>(
            "SELECT * FROM v_top_freelancers LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn client_stats_view(
        &self,
        limit: i64,
    ) -> Result<Vec<ClientStatsView>, sqlx::Error> {
        sqlx::query_as::<_, ClientStatsView>(
            "SELECT * FROM v_client_stats LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn project_statistics(
        &self,
        project_id: i32,
    ) -> Result<Option<ProjectStatistics>, sqlx::Error> {
        sqlx::query_as::<_, ProjectStatistics>(
            "SELECT * FROM get_project_statistics($1)",
        )
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn client_average_budget(
        &self,
        client_id: i32,
    ) -> Result<ClientBudgetStats, sqlx::Error> {
        sqlx::query_as::<_, ClientBudgetStats>(
            "SELECT * FROM get_client_avg_budget($1)",
        )
        .bind(client_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn freelancer_success_rate(
        &self,
        freelancer_id: i32,
    ) -> Result<FreelancerSuccessRate, sqlx::Error> {
        sqlx::query_as::<_, FreelancerSuccessRate>(
            "SELECT * FROM get_freelancer_success_rate($1)",
        )
        .bind(freelancer_id)
        .fetch_one(&self.pool)
        .await
    }
}

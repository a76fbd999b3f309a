// models/analyticsmodels.rs
//
// Row types for the aggregate, subquery and join reports, plus the rows
// coming back from the provisioned views and routines. Counts arrive
// from Postgres as BIGINT, averages are cast to DOUBLE PRECISION in the
// queries themselves.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::projectmodel::{ProjectStatus, ProjectType};
use super::usermodel::UserRole;

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct RoleStats {
    pub role: UserRole,
    pub count: i64,
    pub avg_rating: f64,
    pub avg_projects: f64,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct CityStats {
    pub city: String,
    pub country: Option<String>,
    pub user_count: i64,
    pub avg_rating: f64,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct RegistrationTrend {
    pub month: String,
    pub registrations: i64,
    pub clients: i64,
    pub freelancers: i64,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct RatingBandCount {
    pub rating_range: String,
    pub user_count: i64,
    pub role: UserRole,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct ActiveProjectUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub client_projects: Vec<String>,
    pub freelancer_projects: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct FreelancerReviewStats {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub rating: f64,
    pub avg_review_rating: f64,
    pub review_count: i64,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct ClientProjectStats {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub total_projects_count: i64,
    pub total_budget: f64,
    pub avg_project_budget: f64,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct FreelancerBidStats {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub rating: f64,
    pub total_bids: i64,
    pub accepted_bids: i64,
    pub avg_bid_amount: f64,
}

/// Result of one transactional rating recomputation.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RatingUpdate {
    pub user_id: i32,
    pub new_rating: f64,
    pub review_count: i64,
}

// Rows of the provisioned views.

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct ActiveProjectView {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub budget: f64,
    pub project_type: ProjectType,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,
    pub client_name: String,
    pub client_email: String,
    pub client_city: Option<String>,
    pub client_country: Option<String>,
    pub bid_count: i64,
    pub pending_bids: i64,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct TopFreelancerView {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub hourly_rate: Option<f64>,
    pub rating: f64,
    pub skills: Option<Vec<String>>,
    pub completed_projects: i64,
    pub avg_review_rating: f64,
    pub review_count: i64,
    pub total_bids: i64,
    pub accepted_bids: i64,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct ClientStatsView {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub rating: f64,
    pub total_projects: i64,
    pub total_budget: f64,
    pub avg_project_budget: f64,
    pub completed_projects: i64,
    pub reviews_given: i64,
}

// Rows of the provisioned routines.

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct ProjectStatistics {
    pub title: String,
    pub budget: f64,
    pub status: ProjectStatus,
    pub project_type: ProjectType,
    pub client_name: Option<String>,
    pub freelancer_name: Option<String>,
    pub total_bids: i64,
    pub avg_bid_amount: f64,
    pub review_count: i64,
    pub avg_rating: f64,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct ClientBudgetStats {
    pub client_id: i32,
    pub project_count: i64,
    pub total_budget: f64,
    pub avg_budget: f64,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct FreelancerSuccessRate {
    pub freelancer_id: i32,
    pub total_bids: i64,
    pub accepted_bids: i64,
    pub success_rate: f64,
}

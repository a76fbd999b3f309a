// models/projectmodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "project_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Open,
    InProgress,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub fn to_str(&self) -> &str {
        match self {
            ProjectStatus::Open => "open",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "project_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Fixed,
    Hourly,
}

impl ProjectType {
    pub fn to_str(&self) -> &str {
        match self {
            ProjectType::Fixed => "fixed",
            ProjectType::Hourly => "hourly",
        }
    }
}

/// `started_at` is set once the project leaves `open`; `completed_at`
/// only when status is `completed`. The accepted bid's freelancer, if
/// any, matches `freelancer_id`.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Project {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub project_type: ProjectType,
    pub budget: f64,
    pub required_skills: Option<Vec<String>>,
    pub status: ProjectStatus,
    pub deadline: Option<DateTime<Utc>>,
    pub client_id: i32,
    pub freelancer_id: Option<i32>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&ProjectStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(ProjectStatus::InProgress.to_str(), "in_progress");
        assert_eq!(ProjectType::Hourly.to_str(), "hourly");
    }
}

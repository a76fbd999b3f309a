// models/usermodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Client,
    Freelancer,
    Admin,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::Client => "client",
            UserRole::Freelancer => "freelancer",
            UserRole::Admin => "admin",
        }
    }

    pub fn from_str(value: &str) -> Option<UserRole> {
        match value {
            "client" => Some(UserRole::Client),
            "freelancer" => Some(UserRole::Freelancer),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Inactive,
    Banned,
}

impl UserStatus {
    pub fn to_str(&self) -> &str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Banned => "banned",
        }
    }

    pub fn from_str(value: &str) -> Option<UserStatus> {
        match value {
            "active" => Some(UserStatus::Active),
            "inactive" => Some(UserStatus::Inactive),
            "banned" => Some(UserStatus::Banned),
            _ => None,
        }
    }
}

/// A marketplace account. `rating` is derived from received reviews and
/// only ever written by the rating updater; `total_projects` is a
/// denormalized counter maintained by the project-insert trigger.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub city: Option<String>,
    pub country: Option<String>,
    pub bio: Option<String>,
    pub hourly_rate: Option<f64>,
    pub skills: Option<Vec<String>>,
    pub rating: f64,
    pub total_projects: i32,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in [UserRole::Client, UserRole::Freelancer, UserRole::Admin] {
            assert_eq!(UserRole::from_str(role.to_str()), Some(role));
        }
        assert_eq!(UserRole::from_str("superadmin"), None);
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [UserStatus::Active, UserStatus::Inactive, UserStatus::Banned] {
            assert_eq!(UserStatus::from_str(status.to_str()), Some(status));
        }
        assert_eq!(UserStatus::from_str(""), None);
    }
}

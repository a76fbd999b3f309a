// models/reviewmodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Review {
    pub id: i32,
    pub project_id: i32,
    pub reviewer_id: i32,
    pub reviewed_id: i32,
    pub rating: f64,
    pub comment: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_use_camel_case_on_the_wire() {
        let review = Review {
            id: 1,
            project_id: 2,
            reviewer_id: 3,
            reviewed_id: 7,
            rating: 4.5,
            comment: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&review).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }
}

// models/bidmodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "bid_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BidStatus {
    Pending,
    Accepted,
    Rejected,
    Withdrawn,
}

impl BidStatus {
    pub fn to_str(&self) -> &str {
        match self {
            BidStatus::Pending => "pending",
            BidStatus::Accepted => "accepted",
            BidStatus::Rejected => "rejected",
            BidStatus::Withdrawn => "withdrawn",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Bid {
    pub id: i32,
    pub project_id: i32,
    pub freelancer_id: i32,
    pub amount: f64,
    pub proposal: String,
    pub delivery_days: i32,
    pub status: BidStatus,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_match_the_storage_enum() {
        assert_eq!(BidStatus::Pending.to_str(), "pending");
        assert_eq!(BidStatus::Accepted.to_str(), "accepted");
        assert_eq!(BidStatus::Rejected.to_str(), "rejected");
        assert_eq!(BidStatus::Withdrawn.to_str(), "withdrawn");
    }
}

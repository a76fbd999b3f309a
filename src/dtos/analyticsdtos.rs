// dtos/analyticsdtos.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::analyticsmodels::RatingUpdate;
use crate::service::provision_service::ProvisionOutcome;

/// Envelope for every list-shaped report.
#[derive(Debug, Serialize)]
pub struct ReportResponseDto<T: Serialize> {
    pub status: &'static str,
    pub results: usize,
    pub data: Vec<T>,
}

impl<T: Serialize> ReportResponseDto<T> {
    pub fn new(data: Vec<T>) -> Self {
        ReportResponseDto {
            status: "success",
            results: data.len(),
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RatingUpdateResponseDto {
    pub status: &'static str,
    pub message: String,
    pub data: RatingUpdate,
}

impl RatingUpdateResponseDto {
    pub fn new(update: RatingUpdate) -> Self {
        let message = format!(
            "rating of user {} set to {:.2} from {} reviews",
            update.user_id, update.new_rating, update.review_count
        );
        RatingUpdateResponseDto {
            status: "success",
            message,
            data: update,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProvisionResponseDto {
    pub status: &'static str,
    pub success: bool,
    pub message: String,
    pub objects: Vec<ProvisionOutcome>,
}

#[derive(Debug, Serialize)]
pub struct PerformanceResponseDto {
    pub status: &'static str,
    #[serde(rename = "withoutIndex")]
    pub without_index: String,
    #[serde(rename = "withIndex")]
    pub with_index: String,
    pub improvement: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct ViewQueryDto {
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

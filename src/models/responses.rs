use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::models::domain::CampMatch;

/// Response for the camp search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub matches: Vec<CampMatch>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    pub skipped: usize,
    #[serde(rename = "searchedAt")]
    pub searched_at: chrono::DateTime<chrono::Utc>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivitiesResponse {
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub success: bool,
    #[serde(rename = "feedbackId")]
    pub feedback_id: Uuid,
}

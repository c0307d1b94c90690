use serde::{Deserialize, Serialize};

use crate::models::domain::TherapistCard;

/// Response for the explore feed endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExploreResponse {
    pub cards: Vec<TherapistCard>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
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

use serde::{Deserialize, Serialize};
use crate::models::domain::MatchRecord;

/// Response of a matching run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindMatchesResponse {
    pub matches: Vec<MatchRecord>,
    /// Number of (stream, consumer) pairs scored
    pub pairs_evaluated: usize,
    /// Number of pairs above the admission threshold, before deduplication
    pub pairs_admitted: usize,
    /// Predictor confidence, passed through from the request
    pub overall_confidence: Option<f64>,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

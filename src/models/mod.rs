use serde::{Deserialize, Serialize};

/// Request structure for query analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// The raw search query typed by the user
    pub query: String,
}

/// Health check response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Current timestamp in RFC3339 format
    pub timestamp: String,
}

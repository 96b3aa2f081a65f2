//! Response bodies for the chat transport endpoint.

use crate::bot::Activity;
use serde::{Deserialize, Serialize};

/// Body returned for `expectReplies` deliveries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedReplies {
    pub activities: Vec<Activity>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub version: String,
}

use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// RFC 3339 timestamp of the check
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        }
    }
}

/// Service banner returned from the root path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub status: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            message: "MoMo Payments Backend API".to_string(),
            status: "running".to_string(),
        }
    }
}

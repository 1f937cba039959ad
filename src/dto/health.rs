use std::time::SystemTime;

use serde::Serialize;
use utoipa::ToSchema;

use crate::dto::format_system_time;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
    /// Process start time as an RFC3339 timestamp.
    pub started_at: String,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok(started_at: SystemTime) -> Self {
        Self {
            status: "ok".to_string(),
            started_at: format_system_time(started_at),
        }
    }

    /// Create a health response indicating settings persistence is unavailable.
    pub fn degraded(started_at: SystemTime) -> Self {
        Self {
            status: "degraded".to_string(),
            started_at: format_system_time(started_at),
        }
    }
}

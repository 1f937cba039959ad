use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Respond with the health payload, probing the settings store on the way.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.settings().health_check().await {
        Ok(()) => HealthResponse::ok(state.started_at()),
        Err(err) => {
            warn!(error = %err, "settings store health check failed");
            HealthResponse::degraded(state.started_at())
        }
    }
}

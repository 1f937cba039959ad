use std::convert::Infallible;

use axum::{Router, extract::State, response::sse::Sse, routing::get};
use futures::Stream;
use tracing::info;

use crate::{
    services::{game_service, sse_events, sse_service},
    state::SharedState,
};

#[utoipa::path(
    get,
    path = "/sse/scoreboard",
    tag = "sse",
    responses((status = 200, description = "Scoreboard SSE stream carrying `gameState` snapshots", content_type = "text/event-stream", body = String))
)]
/// Stream realtime match snapshots to connected overlays and panels.
///
/// The stream opens with the current snapshot so a reconnecting observer is
/// immediately consistent; there is no diff log to replay.
pub async fn scoreboard_stream(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<axum::response::sse::Event, Infallible>>> {
    let receiver = sse_service::subscribe(&state);
    info!("new scoreboard SSE connection");
    let snapshot = game_service::snapshot(&state).await;
    sse_service::to_sse_stream(sse_events::snapshot_event(&snapshot), receiver)
}

/// Configure the SSE endpoints.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/sse/scoreboard", get(scoreboard_stream))
}

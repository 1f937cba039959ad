//! Snapshot broadcasting to every connected observer.

use axum::extract::ws::Message;
use tracing::warn;

use crate::{
    dto::{game::GameStateSnapshot, sse::ServerEvent, ws::OperatorOutboundMessage},
    state::SharedState,
};

/// Event name carrying the full match snapshot.
pub const EVENT_GAME_STATE: &str = "gameState";

/// Wrap a snapshot into the SSE envelope.
pub fn snapshot_event(snapshot: &GameStateSnapshot) -> Option<ServerEvent> {
    match ServerEvent::json(Some(EVENT_GAME_STATE.to_string()), snapshot) {
        Ok(event) => Some(event),
        Err(err) => {
            warn!(error = %err, "failed to serialize game state for SSE");
            None
        }
    }
}

/// Push an already-built snapshot to the SSE hub and every operator socket.
///
/// Delivery is fire-and-forget: a subscriber that lags or disconnects simply
/// receives the next snapshot instead.
pub fn broadcast_snapshot(state: &SharedState, snapshot: &GameStateSnapshot) {
    if let Some(event) = snapshot_event(snapshot) {
        state.sse_hub().broadcast(event);
    }

    let message = OperatorOutboundMessage::GameState {
        state: snapshot.clone(),
    };
    let payload = match serde_json::to_string(&message) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(error = %err, "failed to serialize game state for sockets");
            return;
        }
    };

    let mut closed = Vec::new();
    for connection in state.operators().iter() {
        if connection
            .tx
            .send(Message::Text(payload.clone().into()))
            .is_err()
        {
            closed.push(connection.id.clone());
        }
    }
    for id in closed {
        state.operators().remove(&id);
        warn!(id = %id, "dropping closed operator connection");
    }
}

/// Snapshot the current match state and broadcast it.
pub async fn broadcast_game_state(state: &SharedState) {
    let snapshot = {
        let guard = state.game().read().await;
        GameStateSnapshot::from(&*guard)
    };
    broadcast_snapshot(state, &snapshot);
}

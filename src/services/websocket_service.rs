//! Operator WebSocket lifecycle and command dispatch.

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    dto::ws::{OperatorInboundMessage, OperatorOutboundMessage},
    error::ServiceError,
    services::{clock_service, game_service},
    state::{OperatorConnection, SharedState},
};

/// The peer went away; the connection should be torn down.
#[derive(Debug, Error)]
#[error("connection closed")]
pub struct ConnectionClosed;

/// Handle the full lifecycle for an operator WebSocket connection.
pub async fn handle_socket(state: SharedState, socket: WebSocket) {
    let (mut sender, mut receiver) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Message>();

    // Dedicated writer task keeps outbound snapshots flowing even while we
    // await inbound frames.
    let writer_task = tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            if sender.send(message).await.is_err() {
                break;
            }
        }
    });

    let connection_id = Uuid::new_v4().simple().to_string();
    state.operators().insert(
        connection_id.clone(),
        OperatorConnection {
            id: connection_id.clone(),
            tx: outbound_tx.clone(),
        },
    );
    info!(id = %connection_id, "operator connected");

    // A fresh observer gets the current snapshot before any broadcast.
    let initial = OperatorOutboundMessage::GameState {
        state: game_service::snapshot(&state).await,
    };
    if send_message_to_websocket(&outbound_tx, &initial).is_err() {
        info!(id = %connection_id, "connection closed during initial snapshot send, terminating");
        state.operators().remove(&connection_id);
        finalize(writer_task, outbound_tx).await;
        return;
    }

    while let Some(message) = receiver.next().await {
        match message {
            Ok(Message::Text(text)) => match OperatorInboundMessage::from_json_str(&text) {
                Ok(command) => {
                    if let Err(err) = handle_command(&state, command).await {
                        warn!(id = %connection_id, error = %err, "operator command rejected");
                    }
                }
                Err(err) => {
                    warn!(id = %connection_id, error = %err, "failed to parse or validate operator message");
                }
            },
            Ok(Message::Ping(payload)) => {
                let _ = outbound_tx.send(Message::Pong(payload));
            }
            Ok(Message::Close(frame)) => {
                info!(id = %connection_id, "operator closed");
                let _ = outbound_tx.send(Message::Close(frame));
                break;
            }
            Ok(Message::Binary(_)) => {}
            Ok(Message::Pong(_)) => {}
            Err(err) => {
                warn!(id = %connection_id, error = %err, "websocket error");
                break;
            }
        }
    }

    state.operators().remove(&connection_id);
    info!(id = %connection_id, "operator disconnected");

    finalize(writer_task, outbound_tx).await;
}

/// Dispatch one parsed operator command against the shared state.
///
/// Rejected input leaves the state untouched; every accepted command ends in
/// a fresh snapshot broadcast from the service it lands in.
async fn handle_command(
    state: &SharedState,
    command: OperatorInboundMessage,
) -> Result<(), ServiceError> {
    match command {
        OperatorInboundMessage::UpdateGameState { updates } => {
            game_service::apply_partial_update(state, updates).await?;
        }
        OperatorInboundMessage::StartClock => clock_service::start_clock(state).await,
        OperatorInboundMessage::StopClock => clock_service::stop_clock(state).await,
        OperatorInboundMessage::SetClock { time_ms } => {
            clock_service::set_clock(state, time_ms).await;
        }
        OperatorInboundMessage::SetClockText { text } => {
            clock_service::set_clock_text(state, &text).await;
        }
        OperatorInboundMessage::ClockIncrease => clock_service::increase_clock(state).await,
        OperatorInboundMessage::ClockDecrease => clock_service::decrease_clock(state).await,
        OperatorInboundMessage::Unknown => {
            warn!("ignoring unknown operator command");
        }
    }
    Ok(())
}

/// Serialize a payload and push it onto the provided WebSocket sender.
///
/// Serialization failure is a permanent error (a bug in the payload type), so
/// it is logged and swallowed; a closed writer channel is reported so the
/// caller can tear the connection down.
fn send_message_to_websocket<T>(
    tx: &mpsc::UnboundedSender<Message>,
    value: &T,
) -> Result<(), ConnectionClosed>
where
    T: ?Sized + serde::Serialize + std::fmt::Debug,
{
    let payload = match serde_json::to_string(value) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(error = %err, "failed to serialize message `{value:?}` (permanent error, not retrying)");
            return Ok(());
        }
    };

    tx.send(Message::Text(payload.into()))
        .map_err(|_| ConnectionClosed)
}

/// Ensure the writer task winds down before we return from the socket handler.
async fn finalize(writer_task: JoinHandle<()>, outbound_tx: mpsc::UnboundedSender<Message>) {
    drop(outbound_tx);
    let _ = writer_task.await;
}

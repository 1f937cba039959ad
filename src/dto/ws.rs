use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::dto::game::{GameStatePatch, GameStateSnapshot};

/// Failure to turn a raw socket frame into a usable operator command.
#[derive(Debug, Error)]
pub enum OperatorMessageError {
    /// The frame was not valid JSON for any known command.
    #[error("malformed operator message: {0}")]
    Json(#[from] serde_json::Error),
    /// The command parsed but carried invalid field values.
    #[error("invalid operator message: {0}")]
    Validation(#[from] ValidationErrors),
}

#[derive(Debug, Deserialize, ToSchema)]
/// Commands accepted from the operator WebSocket.
#[serde(tag = "type")]
pub enum OperatorInboundMessage {
    /// Replace-by-key partial update of the match state.
    #[serde(rename = "updateGameState")]
    UpdateGameState {
        /// Sections to replace.
        updates: GameStatePatch,
    },
    /// Start the period countdown.
    #[serde(rename = "startClock")]
    StartClock,
    /// Stop the period countdown.
    #[serde(rename = "stopClock")]
    StopClock,
    /// Force the clock to an absolute number of milliseconds.
    #[serde(rename = "setClock")]
    SetClock {
        /// New remaining time in milliseconds.
        #[serde(rename = "timeMs")]
        time_ms: u64,
    },
    /// Set the clock from free-form operator text (`"20:00"`, `"205"`, ...).
    /// Unparseable text is rejected and the prior value kept.
    #[serde(rename = "setClockText")]
    SetClockText {
        /// Raw operator input.
        text: String,
    },
    /// Add one second to the clock.
    #[serde(rename = "clockIncrease")]
    ClockIncrease,
    /// Remove one second from the clock.
    #[serde(rename = "clockDecrease")]
    ClockDecrease,
    /// Unknown command type, logged and ignored.
    #[serde(other)]
    Unknown,
}

impl OperatorInboundMessage {
    /// Parse and validate a raw text frame from the operator socket.
    pub fn from_json_str(raw: &str) -> Result<Self, OperatorMessageError> {
        let message: Self = serde_json::from_str(raw)?;
        if let OperatorInboundMessage::UpdateGameState { updates } = &message {
            updates.validate()?;
        }
        Ok(message)
    }
}

#[derive(Clone, Debug, Serialize, ToSchema)]
/// Messages pushed to operator WebSocket clients.
#[serde(tag = "type")]
pub enum OperatorOutboundMessage {
    /// Full match snapshot, pushed on connect and after every mutation or tick.
    #[serde(rename = "gameState")]
    GameState {
        /// The snapshot.
        state: GameStateSnapshot,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_commands() {
        assert!(matches!(
            OperatorInboundMessage::from_json_str(r#"{"type": "startClock"}"#).unwrap(),
            OperatorInboundMessage::StartClock
        ));
        assert!(matches!(
            OperatorInboundMessage::from_json_str(r#"{"type": "setClock", "timeMs": 300000}"#)
                .unwrap(),
            OperatorInboundMessage::SetClock { time_ms: 300_000 }
        ));
    }

    #[test]
    fn unknown_command_types_map_to_unknown() {
        assert!(matches!(
            OperatorInboundMessage::from_json_str(r#"{"type": "fireConfetti"}"#).unwrap(),
            OperatorInboundMessage::Unknown
        ));
    }

    #[test]
    fn update_command_is_validated() {
        let raw = r##"{
            "type": "updateGameState",
            "updates": {
                "homeTeam": {
                    "name": "Wolves", "abbreviation": "WLV", "color": "#112233",
                    "score": 0, "shots": 0, "timeouts": 1,
                    "penalties": [{"playerNumber": "no", "timeRemaining": 1, "duration": 1}]
                }
            }
        }"##;

        assert!(matches!(
            OperatorInboundMessage::from_json_str(raw),
            Err(OperatorMessageError::Validation(_))
        ));
    }

    #[test]
    fn garbage_frames_are_json_errors() {
        assert!(matches!(
            OperatorInboundMessage::from_json_str("not json"),
            Err(OperatorMessageError::Json(_))
        ));
    }
}

//! Shared application state: the authoritative match snapshot, broadcast
//! fan-out, and the clock tick task handle.

pub mod clock;
pub mod game;
pub mod penalty;
mod sse;
pub mod timefmt;

use std::{sync::Arc, time::SystemTime};

use axum::extract::ws::Message;
use dashmap::DashMap;
use tokio::{
    sync::{Mutex, RwLock},
    task::JoinHandle,
};

use crate::{config::AppConfig, dao::settings_store::SettingsStore, state::game::MatchState};

pub use self::sse::SseHub;

/// Shared handle to the application state.
pub type SharedState = Arc<AppState>;

/// Capacity of the SSE broadcast channel.
const SSE_CHANNEL_CAPACITY: usize = 16;

#[derive(Clone)]
/// Handle used to push messages to a connected operator socket.
pub struct OperatorConnection {
    /// Server-assigned connection identifier, used for logging and cleanup.
    pub id: String,
    /// Writer half of the socket.
    pub tx: tokio::sync::mpsc::UnboundedSender<Message>,
}

/// Central application state owning the match snapshot and its observers.
///
/// Every mutation funnels through a write guard on [`AppState::game`], so a
/// command's read-modify-broadcast sequence can never interleave with the
/// tick task or another command.
pub struct AppState {
    config: AppConfig,
    game: RwLock<MatchState>,
    sse: SseHub,
    operators: DashMap<String, OperatorConnection>,
    settings: SettingsStore,
    ticker: Mutex<Option<JoinHandle<()>>>,
    started_at: SystemTime,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(config: AppConfig) -> SharedState {
        let game = MatchState::new(config.period_length_ms(), clock::unix_now_ms());
        let settings = SettingsStore::new(config.data_dir().to_path_buf());
        Arc::new(Self {
            config,
            game: RwLock::new(game),
            sse: SseHub::new(SSE_CHANNEL_CAPACITY),
            operators: DashMap::new(),
            settings,
            ticker: Mutex::new(None),
            started_at: SystemTime::now(),
        })
    }

    /// Immutable runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The authoritative match state, guarded for serialized mutation.
    pub fn game(&self) -> &RwLock<MatchState> {
        &self.game
    }

    /// Broadcast hub feeding the scoreboard SSE stream.
    pub fn sse_hub(&self) -> &SseHub {
        &self.sse
    }

    /// Registry of connected operator sockets keyed by connection id.
    pub fn operators(&self) -> &DashMap<String, OperatorConnection> {
        &self.operators
    }

    /// File-backed settings persistence.
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Slot holding the running clock tick task, if any.
    pub fn ticker(&self) -> &Mutex<Option<JoinHandle<()>>> {
        &self.ticker
    }

    /// Process start time, reported by the healthcheck.
    pub fn started_at(&self) -> SystemTime {
        self.started_at
    }
}

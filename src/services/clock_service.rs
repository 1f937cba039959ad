//! Clock commands and the authoritative tick loop.

use tokio::time::{MissedTickBehavior, interval};
use tracing::warn;

use crate::{
    dto::game::GameStateSnapshot,
    services::sse_events,
    state::{
        SharedState,
        clock::{NUDGE_STEP_MS, unix_now_ms},
        timefmt,
    },
};

/// Start the period countdown and the tick task. No-op while already running.
pub async fn start_clock(state: &SharedState) {
    let started = {
        let mut guard = state.game().write().await;
        guard.clock.start(unix_now_ms())
    };
    if !started {
        return;
    }

    sse_events::broadcast_game_state(state).await;
    spawn_ticker(state).await;
}

/// Stop the countdown, committing the extrapolated remaining time. No-op
/// while already stopped.
pub async fn stop_clock(state: &SharedState) {
    abort_ticker(state).await;

    let stopped = {
        let mut guard = state.game().write().await;
        guard.clock.stop(unix_now_ms())
    };
    if stopped {
        sse_events::broadcast_game_state(state).await;
    }
}

/// Force the clock to an absolute value, leaving the run state untouched.
pub async fn set_clock(state: &SharedState, time_ms: u64) {
    {
        let mut guard = state.game().write().await;
        guard.clock.set_remaining(time_ms, unix_now_ms());
    }
    sse_events::broadcast_game_state(state).await;
}

/// Set the clock from free-form operator text. Unparseable input is rejected
/// and the prior value kept.
pub async fn set_clock_text(state: &SharedState, text: &str) {
    match timefmt::parse_operator_input(text) {
        Some(time_ms) => set_clock(state, time_ms).await,
        None => warn!(input = %text, "rejecting unparseable clock input"),
    }
}

/// Add one second to the clock.
pub async fn increase_clock(state: &SharedState) {
    nudge_clock(state, NUDGE_STEP_MS).await;
}

/// Remove one second from the clock.
pub async fn decrease_clock(state: &SharedState) {
    nudge_clock(state, -NUDGE_STEP_MS).await;
}

/// Reconcile the tick task with the clock's run state after a patch replaced
/// the clock wholesale.
pub async fn sync_ticker(state: &SharedState) {
    let running = {
        let guard = state.game().read().await;
        guard.clock.is_running()
    };
    if running {
        spawn_ticker(state).await;
    } else {
        abort_ticker(state).await;
    }
}

async fn nudge_clock(state: &SharedState, delta_ms: i64) {
    {
        let mut guard = state.game().write().await;
        guard.clock.nudge(delta_ms);
    }
    sse_events::broadcast_game_state(state).await;
}

/// Install a fresh tick task, replacing (and cancelling) any previous one so
/// repeated starts never accumulate timers.
async fn spawn_ticker(state: &SharedState) {
    let mut slot = state.ticker().lock().await;
    if let Some(previous) = slot.take() {
        previous.abort();
    }
    *slot = Some(tokio::spawn(run_ticker(state.clone())));
}

async fn abort_ticker(state: &SharedState) {
    if let Some(handle) = state.ticker().lock().await.take() {
        handle.abort();
    }
}

/// The tick loop: advance the clock and every penalty bench, then broadcast.
///
/// Each pass holds the write guard for the whole advance, so ticks serialize
/// with inbound commands and can never overlap themselves. The loop ends when
/// the clock is found stopped or expires to zero.
async fn run_ticker(state: SharedState) {
    let mut ticks = interval(state.config().tick_interval());
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick completes immediately; skip it so a full interval
    // elapses before the first advance
    ticks.tick().await;

    loop {
        ticks.tick().await;

        let snapshot = {
            let mut guard = state.game().write().await;
            if !guard.clock.is_running() {
                break;
            }
            guard.tick(unix_now_ms());
            GameStateSnapshot::from(&*guard)
        };

        let expired = !snapshot.clock.is_running;
        sse_events::broadcast_snapshot(&state, &snapshot);
        if expired {
            break;
        }
    }
}

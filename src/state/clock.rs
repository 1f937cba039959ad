//! Authoritative countdown clock for the current period.

use std::time::{SystemTime, UNIX_EPOCH};

/// Default period length loaded into a fresh match (20 minutes).
pub const DEFAULT_PERIOD_MS: u64 = 20 * 60 * 1000;

/// Step applied by the quick `clockIncrease`/`clockDecrease` commands.
pub const NUDGE_STEP_MS: i64 = 1000;

/// Current wall-clock time as unix epoch milliseconds.
pub fn unix_now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

/// The match clock: a countdown that is exact while stopped and extrapolated
/// from `last_update_ms` while running.
///
/// Remaining time is stored signed so quick nudges may dip below zero between
/// ticks; every read through [`MatchClock::remaining_ms`] clamps at zero, and
/// the next tick or stop commits the clamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchClock {
    time_remaining_ms: i64,
    is_running: bool,
    last_update_ms: u64,
}

impl MatchClock {
    /// Create a stopped clock holding `remaining_ms`.
    pub fn new(remaining_ms: u64, now_ms: u64) -> Self {
        Self {
            time_remaining_ms: remaining_ms as i64,
            is_running: false,
            last_update_ms: now_ms,
        }
    }

    /// Restore a clock verbatim from an operator patch.
    pub fn from_parts(time_remaining_ms: i64, is_running: bool, last_update_ms: u64) -> Self {
        Self {
            time_remaining_ms,
            is_running,
            last_update_ms,
        }
    }

    /// Remaining milliseconds, clamped at zero.
    pub fn remaining_ms(&self) -> u64 {
        self.time_remaining_ms.max(0) as u64
    }

    /// Whether the countdown is currently running.
    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// Wall-clock instant (epoch ms) at which the stored value was last exact.
    pub fn last_update_ms(&self) -> u64 {
        self.last_update_ms
    }

    /// Start the countdown. Returns false (and changes nothing) when the
    /// clock is already running.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.is_running {
            return false;
        }
        self.is_running = true;
        self.last_update_ms = now_ms;
        true
    }

    /// Stop the countdown, committing the extrapolated remaining time.
    /// Returns false (and changes nothing) when the clock is already stopped.
    pub fn stop(&mut self, now_ms: u64) -> bool {
        if !self.is_running {
            return false;
        }
        let elapsed = now_ms.saturating_sub(self.last_update_ms);
        self.time_remaining_ms = (self.time_remaining_ms - elapsed as i64).max(0);
        self.is_running = false;
        self.last_update_ms = now_ms;
        true
    }

    /// Force the remaining time to an absolute value, leaving the run state
    /// untouched. Used for operator corrections and preset resets.
    pub fn set_remaining(&mut self, ms: u64, now_ms: u64) {
        self.time_remaining_ms = ms as i64;
        self.last_update_ms = now_ms;
    }

    /// Add a signed adjustment without touching `last_update_ms` or the run
    /// state. May leave the stored value negative until the next tick or read.
    pub fn nudge(&mut self, delta_ms: i64) {
        self.time_remaining_ms += delta_ms;
    }

    /// Advance the countdown by the wall time elapsed since the last update.
    ///
    /// Only acts while running. Clamps at zero and auto-stops when the period
    /// expires; the clock never runs past zero and never advances the period
    /// on its own. Returns the elapsed milliseconds consumed, which the
    /// caller feeds to every penalty bench so all timers share one time base.
    pub fn tick(&mut self, now_ms: u64) -> u64 {
        if !self.is_running {
            return 0;
        }
        let elapsed = now_ms.saturating_sub(self.last_update_ms);
        self.time_remaining_ms = (self.time_remaining_ms - elapsed as i64).max(0);
        self.last_update_ms = now_ms;
        if self.time_remaining_ms == 0 {
            self.is_running = false;
        }
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_is_a_noop_while_running() {
        let mut clock = MatchClock::new(600_000, 1_000);
        assert!(clock.start(1_000));
        assert!(!clock.start(2_000));
        assert_eq!(clock.last_update_ms(), 1_000);
    }

    #[test]
    fn stop_commits_elapsed_time() {
        let mut clock = MatchClock::new(600_000, 1_000);
        clock.start(1_000);
        assert!(clock.stop(4_500));

        assert!(!clock.is_running());
        assert_eq!(clock.remaining_ms(), 596_500);
        assert_eq!(clock.last_update_ms(), 4_500);
        assert!(!clock.stop(5_000));
    }

    #[test]
    fn stop_clamps_at_zero_after_overrun() {
        let mut clock = MatchClock::new(3_000, 0);
        clock.start(0);
        clock.stop(10_000);
        assert_eq!(clock.remaining_ms(), 0);
    }

    #[test]
    fn many_small_ticks_match_one_big_stop() {
        let mut ticked = MatchClock::new(600_000, 0);
        ticked.start(0);
        for now in (100..=30_000).step_by(100) {
            ticked.tick(now);
        }

        let mut stopped = MatchClock::new(600_000, 0);
        stopped.start(0);
        stopped.stop(30_000);

        assert_eq!(ticked.remaining_ms(), stopped.remaining_ms());
    }

    #[test]
    fn irregular_tick_granularity_is_equivalent() {
        let mut clock = MatchClock::new(600_000, 0);
        clock.start(0);
        for now in [37, 1_000, 1_001, 8_400, 30_000] {
            clock.tick(now);
        }
        assert_eq!(clock.remaining_ms(), 570_000);
    }

    #[test]
    fn tick_auto_stops_at_zero() {
        let mut clock = MatchClock::new(3_000, 0);
        clock.start(0);

        clock.tick(3_100);

        assert_eq!(clock.remaining_ms(), 0);
        assert!(!clock.is_running());
    }

    #[test]
    fn simulated_ticks_drive_auto_stop() {
        let mut clock = MatchClock::new(3_000, 0);
        clock.start(0);

        for now in (100..=3_100).step_by(100) {
            clock.tick(now);
        }

        assert_eq!(clock.remaining_ms(), 0);
        assert!(!clock.is_running());
    }

    #[test]
    fn tick_does_nothing_while_stopped() {
        let mut clock = MatchClock::new(3_000, 0);
        assert_eq!(clock.tick(10_000), 0);
        assert_eq!(clock.remaining_ms(), 3_000);
    }

    #[test]
    fn set_remaining_keeps_run_state() {
        let mut clock = MatchClock::new(600_000, 0);
        clock.start(0);
        clock.set_remaining(300_000, 5_000);

        assert!(clock.is_running());
        assert_eq!(clock.remaining_ms(), 300_000);
        assert_eq!(clock.last_update_ms(), 5_000);
    }

    #[test]
    fn nudge_leaves_last_update_alone_and_clamps_on_read() {
        let mut clock = MatchClock::new(500, 1_000);
        clock.nudge(-NUDGE_STEP_MS);

        assert_eq!(clock.last_update_ms(), 1_000);
        assert_eq!(clock.remaining_ms(), 0);

        clock.nudge(NUDGE_STEP_MS);
        assert_eq!(clock.remaining_ms(), 500);
    }

    #[test]
    fn negative_nudge_is_committed_at_next_tick() {
        let mut clock = MatchClock::new(500, 0);
        clock.start(0);
        clock.nudge(-NUDGE_STEP_MS);

        clock.tick(100);

        assert_eq!(clock.remaining_ms(), 0);
        assert!(!clock.is_running());
    }
}

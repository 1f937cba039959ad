//! The match state aggregate: two team records, the clock, and the period.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::{clock::MatchClock, penalty::PenaltyBench};

/// Timeouts each side holds at the start of a match.
pub const DEFAULT_TIMEOUTS: u32 = 1;

/// Identity fields of a team, restorable from saved defaults and presets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamIdentity {
    /// Full display name.
    pub name: String,
    /// Short code shown next to the score.
    pub abbreviation: String,
    /// Logo reference (URL or data URI); empty when unset.
    pub logo: String,
    /// Accent color as a CSS hex string.
    pub color: String,
}

impl TeamIdentity {
    /// Identity loaded for the home side of a fresh match.
    pub fn home_default() -> Self {
        Self {
            name: "Home Team".to_string(),
            abbreviation: "HOM".to_string(),
            logo: String::new(),
            color: "#3b82f6".to_string(),
        }
    }

    /// Identity loaded for the away side of a fresh match.
    pub fn away_default() -> Self {
        Self {
            name: "Away Team".to_string(),
            abbreviation: "AWY".to_string(),
            logo: String::new(),
            color: "#ef4444".to_string(),
        }
    }
}

/// Everything tracked per team: identity, counters, and the penalty bench.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRecord {
    /// Who this team is.
    pub identity: TeamIdentity,
    /// Goals scored.
    pub score: u32,
    /// Shots on goal.
    pub shots: u32,
    /// Timeouts left.
    pub timeouts: u32,
    /// Active penalties in insertion order.
    pub penalties: PenaltyBench,
}

impl TeamRecord {
    /// Fresh record with zeroed counters and an empty bench.
    pub fn new(identity: TeamIdentity) -> Self {
        Self {
            identity,
            score: 0,
            shots: 0,
            timeouts: DEFAULT_TIMEOUTS,
            penalties: PenaltyBench::new(),
        }
    }
}

/// Period of play shown on the scoreboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Period {
    /// First period.
    #[default]
    #[serde(rename = "1st")]
    First,
    /// Second period.
    #[serde(rename = "2nd")]
    Second,
    /// Third period.
    #[serde(rename = "3rd")]
    Third,
    /// Overtime.
    #[serde(rename = "OT")]
    Overtime,
}

/// The single authoritative match snapshot broadcast to every observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    /// Home side.
    pub home: TeamRecord,
    /// Away side.
    pub away: TeamRecord,
    /// Authoritative period countdown.
    pub clock: MatchClock,
    /// Current period label.
    pub period: Period,
}

impl MatchState {
    /// Build the boot-time state: default identities, zeroed counters, a
    /// stopped clock holding a full period, and the first period selected.
    pub fn new(period_length_ms: u64, now_ms: u64) -> Self {
        Self {
            home: TeamRecord::new(TeamIdentity::home_default()),
            away: TeamRecord::new(TeamIdentity::away_default()),
            clock: MatchClock::new(period_length_ms, now_ms),
            period: Period::default(),
        }
    }

    /// Advance the clock and, by the same elapsed wall time, every penalty on
    /// both benches. Penalties have no scheduling of their own, which keeps
    /// all timers in the match on exactly one time base.
    pub fn tick(&mut self, now_ms: u64) -> u64 {
        let elapsed = self.clock.tick(now_ms);
        if elapsed > 0 {
            self.home.penalties.advance(elapsed);
            self.away.penalties.advance(elapsed);
        }
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boot_state_matches_defaults() {
        let state = MatchState::new(1_200_000, 0);

        assert_eq!(state.home.identity.name, "Home Team");
        assert_eq!(state.home.identity.abbreviation, "HOM");
        assert_eq!(state.away.identity.name, "Away Team");
        assert_eq!(state.away.identity.abbreviation, "AWY");
        assert_eq!(state.home.score, 0);
        assert_eq!(state.home.timeouts, DEFAULT_TIMEOUTS);
        assert_eq!(state.period, Period::First);
        assert!(!state.clock.is_running());
        assert_eq!(state.clock.remaining_ms(), 1_200_000);
        assert!(state.home.penalties.is_empty());
        assert!(state.away.penalties.is_empty());
    }

    #[test]
    fn tick_advances_clock_and_both_benches_together() {
        let mut state = MatchState::new(1_200_000, 0);
        state.home.penalties.add(Some("12".into()), Some(120_000));
        state.away.penalties.add(Some("8".into()), Some(5_000));
        state.clock.start(0);

        state.tick(4_800);

        assert_eq!(state.clock.remaining_ms(), 1_195_200);
        assert_eq!(
            state.home.penalties.iter().next().unwrap().time_remaining_ms,
            115_200
        );
        assert_eq!(
            state.away.penalties.iter().next().unwrap().time_remaining_ms,
            200
        );

        state.tick(5_100);
        assert!(state.away.penalties.is_empty());
        assert_eq!(state.home.penalties.len(), 1);
    }

    #[test]
    fn benches_freeze_while_clock_is_stopped() {
        let mut state = MatchState::new(1_200_000, 0);
        state.home.penalties.add(None, None);

        assert_eq!(state.tick(60_000), 0);
        assert_eq!(
            state.home.penalties.iter().next().unwrap().time_remaining_ms,
            120_000
        );
    }

    #[test]
    fn period_labels_serialize_like_the_scoreboard() {
        assert_eq!(serde_json::to_string(&Period::First).unwrap(), "\"1st\"");
        assert_eq!(serde_json::to_string(&Period::Overtime).unwrap(), "\"OT\"");
        assert_eq!(
            serde_json::from_str::<Period>("\"2nd\"").unwrap(),
            Period::Second
        );
    }
}

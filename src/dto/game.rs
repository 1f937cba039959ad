//! Wire representation of the match state: outbound snapshots and inbound
//! partial-update patches. Field names are camelCase to match the scoreboard
//! frontend protocol.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::{
    dto::validation::validate_player_number,
    state::{
        clock::MatchClock,
        game::{MatchState, Period, TeamIdentity, TeamRecord},
        penalty::{Penalty, PenaltyBench},
        timefmt,
    },
};

/// Projection of one penalty for broadcast.
#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PenaltySnapshot {
    /// Opaque unique penalty token.
    pub id: String,
    /// Short numeric player string; `"00"` means unspecified.
    pub player_number: String,
    /// Milliseconds left on the countdown.
    pub time_remaining: u64,
    /// Original penalty length in milliseconds.
    pub duration: u64,
    /// Countdown rendered `m:ss`, rounded up to the next whole second.
    pub display: String,
}

impl From<&Penalty> for PenaltySnapshot {
    fn from(penalty: &Penalty) -> Self {
        Self {
            id: penalty.id.clone(),
            player_number: penalty.player_number.clone(),
            time_remaining: penalty.time_remaining_ms,
            duration: penalty.duration_ms,
            display: timefmt::format_penalty_remaining(penalty.time_remaining_ms),
        }
    }
}

/// Projection of one team for broadcast.
#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamSnapshot {
    /// Full display name.
    pub name: String,
    /// Short code shown next to the score.
    pub abbreviation: String,
    /// Logo reference; empty when unset.
    pub logo: String,
    /// Accent color as a CSS hex string.
    pub color: String,
    /// Goals scored.
    pub score: u32,
    /// Shots on goal.
    pub shots: u32,
    /// Timeouts left.
    pub timeouts: u32,
    /// Active penalties in insertion order.
    pub penalties: Vec<PenaltySnapshot>,
}

impl From<&TeamRecord> for TeamSnapshot {
    fn from(team: &TeamRecord) -> Self {
        Self {
            name: team.identity.name.clone(),
            abbreviation: team.identity.abbreviation.clone(),
            logo: team.identity.logo.clone(),
            color: team.identity.color.clone(),
            score: team.score,
            shots: team.shots,
            timeouts: team.timeouts,
            penalties: team.penalties.iter().map(PenaltySnapshot::from).collect(),
        }
    }
}

/// Projection of the clock for broadcast.
///
/// `timeRemaining` is clamped at zero; observers extrapolate between ticks
/// from `lastUpdate` for smooth rendering, read-only.
#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClockSnapshot {
    /// Remaining milliseconds, clamped at zero.
    pub time_remaining: u64,
    /// Whether the countdown is running.
    pub is_running: bool,
    /// Epoch milliseconds at which `timeRemaining` was last exact.
    pub last_update: u64,
    /// Remaining time rendered for the scoreboard.
    pub display: String,
}

impl From<&MatchClock> for ClockSnapshot {
    fn from(clock: &MatchClock) -> Self {
        let remaining = clock.remaining_ms();
        Self {
            time_remaining: remaining,
            is_running: clock.is_running(),
            last_update: clock.last_update_ms(),
            display: timefmt::format_remaining(remaining),
        }
    }
}

/// Full match snapshot broadcast to every observer after each mutation or tick.
#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameStateSnapshot {
    /// Home side.
    pub home_team: TeamSnapshot,
    /// Away side.
    pub away_team: TeamSnapshot,
    /// Authoritative period countdown.
    pub clock: ClockSnapshot,
    /// Current period label.
    pub period: Period,
}

impl From<&MatchState> for GameStateSnapshot {
    fn from(state: &MatchState) -> Self {
        Self {
            home_team: TeamSnapshot::from(&state.home),
            away_team: TeamSnapshot::from(&state.away),
            clock: ClockSnapshot::from(&state.clock),
            period: state.period,
        }
    }
}

/// One penalty inside a team patch. A missing id means a freshly added
/// penalty; the server assigns one.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PenaltyPatch {
    /// Existing penalty token, absent for new penalties.
    #[serde(default)]
    pub id: Option<String>,
    /// Short numeric player string.
    pub player_number: String,
    /// Milliseconds left on the countdown.
    pub time_remaining: u64,
    /// Original penalty length in milliseconds.
    pub duration: u64,
}

impl Validate for PenaltyPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_player_number(&self.player_number) {
            errors.add("player_number", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl PenaltyPatch {
    fn into_penalty(self) -> Penalty {
        let id = self
            .id
            .unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string());
        Penalty {
            id,
            player_number: self.player_number,
            time_remaining_ms: self.time_remaining,
            duration_ms: self.duration,
        }
    }
}

/// A complete team record supplied by a patch. Teams are replaced wholesale:
/// an updater that wants to change one field must send the entire record,
/// penalties included.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TeamPatch {
    /// Full display name.
    pub name: String,
    /// Short code shown next to the score.
    pub abbreviation: String,
    /// Logo reference; empty when unset.
    #[serde(default)]
    pub logo: String,
    /// Accent color as a CSS hex string.
    pub color: String,
    /// Goals scored.
    pub score: u32,
    /// Shots on goal.
    pub shots: u32,
    /// Timeouts left.
    pub timeouts: u32,
    /// The team's entire penalty list.
    #[serde(default)]
    #[validate(nested)]
    pub penalties: Vec<PenaltyPatch>,
}

impl TeamPatch {
    /// Build the replacement team record.
    pub fn into_record(self) -> TeamRecord {
        TeamRecord {
            identity: TeamIdentity {
                name: self.name,
                abbreviation: self.abbreviation,
                logo: self.logo,
                color: self.color,
            },
            score: self.score,
            shots: self.shots,
            timeouts: self.timeouts,
            penalties: PenaltyBench::from_penalties(
                self.penalties
                    .into_iter()
                    .map(PenaltyPatch::into_penalty)
                    .collect(),
            ),
        }
    }
}

/// A complete clock state supplied by a patch, applied verbatim.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClockPatch {
    /// Remaining milliseconds.
    pub time_remaining: i64,
    /// Whether the countdown should be running.
    pub is_running: bool,
    /// Epoch milliseconds at which `timeRemaining` was exact.
    pub last_update: u64,
}

impl ClockPatch {
    /// Build the replacement clock.
    pub fn into_clock(self) -> MatchClock {
        MatchClock::from_parts(self.time_remaining, self.is_running, self.last_update)
    }
}

/// Partial match-state update sent by the operator.
///
/// Whichever top-level sections are present replace the corresponding current
/// section wholesale; this is a replace-by-key merge, not a deep merge.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GameStatePatch {
    /// Replacement home team record.
    #[serde(default)]
    #[validate(nested)]
    pub home_team: Option<TeamPatch>,
    /// Replacement away team record.
    #[serde(default)]
    #[validate(nested)]
    pub away_team: Option<TeamPatch>,
    /// Replacement clock state.
    #[serde(default)]
    pub clock: Option<ClockPatch>,
    /// Replacement period label.
    #[serde(default)]
    pub period: Option<Period>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::game::MatchState;

    #[test]
    fn snapshot_carries_display_strings() {
        let mut state = MatchState::new(125_000, 0);
        state.home.penalties.add(Some("12".into()), Some(119_001));

        let snapshot = GameStateSnapshot::from(&state);

        assert_eq!(snapshot.clock.display, "2:05");
        assert_eq!(snapshot.home_team.penalties[0].display, "2:00");
        assert_eq!(snapshot.period, Period::First);
    }

    #[test]
    fn snapshot_clamps_a_nudged_negative_clock() {
        let mut state = MatchState::new(500, 0);
        state.clock.nudge(-1_000);

        let snapshot = GameStateSnapshot::from(&state);

        assert_eq!(snapshot.clock.time_remaining, 0);
        assert_eq!(snapshot.clock.display, "0:00");
    }

    #[test]
    fn team_patch_rebuilds_the_whole_record() {
        let patch: TeamPatch = serde_json::from_str(
            r##"{
                "name": "Wolves",
                "abbreviation": "WLV",
                "logo": "",
                "color": "#112233",
                "score": 3,
                "shots": 17,
                "timeouts": 0,
                "penalties": [
                    {"id": "abc", "playerNumber": "12", "timeRemaining": 90000, "duration": 120000},
                    {"playerNumber": "00", "timeRemaining": 120000, "duration": 120000}
                ]
            }"##,
        )
        .unwrap();

        let record = patch.into_record();

        assert_eq!(record.identity.name, "Wolves");
        assert_eq!(record.score, 3);
        assert_eq!(record.penalties.len(), 2);

        let mut penalties = record.penalties.iter();
        let kept = penalties.next().unwrap();
        assert_eq!(kept.id, "abc");
        assert_eq!(kept.time_remaining_ms, 90_000);
        assert_eq!(kept.duration_ms, 120_000);

        let added = penalties.next().unwrap();
        assert!(!added.id.is_empty());
        assert_eq!(added.player_number, "00");
    }

    #[test]
    fn patch_validation_rejects_bad_player_numbers() {
        let patch: GameStatePatch = serde_json::from_str(
            r##"{
                "homeTeam": {
                    "name": "Wolves", "abbreviation": "WLV", "color": "#112233",
                    "score": 0, "shots": 0, "timeouts": 1,
                    "penalties": [{"playerNumber": "123", "timeRemaining": 1000, "duration": 1000}]
                }
            }"##,
        )
        .unwrap();

        assert!(patch.validate().is_err());
    }

    #[test]
    fn empty_patch_deserializes_to_all_absent_sections() {
        let patch: GameStatePatch = serde_json::from_str("{}").unwrap();
        assert!(patch.home_team.is_none());
        assert!(patch.away_team.is_none());
        assert!(patch.clock.is_none());
        assert!(patch.period.is_none());
    }
}

//! Penalty countdowns attached to a team.

use uuid::Uuid;

/// Default penalty length handed out when the operator does not pick one.
pub const DEFAULT_PENALTY_MS: u64 = 120_000;

/// Remaining time at or below which a penalty counts as expired.
///
/// Slightly above zero so a timer is purged before the display can flicker
/// through `0:00` at a tick boundary.
pub const EXPIRY_EPSILON_MS: u64 = 100;

/// Player number used when the operator has not filled one in yet.
pub const UNSPECIFIED_PLAYER: &str = "00";

/// A single penalty countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Penalty {
    /// Opaque unique token identifying this penalty across edits.
    pub id: String,
    /// Short numeric string (0-2 digits); `"00"` means unspecified.
    pub player_number: String,
    /// Milliseconds left on the countdown.
    pub time_remaining_ms: u64,
    /// Original length, fixed at creation and only replaced by an edit.
    pub duration_ms: u64,
}

impl Penalty {
    /// Build a fresh penalty with a generated id and a full countdown.
    pub fn new(player_number: Option<String>, duration_ms: Option<u64>) -> Self {
        let duration_ms = duration_ms.unwrap_or(DEFAULT_PENALTY_MS);
        Self {
            id: Uuid::new_v4().simple().to_string(),
            player_number: player_number.unwrap_or_else(|| UNSPECIFIED_PLAYER.to_string()),
            time_remaining_ms: duration_ms,
            duration_ms,
        }
    }
}

/// Ordered set of penalties for one team, advanced only by the match clock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PenaltyBench {
    penalties: Vec<Penalty>,
}

impl PenaltyBench {
    /// Create an empty bench.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the bench from an explicit list, preserving its order.
    pub fn from_penalties(penalties: Vec<Penalty>) -> Self {
        Self { penalties }
    }

    /// Append a new penalty and return its id.
    pub fn add(&mut self, player_number: Option<String>, duration_ms: Option<u64>) -> String {
        let penalty = Penalty::new(player_number, duration_ms);
        let id = penalty.id.clone();
        self.penalties.push(penalty);
        id
    }

    /// Advance every countdown by `elapsed_ms` and purge expired entries.
    ///
    /// The decrement saturates at zero and the purge is a stable filter, so
    /// surviving penalties keep their insertion order.
    pub fn advance(&mut self, elapsed_ms: u64) {
        for penalty in &mut self.penalties {
            penalty.time_remaining_ms = penalty.time_remaining_ms.saturating_sub(elapsed_ms);
        }
        self.penalties
            .retain(|penalty| penalty.time_remaining_ms > EXPIRY_EPSILON_MS);
    }

    /// Reset a penalty to a new length, replacing both the countdown and the
    /// recorded duration. Returns false when the id is unknown.
    pub fn edit(&mut self, id: &str, new_duration_ms: u64) -> bool {
        match self.penalties.iter_mut().find(|penalty| penalty.id == id) {
            Some(penalty) => {
                penalty.time_remaining_ms = new_duration_ms;
                penalty.duration_ms = new_duration_ms;
                true
            }
            None => false,
        }
    }

    /// Remove a penalty immediately, independent of the tick cycle.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.penalties.len();
        self.penalties.retain(|penalty| penalty.id != id);
        self.penalties.len() != before
    }

    /// Iterate the penalties in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Penalty> {
        self.penalties.iter()
    }

    /// Number of active penalties.
    pub fn len(&self) -> usize {
        self.penalties.len()
    }

    /// Whether the bench has no active penalties.
    pub fn is_empty(&self) -> bool {
        self.penalties.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_defaults_to_two_minutes_and_unspecified_player() {
        let mut bench = PenaltyBench::new();
        bench.add(None, None);

        let penalty = bench.iter().next().unwrap();
        assert_eq!(penalty.player_number, "00");
        assert_eq!(penalty.time_remaining_ms, 120_000);
        assert_eq!(penalty.duration_ms, 120_000);
    }

    #[test]
    fn advance_decrements_every_penalty() {
        let mut bench = PenaltyBench::new();
        bench.add(Some("12".into()), Some(120_000));
        bench.add(Some("7".into()), Some(300_000));

        bench.advance(1_500);

        let remaining: Vec<u64> = bench.iter().map(|p| p.time_remaining_ms).collect();
        assert_eq!(remaining, vec![118_500, 298_500]);
    }

    #[test]
    fn expiry_uses_epsilon_not_exact_zero() {
        let mut bench = PenaltyBench::new();
        bench.add(None, Some(120_000));
        bench.advance(119_899);
        assert_eq!(bench.len(), 1);
        assert_eq!(bench.iter().next().unwrap().time_remaining_ms, 101);

        let mut bench = PenaltyBench::new();
        bench.add(None, Some(120_000));
        bench.advance(119_900);
        assert!(bench.is_empty());

        let mut bench = PenaltyBench::new();
        bench.add(None, Some(120_000));
        bench.advance(119_901);
        assert!(bench.is_empty());
    }

    #[test]
    fn short_penalty_survives_until_epsilon() {
        let mut bench = PenaltyBench::new();
        bench.add(None, Some(5_000));

        bench.advance(4_800);
        assert_eq!(bench.len(), 1);
        assert_eq!(bench.iter().next().unwrap().time_remaining_ms, 200);

        bench.advance(300);
        assert!(bench.is_empty());
    }

    #[test]
    fn purge_preserves_order_of_survivors() {
        let mut bench = PenaltyBench::new();
        let first = bench.add(Some("4".into()), Some(1_000));
        let second = bench.add(Some("5".into()), Some(60_000));
        let third = bench.add(Some("6".into()), Some(90_000));

        bench.advance(2_000);

        let ids: Vec<&str> = bench.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec![second.as_str(), third.as_str()]);
        assert!(!ids.contains(&first.as_str()));
    }

    #[test]
    fn edit_resets_countdown_and_duration_together() {
        let mut bench = PenaltyBench::new();
        let id = bench.add(None, Some(120_000));
        bench.advance(30_000);

        assert!(bench.edit(&id, 300_000));

        let penalty = bench.iter().next().unwrap();
        assert_eq!(penalty.time_remaining_ms, 300_000);
        assert_eq!(penalty.duration_ms, 300_000);
    }

    #[test]
    fn remove_deletes_by_id() {
        let mut bench = PenaltyBench::new();
        let id = bench.add(None, None);
        bench.add(None, None);

        assert!(bench.remove(&id));
        assert_eq!(bench.len(), 1);
        assert!(!bench.remove("not-a-penalty"));
    }
}

//! Match-state reads and the replace-by-key partial update.

use validator::Validate;

use crate::{
    dao::models::TeamDefaultsEntity,
    dto::game::{GameStatePatch, GameStateSnapshot},
    error::ServiceError,
    services::{clock_service, settings_service, sse_events},
    state::{SharedState, game::MatchState},
};

/// Snapshot the current match state for a newly connected observer.
pub async fn snapshot(state: &SharedState) -> GameStateSnapshot {
    let guard = state.game().read().await;
    GameStateSnapshot::from(&*guard)
}

/// Apply a partial update: every top-level section present in the patch
/// replaces the corresponding section of the match state wholesale.
///
/// This is deliberately last-writer-wins per section. A patch that names a
/// team replaces that team's entire record, penalties included, even for
/// fields the sender did not mean to touch; operator clients therefore always
/// send full team records. The merged snapshot is broadcast, and a patch that
/// touched either team also persists the current identities as the stored
/// team defaults.
pub async fn apply_partial_update(
    state: &SharedState,
    patch: GameStatePatch,
) -> Result<(), ServiceError> {
    patch.validate().map_err(ServiceError::from)?;

    let clock_replaced = patch.clock.is_some();
    let identity_update = {
        let mut guard = state.game().write().await;
        let teams_touched = apply_patch(&mut guard, patch);
        teams_touched.then(|| TeamDefaultsEntity {
            home_team: Some(guard.home.identity.clone().into()),
            away_team: Some(guard.away.identity.clone().into()),
        })
    };

    if clock_replaced {
        // a verbatim clock replace may flip the run state under the ticker
        clock_service::sync_ticker(state).await;
    }

    sse_events::broadcast_game_state(state).await;

    if let Some(defaults) = identity_update {
        let state = state.clone();
        tokio::spawn(async move {
            settings_service::persist_team_defaults(&state, defaults).await;
        });
    }

    Ok(())
}

/// The replace-by-key merge itself. Returns whether a team section was
/// present in the patch.
fn apply_patch(match_state: &mut MatchState, patch: GameStatePatch) -> bool {
    let mut teams_touched = false;

    if let Some(team) = patch.home_team {
        match_state.home = team.into_record();
        teams_touched = true;
    }
    if let Some(team) = patch.away_team {
        match_state.away = team.into_record();
        teams_touched = true;
    }
    if let Some(clock) = patch.clock {
        match_state.clock = clock.into_clock();
    }
    if let Some(period) = patch.period {
        match_state.period = period;
    }

    teams_touched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::game::Period;

    fn base_state() -> MatchState {
        let mut match_state = MatchState::new(1_200_000, 0);
        match_state.home.score = 2;
        match_state.home.penalties.add(Some("12".into()), None);
        match_state.clock.start(0);
        match_state
    }

    #[test]
    fn period_only_patch_leaves_teams_and_clock_untouched() {
        let mut match_state = base_state();
        let before_home = match_state.home.clone();
        let before_clock = match_state.clock.clone();

        let patch: GameStatePatch = serde_json::from_str(r#"{"period": "2nd"}"#).unwrap();
        let teams_touched = apply_patch(&mut match_state, patch);

        assert!(!teams_touched);
        assert_eq!(match_state.period, Period::Second);
        assert_eq!(match_state.home, before_home);
        assert_eq!(match_state.clock, before_clock);
    }

    #[test]
    fn team_patch_replaces_the_entire_record() {
        let mut match_state = base_state();
        assert_eq!(match_state.home.penalties.len(), 1);

        // The patch carries no penalties; the destructive merge drops the
        // existing one along with every other unmentioned field.
        let patch: GameStatePatch = serde_json::from_str(
            r##"{
                "homeTeam": {
                    "name": "Wolves", "abbreviation": "WLV", "color": "#112233",
                    "score": 0, "shots": 5, "timeouts": 1, "penalties": []
                }
            }"##,
        )
        .unwrap();
        let teams_touched = apply_patch(&mut match_state, patch);

        assert!(teams_touched);
        assert_eq!(match_state.home.identity.name, "Wolves");
        assert_eq!(match_state.home.score, 0);
        assert!(match_state.home.penalties.is_empty());
        // sibling sections stay put
        assert_eq!(match_state.away.identity.name, "Away Team");
        assert!(match_state.clock.is_running());
    }

    #[test]
    fn clock_patch_is_applied_verbatim() {
        let mut match_state = base_state();

        let patch: GameStatePatch = serde_json::from_str(
            r#"{"clock": {"timeRemaining": 300000, "isRunning": false, "lastUpdate": 42}}"#,
        )
        .unwrap();
        apply_patch(&mut match_state, patch);

        assert!(!match_state.clock.is_running());
        assert_eq!(match_state.clock.remaining_ms(), 300_000);
        assert_eq!(match_state.clock.last_update_ms(), 42);
    }
}

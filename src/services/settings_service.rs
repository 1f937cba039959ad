//! Settings persistence: keyboard shortcuts, team defaults, team presets.
//!
//! Reads degrade to empty/null responses when storage misbehaves; writes
//! surface the failure to the caller without touching in-memory state.

use serde_json::Value;
use tracing::{info, warn};
use validator::Validate;

use crate::{
    dao::models::{TeamDefaultsEntity, TeamPresetEntity},
    dto::settings::{
        PresetSummary, SavePresetRequest, TeamDefaultsDocument, UpdateTeamDefaultsRequest,
    },
    error::ServiceError,
    state::{SharedState, clock::unix_now_ms},
};

/// Load the opaque keyboard-shortcuts document, degrading to JSON `null`.
pub async fn load_shortcuts(state: &SharedState) -> Value {
    match state.settings().load_shortcuts().await {
        Ok(Some(document)) => document,
        Ok(None) => Value::Null,
        Err(err) => {
            warn!(error = %err, "failed to load shortcuts; returning null");
            Value::Null
        }
    }
}

/// Replace the keyboard-shortcuts document wholesale.
pub async fn save_shortcuts(state: &SharedState, document: &Value) -> Result<(), ServiceError> {
    Ok(state.settings().save_shortcuts(document).await?)
}

/// Load the stored team defaults, degrading to absent.
pub async fn load_team_defaults(state: &SharedState) -> Option<TeamDefaultsDocument> {
    match state.settings().load_team_defaults().await {
        Ok(Some(entity)) => Some(TeamDefaultsDocument {
            home_team: entity.home_team.map(Into::into),
            away_team: entity.away_team.map(Into::into),
        }),
        Ok(None) => None,
        Err(err) => {
            warn!(error = %err, "failed to load team defaults; returning null");
            None
        }
    }
}

/// Merge the supplied identities into the stored defaults document, one team
/// at a time.
pub async fn update_team_defaults(
    state: &SharedState,
    request: UpdateTeamDefaultsRequest,
) -> Result<(), ServiceError> {
    let mut defaults = match state.settings().load_team_defaults().await {
        Ok(stored) => stored.unwrap_or_default(),
        Err(err) => {
            warn!(error = %err, "failed to load team defaults; starting from an empty document");
            TeamDefaultsEntity::default()
        }
    };

    if let Some(home) = request.home_team {
        defaults.home_team = Some(home.into());
    }
    if let Some(away) = request.away_team {
        defaults.away_team = Some(away.into());
    }

    Ok(state.settings().save_team_defaults(&defaults).await?)
}

/// Persist the current identities after an operator patch touched a team.
/// Failures are logged and dropped so a broken disk never blocks commands.
pub async fn persist_team_defaults(state: &SharedState, defaults: TeamDefaultsEntity) {
    if let Err(err) = state.settings().save_team_defaults(&defaults).await {
        warn!(error = %err, "failed to persist team identities");
    }
}

/// Apply stored team identities to the boot-time match state.
pub async fn apply_stored_defaults(state: &SharedState) {
    let defaults = match state.settings().load_team_defaults().await {
        Ok(Some(defaults)) => defaults,
        Ok(None) => return,
        Err(err) => {
            warn!(error = %err, "failed to load stored team defaults");
            return;
        }
    };

    let mut guard = state.game().write().await;
    if let Some(home) = defaults.home_team {
        guard.home.identity = home.into();
    }
    if let Some(away) = defaults.away_team {
        guard.away.identity = away.into();
    }
    info!("restored stored team identities");
}

/// Every saved preset in storage order, degrading to an empty list.
pub async fn list_presets(state: &SharedState) -> Vec<PresetSummary> {
    match state.settings().load_presets().await {
        Ok(presets) => presets.into_values().map(Into::into).collect(),
        Err(err) => {
            warn!(error = %err, "failed to load team presets; returning empty list");
            Vec::new()
        }
    }
}

/// Save a preset, overwriting any existing preset whose name matches
/// case-insensitively. Returns the full updated list.
pub async fn save_preset(
    state: &SharedState,
    request: SavePresetRequest,
) -> Result<Vec<PresetSummary>, ServiceError> {
    request.validate()?;

    let name = request.name.trim().to_string();
    if name.is_empty() {
        return Err(ServiceError::InvalidInput(
            "preset name must not be empty".into(),
        ));
    }

    let mut presets = state.settings().load_presets().await?;
    let key = name.to_lowercase();
    presets.insert(
        key,
        TeamPresetEntity {
            name,
            home_team: request.home_team.into(),
            away_team: request.away_team.into(),
            updated_at_ms: unix_now_ms(),
        },
    );
    state.settings().save_presets(&presets).await?;

    Ok(presets.into_values().map(Into::into).collect())
}

/// Delete a preset by case-insensitive name and return the remaining list.
/// Deleting a name with no match is a no-op.
pub async fn delete_preset(
    state: &SharedState,
    name: &str,
) -> Result<Vec<PresetSummary>, ServiceError> {
    let mut presets = state.settings().load_presets().await?;
    if presets.shift_remove(&name.trim().to_lowercase()).is_some() {
        state.settings().save_presets(&presets).await?;
    }
    Ok(presets.into_values().map(Into::into).collect())
}

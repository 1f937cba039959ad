//! Wire types for the settings surface: keyboard shortcuts, team defaults,
//! and team presets.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dao::models::{TeamIdentityEntity, TeamPresetEntity};

/// Identity fields of one team as exchanged with the settings endpoints.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamIdentityDto {
    /// Full display name.
    pub name: String,
    /// Short code shown next to the score.
    pub abbreviation: String,
    /// Logo reference; empty when unset.
    #[serde(default)]
    pub logo: String,
    /// Accent color as a CSS hex string.
    pub color: String,
}

impl From<TeamIdentityEntity> for TeamIdentityDto {
    fn from(value: TeamIdentityEntity) -> Self {
        Self {
            name: value.name,
            abbreviation: value.abbreviation,
            logo: value.logo,
            color: value.color,
        }
    }
}

impl From<TeamIdentityDto> for TeamIdentityEntity {
    fn from(value: TeamIdentityDto) -> Self {
        Self {
            name: value.name,
            abbreviation: value.abbreviation,
            logo: value.logo,
            color: value.color,
        }
    }
}

/// Stored default identities returned by `GET /api/team-defaults`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamDefaultsDocument {
    /// Saved identity for the home side, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_team: Option<TeamIdentityDto>,
    /// Saved identity for the away side, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_team: Option<TeamIdentityDto>,
}

/// Per-team identity merge accepted by `POST /api/team-defaults`. Only the
/// teams present in the request are updated.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamDefaultsRequest {
    /// New home identity, when supplied.
    #[serde(default)]
    pub home_team: Option<TeamIdentityDto>,
    /// New away identity, when supplied.
    #[serde(default)]
    pub away_team: Option<TeamIdentityDto>,
}

/// Request to save (or overwrite) a named team preset.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SavePresetRequest {
    /// Preset name; matched case-insensitively on upsert.
    #[validate(length(min = 1, message = "preset name must not be empty"))]
    pub name: String,
    /// Identity for the home side.
    pub home_team: TeamIdentityDto,
    /// Identity for the away side.
    pub away_team: TeamIdentityDto,
}

/// One saved preset as returned by the presets endpoints.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresetSummary {
    /// Preset name as entered by the operator.
    pub name: String,
    /// Identity for the home side.
    pub home_team: TeamIdentityDto,
    /// Identity for the away side.
    pub away_team: TeamIdentityDto,
    /// Last save time as unix epoch milliseconds.
    pub updated_at: u64,
}

impl From<TeamPresetEntity> for PresetSummary {
    fn from(value: TeamPresetEntity) -> Self {
        Self {
            name: value.name,
            home_team: value.home_team.into(),
            away_team: value.away_team.into(),
            updated_at: value.updated_at_ms,
        }
    }
}

/// Full preset list returned after an upsert or delete.
#[derive(Debug, Serialize, ToSchema)]
pub struct PresetsResponse {
    /// Every saved preset in storage order.
    pub presets: Vec<PresetSummary>,
}

/// Acknowledgement returned by the settings write endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct SaveAck {
    /// Whether the document was persisted.
    pub success: bool,
    /// Failure detail when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SaveAck {
    /// Acknowledge a successful write.
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// Report a failed write without exposing internals.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

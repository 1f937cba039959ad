use serde::{Deserialize, Serialize};

use crate::state::game::TeamIdentity;

/// Persisted identity fields of one team.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamIdentityEntity {
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

/// Stored team-defaults document, filled in one team at a time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamDefaultsEntity {
    /// Saved identity for the home side, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_team: Option<TeamIdentityEntity>,
    /// Saved identity for the away side, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_team: Option<TeamIdentityEntity>,
}

/// A named pair of team identities saved for repeat matchups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamPresetEntity {
    /// Preset name as entered by the operator.
    pub name: String,
    /// Saved identity for the home side.
    pub home_team: TeamIdentityEntity,
    /// Saved identity for the away side.
    pub away_team: TeamIdentityEntity,
    /// Last save time as unix epoch milliseconds.
    pub updated_at_ms: u64,
}

impl From<TeamIdentity> for TeamIdentityEntity {
    fn from(value: TeamIdentity) -> Self {
        Self {
            name: value.name,
            abbreviation: value.abbreviation,
            logo: value.logo,
            color: value.color,
        }
    }
}

impl From<TeamIdentityEntity> for TeamIdentity {
    fn from(value: TeamIdentityEntity) -> Self {
        Self {
            name: value.name,
            abbreviation: value.abbreviation,
            logo: value.logo,
            color: value.color,
        }
    }
}

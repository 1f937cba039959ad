//! Flat JSON documents on disk backing the settings HTTP surface.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tokio::fs;

use crate::dao::{
    models::{TeamDefaultsEntity, TeamPresetEntity},
    storage::{StorageError, StorageResult},
};

const SHORTCUTS_FILE: &str = "shortcuts.json";
const TEAM_DEFAULTS_FILE: &str = "team-defaults.json";
const TEAM_PRESETS_FILE: &str = "team-presets.json";

/// File-backed store for the operator settings documents.
///
/// Every document is one small JSON file under the data directory, read and
/// written wholesale. Missing files read as absent rather than as errors.
pub struct SettingsStore {
    dir: PathBuf,
}

impl SettingsStore {
    /// Create a store rooted at `dir`. The directory is created lazily via
    /// [`SettingsStore::ensure_dir`].
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Create the data directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StorageError::Write {
                path: self.dir.clone(),
                source,
            })
    }

    /// Verify the data directory is still reachable.
    pub async fn health_check(&self) -> StorageResult<()> {
        fs::metadata(&self.dir)
            .await
            .map(|_| ())
            .map_err(|source| StorageError::Read {
                path: self.dir.clone(),
                source,
            })
    }

    /// Load the opaque keyboard-shortcuts document.
    pub async fn load_shortcuts(&self) -> StorageResult<Option<Value>> {
        self.read_document(SHORTCUTS_FILE).await
    }

    /// Replace the keyboard-shortcuts document wholesale.
    pub async fn save_shortcuts(&self, document: &Value) -> StorageResult<()> {
        self.write_document(SHORTCUTS_FILE, document).await
    }

    /// Load the stored team-defaults document, if any.
    pub async fn load_team_defaults(&self) -> StorageResult<Option<TeamDefaultsEntity>> {
        self.read_document(TEAM_DEFAULTS_FILE).await
    }

    /// Replace the team-defaults document.
    pub async fn save_team_defaults(&self, defaults: &TeamDefaultsEntity) -> StorageResult<()> {
        self.write_document(TEAM_DEFAULTS_FILE, defaults).await
    }

    /// Load every saved preset, keyed by lowercased name in insertion order.
    pub async fn load_presets(&self) -> StorageResult<IndexMap<String, TeamPresetEntity>> {
        Ok(self
            .read_document(TEAM_PRESETS_FILE)
            .await?
            .unwrap_or_default())
    }

    /// Replace the preset collection wholesale.
    pub async fn save_presets(
        &self,
        presets: &IndexMap<String, TeamPresetEntity>,
    ) -> StorageResult<()> {
        self.write_document(TEAM_PRESETS_FILE, presets).await
    }

    fn document_path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    async fn read_document<T: DeserializeOwned>(&self, file: &str) -> StorageResult<Option<T>> {
        let path = self.document_path(file);
        let contents = match fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StorageError::Read { path, source }),
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| StorageError::Decode { path, source })
    }

    async fn write_document<T: Serialize + ?Sized>(
        &self,
        file: &str,
        value: &T,
    ) -> StorageResult<()> {
        let path = self.document_path(file);
        let contents = serde_json::to_string_pretty(value).map_err(|source| {
            StorageError::Encode {
                path: path.clone(),
                source,
            }
        })?;

        fs::write(&path, contents)
            .await
            .map_err(|source| StorageError::Write { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::models::TeamIdentityEntity;
    use serde_json::json;
    use uuid::Uuid;

    fn scratch_store() -> SettingsStore {
        let dir = std::env::temp_dir().join(format!("rinkside-store-{}", Uuid::new_v4().simple()));
        SettingsStore::new(dir)
    }

    fn identity(name: &str, abbreviation: &str) -> TeamIdentityEntity {
        TeamIdentityEntity {
            name: name.to_string(),
            abbreviation: abbreviation.to_string(),
            logo: String::new(),
            color: "#3b82f6".to_string(),
        }
    }

    #[tokio::test]
    async fn missing_documents_read_as_absent() {
        let store = scratch_store();
        store.ensure_dir().await.unwrap();

        assert!(store.load_shortcuts().await.unwrap().is_none());
        assert!(store.load_team_defaults().await.unwrap().is_none());
        assert!(store.load_presets().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn shortcuts_round_trip_verbatim() {
        let store = scratch_store();
        store.ensure_dir().await.unwrap();

        let document = json!([{"key": " ", "action": "toggleClock"}]);
        store.save_shortcuts(&document).await.unwrap();

        assert_eq!(store.load_shortcuts().await.unwrap(), Some(document));
    }

    #[tokio::test]
    async fn presets_keep_insertion_order() {
        let store = scratch_store();
        store.ensure_dir().await.unwrap();

        let mut presets = IndexMap::new();
        presets.insert(
            "wolves vs falcons".to_string(),
            TeamPresetEntity {
                name: "Wolves vs Falcons".to_string(),
                home_team: identity("Wolves", "WLV"),
                away_team: identity("Falcons", "FAL"),
                updated_at_ms: 1,
            },
        );
        presets.insert(
            "derby".to_string(),
            TeamPresetEntity {
                name: "Derby".to_string(),
                home_team: identity("North", "NOR"),
                away_team: identity("South", "SOU"),
                updated_at_ms: 2,
            },
        );
        store.save_presets(&presets).await.unwrap();

        let loaded = store.load_presets().await.unwrap();
        let keys: Vec<&String> = loaded.keys().collect();
        assert_eq!(keys, vec!["wolves vs falcons", "derby"]);
    }

    #[tokio::test]
    async fn corrupt_document_surfaces_decode_error() {
        let store = scratch_store();
        store.ensure_dir().await.unwrap();

        let path = store.document_path(TEAM_DEFAULTS_FILE);
        fs::write(&path, "not json").await.unwrap();

        assert!(matches!(
            store.load_team_defaults().await,
            Err(StorageError::Decode { .. })
        ));
    }
}

//! Application-level configuration loading.

use std::{env, fs, io::ErrorKind, path::{Path, PathBuf}, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

use crate::state::clock::DEFAULT_PERIOD_MS;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "RINKSIDE_BACK_CONFIG_PATH";
/// Directory holding the flat JSON settings documents.
const DEFAULT_DATA_DIR: &str = "data";
/// Directory holding the built overlay/control-panel bundle.
const DEFAULT_STATIC_DIR: &str = "dist";
/// Period of the clock tick task.
const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    data_dir: PathBuf,
    static_dir: PathBuf,
    tick_interval: Duration,
    period_length_ms: u64,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in
    /// defaults when the file is absent or unreadable.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(path = %path.display(), "loaded configuration");
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Directory holding the settings documents.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Directory the static bundle is served from.
    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }

    /// Interval of the clock tick task.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Clock value loaded into a fresh match.
    pub fn period_length_ms(&self) -> u64 {
        self.period_length_ms
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            period_length_ms: DEFAULT_PERIOD_MS,
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    data_dir: Option<PathBuf>,
    #[serde(default)]
    static_dir: Option<PathBuf>,
    #[serde(default)]
    tick_interval_ms: Option<u64>,
    #[serde(default)]
    period_length_ms: Option<u64>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            data_dir: value.data_dir.unwrap_or(defaults.data_dir),
            static_dir: value.static_dir.unwrap_or(defaults.static_dir),
            tick_interval: value
                .tick_interval_ms
                // tokio panics on a zero interval
                .map(|ms| Duration::from_millis(ms.max(1)))
                .unwrap_or(defaults.tick_interval),
            period_length_ms: value.period_length_ms.unwrap_or(defaults.period_length_ms),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_field() {
        let config = AppConfig::default();
        assert_eq!(config.data_dir(), Path::new("data"));
        assert_eq!(config.static_dir(), Path::new("dist"));
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.period_length_ms(), 1_200_000);
    }

    #[test]
    fn raw_config_overrides_selected_fields() {
        let raw: RawConfig =
            serde_json::from_str(r#"{"tick_interval_ms": 50, "period_length_ms": 900000}"#)
                .unwrap();
        let config: AppConfig = raw.into();

        assert_eq!(config.tick_interval(), Duration::from_millis(50));
        assert_eq!(config.period_length_ms(), 900_000);
        assert_eq!(config.data_dir(), Path::new("data"));
    }

    #[test]
    fn zero_tick_interval_is_raised_to_one_millisecond() {
        let raw: RawConfig = serde_json::from_str(r#"{"tick_interval_ms": 0}"#).unwrap();
        let config: AppConfig = raw.into();
        assert_eq!(config.tick_interval(), Duration::from_millis(1));
    }
}

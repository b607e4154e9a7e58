//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve database path, map API key and logging options.
//! - Keep environment lookups injectable so resolution is testable.
//!
//! # Invariants
//! - A configured log directory is always absolute.
//! - Blank environment values are treated as unset.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "ESTATE_DB_PATH";
pub const MAPS_API_KEY_VAR: &str = "ESTATE_MAPS_API_KEY";
/// Accepted so existing web deployments keep their key variable.
pub const LEGACY_MAPS_API_KEY_VAR: &str = "VITE_GOOGLE_MAPS_API_KEY";
pub const LOG_LEVEL_VAR: &str = "ESTATE_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "ESTATE_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "estate.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RelativeLogDir(path) => write!(
                f,
                "{LOG_DIR_VAR} must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {}

/// Map widget settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapConfig {
    pub api_key: Option<String>,
}

/// Fully resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub map: MapConfig,
    pub log_level: String,
    /// File logging is disabled when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            map: MapConfig::default(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(DB_PATH_VAR) {
            config.db_path = PathBuf::from(path);
        }
        config.map.api_key = read(MAPS_API_KEY_VAR).or_else(|| read(LEGACY_MAPS_API_KEY_VAR));
        if let Some(level) = read(LOG_LEVEL_VAR) {
            config.log_level = level;
        }
        if let Some(dir) = read(LOG_DIR_VAR) {
            config.set_log_dir(PathBuf::from(dir))?;
        }

        Ok(config)
    }

    /// Overrides the log directory, enforcing the absolute-path invariant.
    pub fn set_log_dir(&mut self, dir: PathBuf) -> Result<(), ConfigError> {
        if !dir.is_absolute() {
            return Err(ConfigError::RelativeLogDir(dir));
        }
        self.log_dir = Some(dir);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, LEGACY_MAPS_API_KEY_VAR, MAPS_API_KEY_VAR};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.db_path, PathBuf::from("estate.sqlite3"));
        assert!(config.map.api_key.is_none());
    }

    #[test]
    fn primary_key_wins_over_legacy_and_blank_is_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (MAPS_API_KEY_VAR, "primary"),
            (LEGACY_MAPS_API_KEY_VAR, "legacy"),
        ]))
        .unwrap();
        assert_eq!(config.map.api_key.as_deref(), Some("primary"));

        let config = AppConfig::from_lookup(lookup_from(&[
            (MAPS_API_KEY_VAR, "  "),
            (LEGACY_MAPS_API_KEY_VAR, "legacy"),
        ]))
        .unwrap();
        assert_eq!(config.map.api_key.as_deref(), Some("legacy"));
    }

    #[test]
    fn relative_log_dir_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("ESTATE_LOG_DIR", "logs")])).unwrap_err();
        assert_eq!(err, ConfigError::RelativeLogDir(PathBuf::from("logs")));
    }
}

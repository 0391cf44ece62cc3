//! Configuration system using TOML files plus environment overrides.
//!
//! Config is read from `--config <path>` or the OS-standard config directory:
//! - Windows: %APPDATA%\geo-altnames\config.toml
//! - macOS: ~/Library/Application Support/geo-altnames/config.toml
//! - Linux: ~/.config/geo-altnames/config.toml
//!
//! Every setting has a default. Environment variables (a `.env` file is
//! loaded by `main`) override the file:
//!
//! | Env Var              | Setting              |
//! |----------------------|----------------------|
//! | `DATABASE_URL`       | `[database] url`     |
//! | `NOMINATIM_API_URL`  | `[nominatim] url`    |
//! | `ALGOLIA_APP_ID`     | `[algolia] app_id`   |
//! | `ALGOLIA_API_KEY`    | `[algolia] api_key`  |
//! | `ALGOLIA_API_URL`    | `[algolia] url`      |
//! | `MAPQUEST_API_KEY`   | `[mapquest] api_key` |
//! | `MAPQUEST_API_URL`   | `[mapquest] url`     |

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::db;
use crate::localize::algolia::{self, AlgoliaCredentials};
use crate::localize::traits::ProviderConfig;
use crate::localize::{mapquest, nominatim};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub run: RunConfig,
    pub nominatim: NominatimConfig,
    pub algolia: AlgoliaConfig,
    pub mapquest: MapquestConfig,
}

/// Entity store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite URL of the store holding cities, countries and translations
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: db::DEFAULT_DB_URL.to_string(),
        }
    }
}

/// Loop behaviour
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Skip entities that already have translation rows
    pub skip_translated: bool,
}

/// OpenStreetMap Nominatim settings (no credentials)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NominatimConfig {
    pub url: String,
    pub delay_ms: u64,
    pub timeout_secs: u64,
    pub failure_log: PathBuf,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            url: nominatim::DEFAULT_URL.to_string(),
            delay_ms: 1500,
            timeout_secs: 30,
            failure_log: PathBuf::from("nominatim.failed"),
        }
    }
}

impl NominatimConfig {
    pub fn provider_config(&self) -> ProviderConfig {
        provider_config("nominatim", &self.failure_log, self.delay_ms, self.timeout_secs)
    }

    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        parse_url("nominatim.url", &self.url)
    }
}

/// Algolia Places settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlgoliaConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub url: String,
    /// Hosts tried after the primary one, in order
    pub backup_hosts: Vec<String>,
    pub delay_ms: u64,
    pub timeout_secs: u64,
    pub failure_log: PathBuf,
}

impl Default for AlgoliaConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            api_key: None,
            url: algolia::DEFAULT_URL.to_string(),
            backup_hosts: algolia::BACKUP_HOSTS.iter().map(|h| h.to_string()).collect(),
            delay_ms: 1100,
            timeout_secs: 30,
            failure_log: PathBuf::from("algolia.failed"),
        }
    }
}

impl AlgoliaConfig {
    pub fn provider_config(&self) -> ProviderConfig {
        provider_config("algolia", &self.failure_log, self.delay_ms, self.timeout_secs)
    }

    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        parse_url("algolia.url", &self.url)
    }

    /// Both credentials, or the first one missing.
    pub fn credentials(&self) -> Result<AlgoliaCredentials, ConfigError> {
        Ok(AlgoliaCredentials {
            app_id: required(&self.app_id, "ALGOLIA_APP_ID")?,
            api_key: required(&self.api_key, "ALGOLIA_API_KEY")?,
        })
    }
}

/// MapQuest Open Nominatim settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapquestConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub url: String,
    pub delay_ms: u64,
    pub timeout_secs: u64,
    pub failure_log: PathBuf,
}

impl Default for MapquestConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            url: mapquest::DEFAULT_URL.to_string(),
            delay_ms: 350,
            timeout_secs: 40,
            failure_log: PathBuf::from("mapquest.failed"),
        }
    }
}

impl MapquestConfig {
    pub fn provider_config(&self) -> ProviderConfig {
        provider_config("mapquest", &self.failure_log, self.delay_ms, self.timeout_secs)
    }

    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        parse_url("mapquest.url", &self.url)
    }

    pub fn api_key(&self) -> Result<String, ConfigError> {
        required(&self.api_key, "MAPQUEST_API_KEY")
    }
}

fn provider_config(name: &str, failure_log: &Path, delay_ms: u64, timeout_secs: u64) -> ProviderConfig {
    ProviderConfig {
        name: name.to_string(),
        failure_log: failure_log.to_path_buf(),
        delay: Duration::from_millis(delay_ms),
        timeout: Duration::from_secs(timeout_secs),
    }
}

fn required(value: &Option<String>, var: &'static str) -> Result<String, ConfigError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(ConfigError::MissingCredential(var))
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

impl Config {
    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// Empty values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = var("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(url) = var("NOMINATIM_API_URL") {
            self.nominatim.url = url;
        }
        if let Some(app_id) = var("ALGOLIA_APP_ID") {
            self.algolia.app_id = Some(app_id);
        }
        if let Some(api_key) = var("ALGOLIA_API_KEY") {
            self.algolia.api_key = Some(api_key);
        }
        if let Some(url) = var("ALGOLIA_API_URL") {
            self.algolia.url = url;
        }
        if let Some(api_key) = var("MAPQUEST_API_KEY") {
            self.mapquest.api_key = Some(api_key);
        }
        if let Some(url) = var("MAPQUEST_API_URL") {
            self.mapquest.url = url;
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("geo-altnames"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from `path`, or from the default location.
///
/// An explicit path must exist. A missing default file just means defaults.
/// Environment overrides are applied in both cases.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => read_file(path)?,
        None => match config_path() {
            Some(path) if path.exists() => read_file(&path)?,
            Some(path) => {
                tracing::debug!("No config file found at {:?}, using defaults", path);
                Config::default()
            }
            None => {
                tracing::warn!("Could not determine config directory, using defaults");
                Config::default()
            }
        },
    };

    config.apply_env(|name| std::env::var(name).ok());
    Ok(config)
}

fn read_file(path: &Path) -> Result<Config, ConfigError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    let config = toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
    tracing::info!("Loaded config from {:?}", path);
    Ok(config)
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors. All of them stop the program before a run starts.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),

    #[error("Missing credential: set {0}")]
    MissingCredential(&'static str),

    #[error("Invalid URL for {field} ({value}): {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[database]"));
        assert!(toml.contains("[nominatim]"));
        assert!(toml.contains("[algolia]"));
        assert!(toml.contains("[mapquest]"));
        assert!(!toml.contains("api_key"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.algolia.app_id = Some("app".to_string());
        config.mapquest.delay_ms = 500;
        config.run.skip_translated = true;

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[algolia]
api_key = "k"
delay_ms = 2000
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.algolia.api_key.as_deref(), Some("k"));
        assert_eq!(config.algolia.delay_ms, 2000);
        assert_eq!(config.algolia.backup_hosts.len(), 3);
        assert_eq!(config.nominatim.delay_ms, 1500);
        assert_eq!(config.mapquest.timeout_secs, 40);
        assert_eq!(config.database.url, "sqlite:geo.db");
        assert!(!config.run.skip_translated);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = Config::default();
        config.algolia.app_id = Some("from-file".to_string());
        config.apply_env(env(&[
            ("ALGOLIA_APP_ID", "from-env"),
            ("ALGOLIA_API_KEY", ""),
            ("MAPQUEST_API_URL", "http://localhost:9000/search"),
            ("DATABASE_URL", "sqlite:/data/geo.db"),
        ]));

        assert_eq!(config.algolia.app_id.as_deref(), Some("from-env"));
        // empty value is ignored
        assert!(config.algolia.api_key.is_none());
        assert_eq!(config.mapquest.url, "http://localhost:9000/search");
        assert_eq!(config.database.url, "sqlite:/data/geo.db");
    }

    #[test]
    fn test_missing_credentials() {
        let mut config = Config::default();
        assert!(matches!(
            config.algolia.credentials(),
            Err(ConfigError::MissingCredential("ALGOLIA_APP_ID"))
        ));

        config.algolia.app_id = Some("app".to_string());
        config.algolia.api_key = Some("   ".to_string());
        assert!(matches!(
            config.algolia.credentials(),
            Err(ConfigError::MissingCredential("ALGOLIA_API_KEY"))
        ));

        assert!(matches!(
            config.mapquest.api_key(),
            Err(ConfigError::MissingCredential("MAPQUEST_API_KEY"))
        ));
    }

    #[test]
    fn test_provider_config_durations() {
        let config = Config::default();
        let mapquest = config.mapquest.provider_config();
        assert_eq!(mapquest.delay, Duration::from_millis(350));
        assert_eq!(mapquest.timeout, Duration::from_secs(40));
        assert_eq!(mapquest.failure_log, PathBuf::from("mapquest.failed"));
        assert_eq!(config.algolia.provider_config().delay, Duration::from_millis(1100));
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.nominatim.url = "not a url".to_string();
        let err = config.nominatim.endpoint().unwrap_err();
        assert!(err.to_string().contains("nominatim.url"));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[run]\nskip_translated = true\n").unwrap();

        let config = load(Some(&path)).unwrap();
        assert!(config.run.skip_translated);

        assert!(matches!(
            load(Some(&dir.path().join("absent.toml"))),
            Err(ConfigError::Read(..))
        ));

        std::fs::write(&path, "[run\n").unwrap();
        assert!(matches!(load(Some(&path)), Err(ConfigError::Parse(..))));
    }
}

//! Layered configuration.
//!
//! Sources, highest priority first:
//! 1. Environment variables (`QUOTEBOOK_*`, `__` separates sections, e.g.
//!    `QUOTEBOOK_SYNC__INTERVAL_SECS=60`)
//! 2. `./quotebook.toml`
//! 3. `<config_dir>/quotebook/config.toml`
//! 4. Built-in defaults

use crate::sync::merge::IdentityKind;
use crate::sync::remote::{DEFAULT_ENDPOINT, DEFAULT_FETCH_LIMIT};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

const ENV_PREFIX: &str = "QUOTEBOOK_";
const LOCAL_CONFIG_FILE: &str = "quotebook.toml";
const DB_FILE_NAME: &str = "quotebook.sqlite3";

#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid configuration: {}", self.0)
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.0.as_ref())
    }
}

impl From<figment::Error> for ConfigError {
    fn from(value: figment::Error) -> Self {
        Self(Box::new(value))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuotebookConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// SQLite file path; empty means the platform data directory.
    #[serde(default)]
    pub db_path: String,
}

impl StorageConfig {
    pub fn resolved_db_path(&self) -> PathBuf {
        if !self.db_path.trim().is_empty() {
            return PathBuf::from(self.db_path.trim());
        }
        dirs::data_dir()
            .map(|dir| dir.join("quotebook"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DB_FILE_NAME)
    }
}

const fn default_interval_secs() -> u64 {
    30
}

const fn default_fetch_limit() -> usize {
    DEFAULT_FETCH_LIMIT
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SyncConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// POST every added quote to `endpoint`.
    #[serde(default)]
    pub push_enabled: bool,
    #[serde(default)]
    pub identity: IdentityKind,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            interval_secs: default_interval_secs(),
            fetch_limit: default_fetch_limit(),
            timeout_secs: default_timeout_secs(),
            push_enabled: false,
            identity: IdentityKind::default(),
        }
    }
}

impl SyncConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Empty means `default_log_level()`.
    #[serde(default)]
    pub level: String,
    /// Absolute log directory; empty disables file logging.
    #[serde(default)]
    pub dir: String,
}

impl QuotebookConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::figment().extract()?)
    }

    /// Provider chain; public so tests can layer extra providers.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("quotebook").join("config.toml"))
    }
}

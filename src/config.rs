/// Configuration system for post-stamp
///
/// Supports loading from multiple sources with priority:
/// CLI args > Environment variables > Config file > Defaults
use crate::error::{ConfigError, StampError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Directory polling configuration
    #[serde(default)]
    pub watch: WatchConfig,

    /// Metadata header configuration
    #[serde(default)]
    pub front_matter: FrontMatterConfig,
}

/// Directory polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Root directory holding the posts
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Recognized document extensions, without the leading dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Delay between two scan cycles, in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

/// Metadata header configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontMatterConfig {
    /// Line delimiting the header before and after
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Header key holding the edit timestamp
    #[serde(default = "default_date_key")]
    pub date_key: String,
}

fn default_root() -> PathBuf {
    PathBuf::from("_posts")
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string(), "markdown".to_string()]
}

fn default_interval_ms() -> u64 {
    1_000
}

fn default_marker() -> String {
    "---".to_string()
}

fn default_date_key() -> String {
    "date".to_string()
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            extensions: default_extensions(),
            interval_ms: default_interval_ms(),
        }
    }
}

impl Default for FrontMatterConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            date_key: default_date_key(),
        }
    }
}

impl WatchConfig {
    /// Delay between two scan cycles
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self, StampError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseFailed(format!("Invalid TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default location or fall back to defaults
    pub fn load_or_default() -> Result<Self, StampError> {
        let config_path = crate::paths::PlatformPaths::default_config_path();

        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            Self::from_file(&config_path)
        } else {
            tracing::debug!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), StampError> {
        if self.watch.interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "watch.interval_ms".to_string(),
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.watch.extensions.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "watch.extensions".to_string(),
                reason: "at least one extension is required".to_string(),
            }
            .into());
        }

        if let Some(ext) = self
            .watch
            .extensions
            .iter()
            .find(|ext| ext.trim_start_matches('.').is_empty())
        {
            return Err(ConfigError::InvalidValue {
                key: "watch.extensions".to_string(),
                reason: format!("invalid extension '{}'", ext),
            }
            .into());
        }

        if self.front_matter.marker.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "front_matter.marker".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        let key = &self.front_matter.date_key;
        if key.is_empty() || key.contains(':') || key.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidValue {
                key: "front_matter.date_key".to_string(),
                reason: format!("must be a bare header key, got '{}'", key),
            }
            .into());
        }

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(root) = std::env::var("POST_STAMP_ROOT") {
            self.watch.root = PathBuf::from(root);
        }

        if let Ok(interval) = std::env::var("POST_STAMP_INTERVAL_MS")
            && let Ok(ms) = interval.parse()
        {
            self.watch.interval_ms = ms;
        }
    }

    /// Load the explicit config file if given, else the default location,
    /// then apply environment overrides and validate
    pub fn load(explicit: Option<&Path>) -> Result<Self, StampError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => Self::load_or_default()?,
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }
}

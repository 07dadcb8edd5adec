//! Service configuration file support.
//!
//! This module provides utilities for reading the server and generation
//! settings from a TOML configuration file, with environment-variable
//! overrides for deployment.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::services::GenerationConfig;

/// Configuration loading error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub generation: GenerationSettings,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Generation-run settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Upper bound on one generation run, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Optional shuffle seed; omit for the fully deterministic order.
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
    /// Preferred per-day repetition limit for one subject in one course.
    #[serde(default = "default_daily_repeat_limit")]
    pub daily_repeat_limit: u32,
    /// Enforce the repetition limit instead of relaxing it when nothing else
    /// fits.
    #[serde(default)]
    pub strict_daily_limit: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            shuffle_seed: None,
            daily_repeat_limit: default_daily_repeat_limit(),
            strict_daily_limit: false,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_daily_repeat_limit() -> u32 {
    1
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(AppConfig)` if successful
    /// * `Err(ConfigError)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default locations, falling back to the
    /// built-in defaults when no file exists.
    ///
    /// Searches for `timetable.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn load() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from("timetable.toml"),
            PathBuf::from("backend/timetable.toml"),
            PathBuf::from("../timetable.toml"),
        ];

        let mut config = AppConfig::default();
        for path in search_paths {
            if path.exists() {
                config = Self::from_file(&path)?;
                break;
            }
        }

        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment-variable overrides (`HOST`, `PORT`,
    /// `GENERATION_TIMEOUT_SECS`, `SHUFFLE_SEED`).
    pub fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }
        if let Some(secs) = std::env::var("GENERATION_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.generation.timeout_secs = secs;
        }
        if let Some(seed) = std::env::var("SHUFFLE_SEED").ok().and_then(|v| v.parse().ok()) {
            self.generation.shuffle_seed = Some(seed);
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.generation.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "generation.timeout_secs must be positive".to_string(),
            ));
        }
        if self.generation.daily_repeat_limit == 0 {
            return Err(ConfigError::Invalid(
                "generation.daily_repeat_limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl GenerationSettings {
    /// Convert to the controller's runtime configuration.
    pub fn to_generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            shuffle_seed: self.shuffle_seed,
            daily_repeat_limit: self.daily_repeat_limit,
            strict_daily_limit: self.strict_daily_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.generation.timeout_secs, 30);
        assert_eq!(config.generation.daily_repeat_limit, 1);
        assert!(config.generation.shuffle_seed.is_none());
        assert!(!config.generation.strict_daily_limit);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9090

[generation]
timeout_secs = 10
shuffle_seed = 42
daily_repeat_limit = 2
strict_daily_limit = true
"#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);

        let generation = config.generation.to_generation_config();
        assert_eq!(generation.timeout, Duration::from_secs(10));
        assert_eq!(generation.shuffle_seed, Some(42));
        assert_eq!(generation.daily_repeat_limit, 2);
        assert!(generation.strict_daily_limit);
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let toml = r#"
[generation]
shuffle_seed = 7
"#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.generation.timeout_secs, 30);
        assert_eq!(config.generation.shuffle_seed, Some(7));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config: AppConfig = toml::from_str(
            r#"
[generation]
timeout_secs = 0
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }
}

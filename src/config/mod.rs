//! Configuration management for clothop

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};
use crate::session::ExpiryPolicy;

/// Default service URL (the backend's development address)
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the Clothes Manager API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Transport timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Session/credential settings
    #[serde(default)]
    pub session: SessionConfig,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// How the bearer token's expiry is determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpirySource {
    /// Read the `exp` claim from the token itself
    #[default]
    Claim,
    /// Fixed client-side lease recorded when the token is stored
    Lease,
}

/// Session/credential settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Expiry source; exactly one per deployment
    #[serde(default)]
    pub expiry: ExpirySource,

    /// Lease length in minutes (only used with `expiry: lease`)
    #[serde(default = "default_lease_minutes")]
    pub lease_minutes: i64,

    /// Seconds before the deadline at which a token already counts as expired
    #[serde(default = "default_skew_secs")]
    pub skew_secs: i64,

    /// Credential file location (defaults to ~/.clothop/session.yaml)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default page size for paginated lists
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_lease_minutes() -> i64 {
    15
}

fn default_skew_secs() -> i64 {
    10
}

fn default_page_size() -> usize {
    5
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expiry: ExpirySource::default(),
            lease_minutes: default_lease_minutes(),
            skew_secs: default_skew_secs(),
            path: None,
        }
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            session: SessionConfig::default(),
            preferences: Preferences::default(),
        }
    }
}

impl SessionConfig {
    /// Build the expiry policy this configuration selects.
    pub fn policy(&self) -> Result<ExpiryPolicy> {
        if self.skew_secs < 0 {
            return Err(ConfigError::Invalid(
                "session.skew_secs must not be negative".to_string(),
            )
            .into());
        }
        match self.expiry {
            ExpirySource::Claim => Ok(ExpiryPolicy::Claim),
            ExpirySource::Lease => {
                if self.lease_minutes <= 0 {
                    return Err(ConfigError::Invalid(
                        "session.lease_minutes must be positive".to_string(),
                    )
                    .into());
                }
                chrono::Duration::try_minutes(self.lease_minutes)
                    .map(ExpiryPolicy::Lease)
                    .ok_or_else(|| {
                        ConfigError::Invalid("session.lease_minutes is too large".to_string())
                            .into()
                    })
            }
        }
    }

    /// Skew tolerance as a duration.
    pub fn skew(&self) -> Result<chrono::Duration> {
        if self.skew_secs < 0 {
            return Err(ConfigError::Invalid(
                "session.skew_secs must not be negative".to_string(),
            )
            .into());
        }
        chrono::Duration::try_seconds(self.skew_secs).ok_or_else(|| {
            ConfigError::Invalid("session.skew_secs is too large".to_string()).into()
        })
    }

    /// Resolve the credential file path.
    pub fn resolve_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::config_dir()?.join("session.yaml")),
        }
    }
}

impl Config {
    /// Directory holding config and session files (~/.clothop)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".clothop"))
    }

    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.yaml"))
    }

    /// Resolve a config path override, falling back to the default location.
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional path; a missing file yields defaults.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Apply a runtime API URL override (flag or environment).
    pub fn with_api_url(mut self, api_url: Option<&str>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url.trim_end_matches('/').to_string();
        }
        self
    }
}

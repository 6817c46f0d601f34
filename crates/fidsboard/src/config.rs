//! Configuration management for fidsboard.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{FixedOffset, Offset, Utc};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::state::Theme;
use crate::tdx::{Credentials, DEFAULT_FLIGHTS_URL, DEFAULT_TOKEN_URL, MAX_TOP};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration directory name.
const CONFIG_DIR_NAME: &str = "fidsboard";

/// Prefix for environment overrides, e.g. `FIDSBOARD_AUTH__CLIENT_ID`.
const ENV_PREFIX: &str = "FIDSBOARD_";

/// Shown instead of the client secret by [`Config::redacted`].
const REDACTED: &str = "********";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FIDSBOARD_`, `__` between
///    section and key)
/// 2. TOML config file at `~/.config/fidsboard/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Token exchange settings.
    pub auth: AuthConfig,
    /// Flight query settings.
    pub api: ApiConfig,
    /// Local page server settings.
    pub server: ServerConfig,
    /// Presentation settings.
    pub display: DisplayConfig,
}

/// OAuth2 client-credentials settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Token endpoint URL.
    pub token_url: String,
    /// TDX client id.
    pub client_id: Option<String>,
    /// TDX client secret.
    pub client_secret: Option<String>,
}

/// FIDS query settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Flight endpoint URL.
    pub flights_url: String,
    /// Number of records requested (`$top`), at most 100.
    pub top: u32,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Local page server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the page is served on.
    pub bind: SocketAddr,
}

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// UTC offset, in hours, used for displayed times.
    pub utc_offset_hours: i32,
    /// Theme the page starts with.
    pub default_theme: Theme,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            client_id: None,
            client_secret: None,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            flights_url: DEFAULT_FLIGHTS_URL.to_string(),
            top: MAX_TOP,
            timeout_secs: 30,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: 8, // Asia/Taipei
            default_theme: Theme::Dark,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing, or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// Credentials are not required here; commands that talk to TDX check
    /// for them through [`Config::credentials`].
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.auth.token_url.trim().is_empty() {
            return Err(Error::config_validation("auth.token_url must not be empty"));
        }

        if self.api.flights_url.trim().is_empty() {
            return Err(Error::config_validation("api.flights_url must not be empty"));
        }

        if self.api.top == 0 || self.api.top > MAX_TOP {
            return Err(Error::config_validation(format!(
                "api.top ({}) must be between 1 and {MAX_TOP}",
                self.api.top
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(Error::config_validation(
                "api.timeout_secs must be greater than 0",
            ));
        }

        if !(-12..=14).contains(&self.display.utc_offset_hours) {
            return Err(Error::config_validation(format!(
                "display.utc_offset_hours ({}) must be between -12 and 14",
                self.display.utc_offset_hours
            )));
        }

        Ok(())
    }

    /// The configured client credentials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredentials`] if either value is unset or blank.
    pub fn credentials(&self) -> Result<Credentials> {
        let non_blank = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        match (
            non_blank(&self.auth.client_id),
            non_blank(&self.auth.client_secret),
        ) {
            (Some(id), Some(secret)) => Ok(Credentials::new(id, secret)),
            _ => Err(Error::MissingCredentials),
        }
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Get the display offset for localized times.
    #[must_use]
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.display.utc_offset_hours * 3600).unwrap_or_else(|| Utc.fix())
    }

    /// A copy safe to print: the client secret is masked.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.auth.client_secret.is_some() {
            config.auth.client_secret = Some(REDACTED.to_string());
        }
        config
    }
}

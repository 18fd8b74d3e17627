//! Client configuration.
//!
//! Sources, later ones winning:
//! 1. Built-in defaults
//! 2. A TOML file (`friendlines.toml` in the working directory, or an explicit path)
//! 3. `FRIENDLINES_*` environment variables (e.g. `FRIENDLINES_BASE_URL`)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const CREDENTIALS_FILE: &str = "credentials.json";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or merged.
    #[error("failed to load configuration: {0}")]
    Load(String),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for talking to the backend and persisting credentials.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API base URL, including the `/api` prefix.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Where the credential file lives.
    pub credentials_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("friendlines/{}", env!("CARGO_PKG_VERSION")),
            credentials_path: default_credentials_path(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from defaults, a TOML file and the environment.
    ///
    /// With `path` set, that file must exist. Otherwise `friendlines.toml`
    /// is read if present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("friendlines").required(false),
        };

        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix("FRIENDLINES").try_parsing(true))
            .build()
            .map_err(|e| ConfigError::Load(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ConfigError::Load(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Parses [`base_url`](Self::base_url).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if it is not an absolute http(s) URL.
    pub fn api_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ConfigError::Invalid(format!("base_url {}: {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "base_url must be http or https, got {url}"
            )));
        }
        Ok(url)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a bad base URL or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api_url()?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// `<config dir>/friendlines/credentials.json`, or `.friendlines/credentials.json`
/// when the platform has no config directory.
fn default_credentials_path() -> PathBuf {
    dirs::config_dir().map_or_else(
        || PathBuf::from(".friendlines").join(CREDENTIALS_FILE),
        |dir| dir.join("friendlines").join(CREDENTIALS_FILE),
    )
}

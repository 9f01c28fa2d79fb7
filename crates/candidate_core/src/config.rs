//! Service configuration loaded from TOML.
//!
//! # Responsibility
//! - Describe where the candidate store lives and how to reach peer services.
//! - Fill omitted sections with local-development defaults.
//!
//! # Invariants
//! - Peer base URLs are non-empty `http://` or `https://` URLs.
//! - `timeout_ms`, when set, is greater than zero.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_PARTY_SERVICE_URL: &str = "http://localhost:8081";
pub const DEFAULT_ELECTION_SERVICE_URL: &str = "http://localhost:8082";
pub const DEFAULT_DATABASE_PATH: &str = "candidates.sqlite3";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config file `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config file: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub party_service: EndpointConfig,
    pub election_service: EndpointConfig,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            party_service: EndpointConfig::new(DEFAULT_PARTY_SERVICE_URL),
            election_service: EndpointConfig::new(DEFAULT_ELECTION_SERVICE_URL),
            logging: LoggingConfig::default(),
        }
    }
}

/// Candidate store file, relative to the working directory unless absolute.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}

/// Address of one peer service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
    pub base_url: String,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl EndpointConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: None,
        }
    }
}

/// File logging settings. Logging stays off when `dir` is unset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: crate::logging::default_log_level().to_string(),
            dir: None,
        }
    }
}

impl AppConfig {
    /// Reads and validates a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parses and validates TOML config text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "database.path cannot be empty".to_string(),
            ));
        }
        validate_endpoint("party_service", &self.party_service)?;
        validate_endpoint("election_service", &self.election_service)?;
        Ok(())
    }
}

fn validate_endpoint(section: &str, endpoint: &EndpointConfig) -> Result<(), ConfigError> {
    let url = endpoint.base_url.trim();
    if url.is_empty() {
        return Err(ConfigError::Invalid(format!(
            "{section}.base_url cannot be empty"
        )));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::Invalid(format!(
            "{section}.base_url must start with http:// or https://, got `{url}`"
        )));
    }
    if endpoint.timeout_ms == Some(0) {
        return Err(ConfigError::Invalid(format!(
            "{section}.timeout_ms must be greater than zero"
        )));
    }
    Ok(())
}

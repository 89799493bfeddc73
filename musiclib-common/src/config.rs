//! Bootstrap configuration loading
//!
//! Settings are resolved in priority order:
//! 1. Command-line arguments and environment variables (`ConfigOverrides`)
//! 2. TOML configuration file
//! 3. Built-in defaults
//!
//! The enrichment service URL has no default; startup fails without it.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://musiclib.db?mode=rwc";
pub const DEFAULT_EXTERNAL_API_TIMEOUT_SECS: u64 = 10;
/// `EnvFilter` directives used when neither `RUST_LOG` nor `logging.level` is set
pub const DEFAULT_LOG_FILTER: &str = "musiclib_api=info,tower_http=info";

/// Configuration file contents; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub database_url: Option<String>,
    /// Base URL of the song enrichment service
    #[serde(default)]
    pub external_api_url: Option<String>,
    #[serde(default)]
    pub external_api_timeout_secs: Option<u64>,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// File the values were read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive string
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

/// Default configuration file location: `<config_dir>/musiclib/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("musiclib").join("config.toml"))
}

impl TomlConfig {
    /// Read and parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| {
            Error::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Load the configuration file.
    ///
    /// An explicitly named file must exist and parse. Without one, the
    /// default location is tried and silently skipped when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database_url: Option<String>,
    pub external_api_url: Option<String>,
    pub external_api_timeout_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub external_api_url: String,
    pub external_api_timeout: Duration,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl ServiceConfig {
    /// Merge overrides over the TOML file over built-in defaults
    pub fn resolve(overrides: ConfigOverrides, toml_config: TomlConfig) -> Result<Self> {
        let external_api_url = overrides
            .external_api_url
            .or(toml_config.external_api_url)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                Error::Config(
                    "Enrichment service URL not configured. Set EXTERNAL_API_URL, \
                     pass --external-api-url or add external_api_url to the config file"
                        .to_string(),
                )
            })?;

        let timeout_secs = overrides
            .external_api_timeout_secs
            .or(toml_config.external_api_timeout_secs)
            .unwrap_or(DEFAULT_EXTERNAL_API_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::Config(
                "Enrichment service timeout must be at least one second".to_string(),
            ));
        }

        Ok(Self {
            host: overrides
                .host
                .or(toml_config.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(toml_config.port).unwrap_or(DEFAULT_PORT),
            database_url: overrides
                .database_url
                .or(toml_config.database_url)
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            external_api_url,
            external_api_timeout: Duration::from_secs(timeout_secs),
            log_level: toml_config.logging.level,
            log_file: overrides.log_file.or(toml_config.logging.file),
        })
    }

    /// Socket address string for the HTTP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

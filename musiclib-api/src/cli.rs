//! Command-line arguments for musiclib-api
//!
//! Every option can also come from the environment (or a `.env` file loaded
//! at startup). Unset options fall through to the TOML file and then to
//! built-in defaults.

use clap::Parser;
use musiclib_common::config::ConfigOverrides;
use std::path::PathBuf;

/// Command-line arguments for musiclib-api
#[derive(Parser, Debug)]
#[command(name = "musiclib-api")]
#[command(about = "Song catalog HTTP service")]
#[command(version)]
pub struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "MUSICLIB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "API_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "API_PORT")]
    pub port: Option<u16>,

    /// SQLite connection URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Base URL of the song enrichment service
    #[arg(long, env = "EXTERNAL_API_URL")]
    pub external_api_url: Option<String>,

    /// Enrichment request timeout in seconds
    #[arg(long, env = "EXTERNAL_API_TIMEOUT")]
    pub external_api_timeout: Option<u64>,

    /// Append logs to this file instead of stderr
    #[arg(long, env = "LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            database_url: self.database_url.clone(),
            external_api_url: self.external_api_url.clone(),
            external_api_timeout_secs: self.external_api_timeout,
            log_file: self.log_file.clone(),
        }
    }
}

//! Configuration types for chatkeep.
//!
//! `AppConfig` represents the `config.toml` in the data directory. Every field
//! has a default, so an empty or partial file is valid.

use serde::{Deserialize, Serialize};

/// Top-level service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Name reported in logs and the startup banner.
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Address the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound for one service operation, including pool acquisition
    /// and commit.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub database: DatabaseConfig,
}

fn default_app_name() -> String {
    "chatkeep".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout_secs() -> u64 {
    20
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
            database: DatabaseConfig::default(),
        }
    }
}

/// SQLite connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection URL. `None` means `{data_dir}/chatkeep.db`.
    #[serde(default)]
    pub url: Option<String>,

    /// Size of the read-only pool. The writer pool always has one connection.
    #[serde(default = "default_max_read_connections")]
    pub max_read_connections: u32,

    /// How long a connection waits on a locked database before failing.
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,
}

fn default_max_read_connections() -> u32 {
    8
}

fn default_busy_timeout_secs() -> u64 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_read_connections: default_max_read_connections(),
            busy_timeout_secs: default_busy_timeout_secs(),
        }
    }
}

//! Configuration loader for chatkeep.
//!
//! Reads `config.toml` from the data directory (`~/.chatkeep/` in production)
//! and deserializes it into [`AppConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::{Path, PathBuf};

use chatkeep_types::config::AppConfig;

/// Resolve the data directory.
///
/// `CHATKEEP_DATA_DIR` wins, then `~/.chatkeep`, then `./.chatkeep`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CHATKEEP_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".chatkeep");
    }

    PathBuf::from(".chatkeep")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
pub async fn load_app_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

/// The configured database URL, or `{data_dir}/chatkeep.db`.
pub fn database_url(config: &AppConfig, data_dir: &Path) -> String {
    match &config.database.url {
        Some(url) => url.clone(),
        None => format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("chatkeep.db").display()
        ),
    }
}

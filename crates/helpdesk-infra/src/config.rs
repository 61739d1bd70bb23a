//! Configuration loader for the helpdesk assistant.
//!
//! Reads `config.toml` from the data directory (`~/.helpdesk/` by default)
//! into [`HelpdeskConfig`], then applies environment overrides. Falls back
//! to defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use helpdesk_types::config::HelpdeskConfig;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "HELPDESK_DATA_DIR";

/// Database file name inside the data directory.
const DATABASE_FILE: &str = "helpdesk.db";

/// Resolve the data directory: `$HELPDESK_DATA_DIR`, else `~/.helpdesk`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".helpdesk")
}

/// Default SQLite URL for a data directory.
pub fn default_database_url(data_dir: &Path) -> String {
    format!("sqlite://{}?mode=rwc", data_dir.join(DATABASE_FILE).display())
}

/// The database URL to open: the configured one, else the data-dir default.
pub fn database_url(config: &HelpdeskConfig, data_dir: &Path) -> String {
    match config.database.url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => default_database_url(data_dir),
    }
}

/// Load configuration from `path` (or `{data_dir}/config.toml`) and apply
/// environment overrides from the process environment.
pub async fn load_config(data_dir: &Path, path: Option<&Path>) -> HelpdeskConfig {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| data_dir.join("config.toml"));

    let mut config = read_config_file(&config_path).await;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config
}

/// Parse a config file.
///
/// - If the file does not exist, returns [`HelpdeskConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
pub async fn read_config_file(config_path: &Path) -> HelpdeskConfig {
    let content = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return HelpdeskConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return HelpdeskConfig::default();
        }
    };

    match toml::from_str::<HelpdeskConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            HelpdeskConfig::default()
        }
    }
}

/// Apply `HOST`, `PORT`, `DEBUG`, `DATABASE_URL`, `OPENAI_API_KEY`,
/// `OPENAI_MODEL` and `OPENAI_BASE_URL` on top of the file values.
///
/// `lookup` abstracts the environment so tests need not mutate it.
pub fn apply_env_overrides(config: &mut HelpdeskConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(host) = lookup("HOST") {
        config.server.host = host;
    }
    if let Some(port) = lookup("PORT") {
        match port.trim().parse::<u16>() {
            Ok(port) => config.server.port = port,
            Err(err) => tracing::warn!("Ignoring PORT={port}: {err}"),
        }
    }
    if let Some(debug) = lookup("DEBUG") {
        config.server.debug = matches!(debug.trim().to_lowercase().as_str(), "true" | "1" | "yes");
    }
    if let Some(url) = lookup("DATABASE_URL") {
        config.database.url = Some(url);
    }
    if let Some(key) = lookup("OPENAI_API_KEY") {
        config.llm.api_key = Some(SecretString::from(key));
    }
    if let Some(model) = lookup("OPENAI_MODEL") {
        config.llm.model = model;
    }
    if let Some(base_url) = lookup("OPENAI_BASE_URL") {
        config.llm.base_url = Some(base_url);
    }
}

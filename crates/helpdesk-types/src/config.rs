//! Configuration types for the helpdesk assistant.
//!
//! `HelpdeskConfig` is the deserialized form of `config.toml`. Every field
//! has a default, so an empty file (or no file at all) is a valid config.
//! Environment overrides are applied by the loader in helpdesk-infra.

use secrecy::SecretString;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct HelpdeskConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub chat: ChatConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Enables verbose request logging.
    #[serde(default)]
    pub debug: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: false,
        }
    }
}

/// Conversation store settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite URL. `None` resolves to `{data_dir}/helpdesk.db`.
    #[serde(default)]
    pub url: Option<String>,
}

/// Completion provider settings.
///
/// The API key is wrapped in [`SecretString`] so it never shows up in
/// `Debug` output or logs.
#[derive(Debug, Deserialize)]
pub struct LlmConfig {
    /// Missing or empty key means the provider is not configured and the
    /// responder answers from static text only.
    #[serde(default)]
    pub api_key: Option<SecretString>,

    #[serde(default = "default_model")]
    pub model: String,

    /// Override for OpenAI-compatible endpoints. `None` uses api.openai.com.
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Upper bound on a single provider call; elapsing counts as a failure.
    #[serde(default = "default_response_timeout_secs")]
    pub response_timeout_secs: u64,
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f64 {
    0.7
}

fn default_response_timeout_secs() -> u64 {
    30
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            response_timeout_secs: default_response_timeout_secs(),
        }
    }
}

/// Chat turn settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Maximum history entries shown per user in activity reports.
    #[serde(default = "default_max_conversation_history")]
    pub max_conversation_history: usize,
}

fn default_max_conversation_history() -> usize {
    10
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_conversation_history: default_max_conversation_history(),
        }
    }
}

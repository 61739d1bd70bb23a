//! Connection settings for an OpenAI-compatible completion endpoint.

use secrecy::{ExposeSecret, SecretString};

use helpdesk_types::config::LlmConfig;

/// Default base URL of the OpenAI API.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for an OpenAI-compatible completion provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name, reported as `gen_ai.system`.
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    pub api_key: SecretString,
    /// Model used when a request leaves its model empty.
    pub model: String,
}

impl OpenAiCompatConfig {
    /// Build settings from the `[llm]` config section.
    ///
    /// Returns `None` when no API key is set or the key is blank.
    pub fn from_llm_config(llm: &LlmConfig) -> Option<Self> {
        let api_key = llm.api_key.as_ref()?;
        if api_key.expose_secret().trim().is_empty() {
            return None;
        }

        let base_url = llm
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(OPENAI_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        let provider_name = if base_url == OPENAI_BASE_URL {
            "openai".to_string()
        } else {
            "openai_compatible".to_string()
        };

        Some(Self {
            provider_name,
            base_url,
            api_key: SecretString::from(api_key.expose_secret().trim().to_string()),
            model: llm.model.clone(),
        })
    }
}

//! Completion provider implementations.
//!
//! Contains the OpenAI-compatible implementation of the
//! [`CompletionProvider`](helpdesk_core::llm::provider::CompletionProvider)
//! trait and a factory ([`create_provider`]) that builds it from the `[llm]`
//! config section.

pub mod openai_compat;

use helpdesk_core::llm::box_provider::BoxCompletionProvider;
use helpdesk_types::config::LlmConfig;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::OpenAiCompatConfig;

/// Create a [`BoxCompletionProvider`] from the `[llm]` config section.
///
/// Returns `None` when no API key is configured; the responder then answers
/// from static text only.
pub fn create_provider(llm: &LlmConfig) -> Option<BoxCompletionProvider> {
    let Some(config) = OpenAiCompatConfig::from_llm_config(llm) else {
        tracing::info!("no completion API key configured, replies use the knowledge base only");
        return None;
    };

    tracing::info!(
        provider = %config.provider_name,
        model = %config.model,
        base_url = %config.base_url,
        "completion provider configured"
    );
    Some(BoxCompletionProvider::new(OpenAiCompatibleProvider::new(config)))
}

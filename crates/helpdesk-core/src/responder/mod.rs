//! Reply composition for support messages.
//!
//! The responder classifies the message, then asks the completion provider
//! either to personalize the knowledge-base answer or to answer freely.
//! Any provider failure (missing provider, transport error, timeout, empty
//! output) falls back to static text, so `respond` always yields a reply.

pub mod prompt;

use std::time::Duration;

use tracing::{Instrument, debug, info_span, warn};

use helpdesk_types::config::LlmConfig;
use helpdesk_types::error::ProviderError;
use helpdesk_types::exchange::Category;
use helpdesk_types::llm::CompletionRequest;

use crate::classifier;
use crate::knowledge;
use crate::llm::box_provider::BoxCompletionProvider;

/// Generation parameters for provider calls.
#[derive(Debug, Clone)]
pub struct ResponderConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    /// Bound on a single provider call.
    pub timeout: Duration,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self::from(&LlmConfig::default())
    }
}

impl From<&LlmConfig> for ResponderConfig {
    fn from(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout: Duration::from_secs(config.response_timeout_secs),
        }
    }
}

/// Where a reply's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Provider,
    Fallback,
}

/// A composed reply and the category it was filed under.
#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub category: Category,
    pub source: ReplySource,
}

/// Composes replies. Holds no mutable state; safe to share across tasks.
pub struct Responder {
    provider: Option<BoxCompletionProvider>,
    config: ResponderConfig,
}

impl Responder {
    /// Create a responder. `None` means no provider is configured and every
    /// reply comes from the static fallback.
    pub fn new(provider: Option<BoxCompletionProvider>, config: ResponderConfig) -> Self {
        Self { provider, config }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Produce a reply for `message`. Never fails.
    pub async fn respond(&self, message: &str, user_id: &str) -> Reply {
        let category = classifier::classify(message);
        let base_answer = knowledge::lookup(category);

        let system = match base_answer {
            Some(answer) => prompt::personalize_prompt(answer),
            None => prompt::GENERAL_PROMPT.to_string(),
        };

        match self.complete(system, message).await {
            Ok(text) => {
                debug!(user_id, %category, "reply generated by provider");
                Reply {
                    text,
                    category,
                    source: ReplySource::Provider,
                }
            }
            Err(ProviderError::NotConfigured) => {
                debug!(user_id, %category, "no completion provider, using static reply");
                Reply {
                    text: fallback_reply(category),
                    category,
                    source: ReplySource::Fallback,
                }
            }
            Err(err) => {
                warn!(user_id, %category, error = %err, "completion failed, using static reply");
                Reply {
                    text: fallback_reply(category),
                    category,
                    source: ReplySource::Fallback,
                }
            }
        }
    }

    /// Call the provider with a bounded wait and validate its output.
    async fn complete(&self, system: String, message: &str) -> Result<String, ProviderError> {
        let provider = self.provider.as_ref().ok_or(ProviderError::NotConfigured)?;

        let request = CompletionRequest::single_turn(
            system,
            message,
            self.config.model.clone(),
            self.config.max_tokens,
            self.config.temperature,
        );

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
        );

        let response = tokio::time::timeout(self.config.timeout, provider.complete(&request))
            .instrument(span)
            .await
            .map_err(|_| ProviderError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            })??;

        let text = response.content.trim();
        if text.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}

/// Static reply for a category when the provider cannot answer.
pub fn fallback_reply(category: Category) -> String {
    match knowledge::lookup(category) {
        Some(answer) => prompt::knowledge_fallback(answer),
        None => prompt::escalation_message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockProvider, RecordingProvider};

    fn responder_with(provider: Option<BoxCompletionProvider>) -> Responder {
        Responder::new(provider, ResponderConfig::default())
    }

    #[tokio::test]
    async fn test_no_provider_kb_category_returns_verbatim_entry() {
        let responder = responder_with(None);
        for (message, category) in [
            ("Забыл пароль, как сбросить?", Category::Password),
            ("Нужен доступ к папке", Category::Access),
            ("Как прикрепить документ?", Category::Documents),
            ("Не могу подключиться к VPN", Category::Connection),
            ("Как установить программу?", Category::Software),
        ] {
            let reply = responder.respond(message, "anonymous").await;
            assert_eq!(reply.category, category);
            assert_eq!(reply.source, ReplySource::Fallback);
            assert!(reply.text.contains(knowledge::lookup(category).unwrap()));
            assert!(reply.text.starts_with(prompt::KNOWLEDGE_FALLBACK_PREFIX));
        }
    }

    #[tokio::test]
    async fn test_no_provider_general_returns_escalation() {
        let responder = responder_with(None);
        let reply = responder.respond("Расскажи анекдот", "anonymous").await;
        assert_eq!(reply.category, Category::General);
        assert_eq!(reply.source, ReplySource::Fallback);
        assert!(reply.text.contains(prompt::SUPPORT_EMAIL));
        assert!(reply.text.contains(prompt::SUPPORT_PHONE));
    }

    #[tokio::test]
    async fn test_provider_success_is_trimmed() {
        let provider = MockProvider::ok("mock", "  Попробуйте сбросить пароль на портале.\n");
        let responder = responder_with(Some(BoxCompletionProvider::new(provider)));
        let reply = responder.respond("забыл пароль", "ivanov").await;
        assert_eq!(reply.source, ReplySource::Provider);
        assert_eq!(reply.category, Category::Password);
        assert_eq!(reply.text, "Попробуйте сбросить пароль на портале.");
    }

    #[tokio::test]
    async fn test_provider_error_falls_back() {
        let provider = MockProvider::failing("mock", || ProviderError::AuthenticationFailed);
        let responder = responder_with(Some(BoxCompletionProvider::new(provider)));

        let reply = responder.respond("VPN не подключается", "ivanov").await;
        assert_eq!(reply.source, ReplySource::Fallback);
        assert_eq!(reply.category, Category::Connection);
        assert!(reply.text.contains(knowledge::lookup(Category::Connection).unwrap()));

        let reply = responder.respond("Что такое облако?", "ivanov").await;
        assert_eq!(reply.category, Category::General);
        assert!(reply.text.contains(prompt::SUPPORT_EMAIL));
    }

    #[tokio::test]
    async fn test_empty_completion_falls_back() {
        let provider = MockProvider::ok("mock", "   \n ");
        let responder = responder_with(Some(BoxCompletionProvider::new(provider)));
        let reply = responder.respond("Расскажи анекдот", "anonymous").await;
        assert_eq!(reply.source, ReplySource::Fallback);
        assert_eq!(reply.text, prompt::escalation_message());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_provider_times_out_and_falls_back() {
        let provider = MockProvider::slow("mock", "too late", Duration::from_secs(120));
        let config = ResponderConfig {
            timeout: Duration::from_secs(1),
            ..ResponderConfig::default()
        };
        let responder = Responder::new(Some(BoxCompletionProvider::new(provider)), config);
        let reply = responder.respond("забыл пароль", "anonymous").await;
        assert_eq!(reply.source, ReplySource::Fallback);
        assert!(reply.text.contains(knowledge::lookup(Category::Password).unwrap()));
    }

    #[tokio::test]
    async fn test_request_carries_kb_text_and_generation_params() {
        let (provider, requests) = RecordingProvider::new("Ответ");
        let config = ResponderConfig {
            model: "gpt-4o-mini".to_string(),
            max_tokens: 321,
            temperature: 0.4,
            timeout: Duration::from_secs(5),
        };
        let responder = Responder::new(Some(BoxCompletionProvider::new(provider)), config);

        responder.respond("Как установить софт?", "anonymous").await;
        responder.respond("Расскажи анекдот", "anonymous").await;

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 2);

        let kb_request = &requests[0];
        assert_eq!(kb_request.model, "gpt-4o-mini");
        assert_eq!(kb_request.max_tokens, 321);
        assert_eq!(kb_request.temperature, Some(0.4));
        assert_eq!(kb_request.messages[0].content, "Как установить софт?");
        let system = kb_request.system.as_deref().unwrap();
        assert!(system.contains(knowledge::lookup(Category::Software).unwrap()));

        let general_request = &requests[1];
        assert_eq!(general_request.system.as_deref(), Some(prompt::GENERAL_PROMPT));
    }

    #[test]
    fn test_config_from_llm_config() {
        let llm = LlmConfig {
            response_timeout_secs: 12,
            ..LlmConfig::default()
        };
        let config = ResponderConfig::from(&llm);
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.max_tokens, 500);
    }
}

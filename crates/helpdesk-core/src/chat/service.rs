//! Chat service handling one support turn end to end.
//!
//! ChatService validates the inbound message, asks the Responder for a
//! reply, stamps the turn and persists it through the ExchangeRepository.
//! A failed write does not discard the reply; it is reported alongside it.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use helpdesk_types::error::ChatError;
use helpdesk_types::exchange::{Category, NewExchange, normalize_user_id};

use crate::chat::repository::ExchangeRepository;
use crate::responder::{ReplySource, Responder};

/// Outcome of writing the exchange to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    Stored { id: i64 },
    Failed { error: String },
}

/// Result of one chat turn.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub user_id: String,
    pub response: String,
    pub category: Category,
    pub source: ReplySource,
    pub timestamp: DateTime<Utc>,
    pub persistence: Persistence,
}

impl ChatTurn {
    /// Error text when the exchange could not be stored.
    pub fn persistence_error(&self) -> Option<&str> {
        match &self.persistence {
            Persistence::Stored { .. } => None,
            Persistence::Failed { error } => Some(error),
        }
    }
}

/// Orchestrates reply generation and exchange persistence.
///
/// Generic over `ExchangeRepository` so helpdesk-core never depends on
/// helpdesk-infra.
pub struct ChatService<R: ExchangeRepository> {
    responder: Responder,
    repo: R,
}

impl<R: ExchangeRepository> ChatService<R> {
    pub fn new(responder: Responder, repo: R) -> Self {
        Self { responder, repo }
    }

    pub fn responder(&self) -> &Responder {
        &self.responder
    }

    /// Handle one inbound message.
    ///
    /// Blank user ids become `"anonymous"`. Only a missing or blank message
    /// is an error; provider and store failures still yield a reply. The
    /// message is classified and stored exactly as submitted.
    pub async fn handle(&self, message: &str, user_id: Option<&str>) -> Result<ChatTurn, ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::Validation("message must not be empty".to_string()));
        }
        let user_id = normalize_user_id(user_id);

        let reply = self.responder.respond(message, &user_id).await;
        let timestamp = Utc::now();

        let exchange = NewExchange {
            user_id: user_id.clone(),
            user_message: message.to_string(),
            bot_response: reply.text.clone(),
            timestamp,
            category: Some(reply.category),
        };

        let persistence = match self.repo.record(&exchange).await {
            Ok(stored) => {
                info!(
                    exchange_id = stored.id,
                    user_id = %user_id,
                    category = %reply.category,
                    source = ?reply.source,
                    "exchange recorded"
                );
                Persistence::Stored { id: stored.id }
            }
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "failed to record exchange");
                Persistence::Failed {
                    error: e.to_string(),
                }
            }
        };

        Ok(ChatTurn {
            user_id,
            response: reply.text,
            category: reply.category,
            source: reply.source,
            timestamp,
            persistence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::box_provider::BoxCompletionProvider;
    use crate::responder::ResponderConfig;
    use crate::test_support::{InMemoryExchangeRepository, MockProvider};

    fn service(repo: InMemoryExchangeRepository) -> ChatService<InMemoryExchangeRepository> {
        ChatService::new(Responder::new(None, ResponderConfig::default()), repo)
    }

    #[tokio::test]
    async fn test_handle_records_exchange() {
        let repo = InMemoryExchangeRepository::new();
        let svc = service(repo.clone());

        let turn = svc
            .handle("Забыл пароль, как сбросить?", Some("ivanov"))
            .await
            .unwrap();

        assert_eq!(turn.category, Category::Password);
        assert_eq!(turn.persistence, Persistence::Stored { id: 1 });
        assert!(turn.persistence_error().is_none());

        let stored = repo.all();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].user_id, "ivanov");
        assert_eq!(stored[0].user_message, "Забыл пароль, как сбросить?");
        assert_eq!(stored[0].bot_response, turn.response);
        assert_eq!(stored[0].category, Some(Category::Password));
        assert_eq!(stored[0].timestamp, turn.timestamp);
    }

    #[tokio::test]
    async fn test_blank_user_id_is_anonymous() {
        let repo = InMemoryExchangeRepository::new();
        let svc = service(repo.clone());

        svc.handle("Расскажи анекдот", None).await.unwrap();
        svc.handle("Расскажи анекдот", Some("   ")).await.unwrap();

        assert!(repo.all().iter().all(|e| e.user_id == "anonymous"));
    }

    #[tokio::test]
    async fn test_blank_message_is_rejected() {
        let repo = InMemoryExchangeRepository::new();
        let svc = service(repo.clone());

        let err = svc.handle("  \n", Some("ivanov")).await.unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
        assert!(repo.all().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_keeps_reply() {
        let repo = InMemoryExchangeRepository::new();
        repo.fail_writes();
        let provider = MockProvider::ok("mock", "Перезагрузите роутер.");
        let svc = ChatService::new(
            Responder::new(
                Some(BoxCompletionProvider::new(provider)),
                ResponderConfig::default(),
            ),
            repo,
        );

        let turn = svc.handle("Нет интернета", None).await.unwrap();
        assert_eq!(turn.response, "Перезагрузите роутер.");
        assert_eq!(turn.source, ReplySource::Provider);
        assert!(turn.persistence_error().unwrap().contains("disk I/O error"));
    }

    #[tokio::test]
    async fn test_message_stored_as_submitted() {
        let repo = InMemoryExchangeRepository::new();
        let svc = service(repo.clone());

        let turn = svc.handle("  Нет VPN\n", Some("ivanov")).await.unwrap();
        assert_eq!(turn.category, Category::Connection);
        assert_eq!(repo.all()[0].user_message, "  Нет VPN\n");
    }

    #[tokio::test]
    async fn test_timestamps_non_decreasing() {
        let repo = InMemoryExchangeRepository::new();
        let svc = service(repo.clone());
        for _ in 0..5 {
            svc.handle("Как установить программу?", None).await.unwrap();
        }
        let stored = repo.all();
        assert!(stored.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }
}

//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over the repository trait; AppState pins them to the
//! SQLite implementation.

use std::path::Path;
use std::sync::Arc;

use helpdesk_core::analytics::AnalyticsService;
use helpdesk_core::chat::service::ChatService;
use helpdesk_core::responder::{Responder, ResponderConfig};
use helpdesk_infra::config::database_url;
use helpdesk_infra::llm::create_provider;
use helpdesk_infra::sqlite::exchange::SqliteExchangeRepository;
use helpdesk_infra::sqlite::pool::DatabasePool;
use helpdesk_types::config::HelpdeskConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteChatService = ChatService<SqliteExchangeRepository>;

pub type ConcreteAnalyticsService = AnalyticsService<SqliteExchangeRepository>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub analytics_service: Arc<ConcreteAnalyticsService>,
    pub database_url: String,
    pub db_pool: DatabasePool,
    /// Verbose request tracing (`[server] debug` / `DEBUG`).
    pub debug: bool,
}

impl AppState {
    /// Initialize the application state: open the DB, build the provider,
    /// wire services.
    pub async fn init(config: &HelpdeskConfig, data_dir: &Path) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(data_dir).await?;

        let database_url = database_url(config, data_dir);
        let db_pool = DatabasePool::new(&database_url).await?;
        tracing::debug!(url = %database_url, "database opened");

        let repo = SqliteExchangeRepository::new(db_pool.clone());

        let responder = Responder::new(
            create_provider(&config.llm),
            ResponderConfig::from(&config.llm),
        );
        let chat_service = ChatService::new(responder, repo.clone());
        let analytics_service =
            AnalyticsService::new(repo).with_recent_limit(config.chat.max_conversation_history);

        Ok(Self {
            chat_service: Arc::new(chat_service),
            analytics_service: Arc::new(analytics_service),
            database_url,
            db_pool,
            debug: config.server.debug,
        })
    }
}

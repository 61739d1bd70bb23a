//! In-crate test doubles: mock completion providers and an in-memory
//! exchange repository with the same semantics as the SQLite one.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};

use helpdesk_types::error::{ProviderError, RepositoryError};
use helpdesk_types::exchange::{Category, Exchange, NewExchange};
use helpdesk_types::llm::{CompletionRequest, CompletionResponse, StopReason, Usage};
use helpdesk_types::stats::UserCount;

use crate::chat::repository::ExchangeRepository;
use crate::llm::provider::CompletionProvider;

// --- Mock providers ---

enum MockResult {
    Success(String),
    Slow(String, Duration),
    Error(Box<dyn Fn() -> ProviderError + Send + Sync>),
}

pub struct MockProvider {
    name: String,
    result: MockResult,
}

impl MockProvider {
    pub fn ok(name: &str, content: &str) -> Self {
        Self {
            name: name.to_string(),
            result: MockResult::Success(content.to_string()),
        }
    }

    pub fn slow(name: &str, content: &str, delay: Duration) -> Self {
        Self {
            name: name.to_string(),
            result: MockResult::Slow(content.to_string(), delay),
        }
    }

    pub fn failing(name: &str, error: impl Fn() -> ProviderError + Send + Sync + 'static) -> Self {
        Self {
            name: name.to_string(),
            result: MockResult::Error(Box::new(error)),
        }
    }
}

fn response(content: String) -> CompletionResponse {
    CompletionResponse {
        id: "resp-mock".to_string(),
        content,
        model: "mock-model".to_string(),
        stop_reason: StopReason::EndTurn,
        usage: Usage {
            input_tokens: 10,
            output_tokens: 20,
        },
    }
}

impl CompletionProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn complete(
        &self,
        _request: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionResponse, ProviderError>> + Send {
        let outcome = match &self.result {
            MockResult::Success(content) => Ok((content.clone(), None)),
            MockResult::Slow(content, delay) => Ok((content.clone(), Some(*delay))),
            MockResult::Error(make) => Err(make()),
        };
        async move {
            let (content, delay) = outcome?;
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            Ok(response(content))
        }
    }
}

/// Provider that answers with fixed text and keeps every request it saw.
pub struct RecordingProvider {
    content: String,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl RecordingProvider {
    pub fn new(content: &str) -> (Self, Arc<Mutex<Vec<CompletionRequest>>>) {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let provider = Self {
            content: content.to_string(),
            requests: Arc::clone(&requests),
        };
        (provider, requests)
    }
}

impl CompletionProvider for RecordingProvider {
    fn name(&self) -> &str {
        "recording"
    }

    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionResponse, ProviderError>> + Send {
        self.requests.lock().unwrap().push(request.clone());
        let content = self.content.clone();
        async move { Ok(response(content)) }
    }
}

// --- In-memory repository ---

/// Vec-backed `ExchangeRepository`. Clones share the same storage.
#[derive(Clone, Default)]
pub struct InMemoryExchangeRepository {
    exchanges: Arc<Mutex<Vec<Exchange>>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryExchangeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `record` call fail.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    /// Insert an exchange with an explicit timestamp and raw category.
    pub fn seed(&self, user_id: &str, message: &str, category: Option<Category>, timestamp: DateTime<Utc>) {
        let mut exchanges = self.exchanges.lock().unwrap();
        let id = exchanges.len() as i64 + 1;
        exchanges.push(Exchange {
            id,
            user_id: user_id.to_string(),
            user_message: message.to_string(),
            bot_response: "ok".to_string(),
            timestamp,
            category,
        });
    }

    pub fn all(&self) -> Vec<Exchange> {
        self.exchanges.lock().unwrap().clone()
    }

    fn snapshot(&self) -> Vec<Exchange> {
        self.all()
    }
}

impl ExchangeRepository for InMemoryExchangeRepository {
    async fn record(&self, exchange: &NewExchange) -> Result<Exchange, RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Query("disk I/O error".to_string()));
        }
        let mut exchanges = self.exchanges.lock().unwrap();
        let stored = Exchange {
            id: exchanges.len() as i64 + 1,
            user_id: exchange.user_id.clone(),
            user_message: exchange.user_message.clone(),
            bot_response: exchange.bot_response.clone(),
            timestamp: exchange.timestamp,
            category: exchange.category,
        };
        exchanges.push(stored.clone());
        Ok(stored)
    }

    async fn count_all(&self) -> Result<u64, RepositoryError> {
        Ok(self.snapshot().len() as u64)
    }

    async fn count_since(&self, since: DateTime<Utc>) -> Result<u64, RepositoryError> {
        Ok(self.snapshot().iter().filter(|e| e.timestamp >= since).count() as u64)
    }

    async fn count_by_category(&self) -> Result<Vec<(Category, u64)>, RepositoryError> {
        let mut counts: HashMap<Category, u64> = HashMap::new();
        for e in self.snapshot() {
            *counts.entry(e.effective_category()).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn count_by_day(&self, since: DateTime<Utc>) -> Result<Vec<(NaiveDate, u64)>, RepositoryError> {
        let mut counts: HashMap<NaiveDate, u64> = HashMap::new();
        for e in self.snapshot().iter().filter(|e| e.timestamp >= since) {
            *counts.entry(e.timestamp.date_naive()).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn count_by_day_and_category(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<(NaiveDate, Category, u64)>, RepositoryError> {
        let mut counts: HashMap<(NaiveDate, Category), u64> = HashMap::new();
        for e in self.snapshot().iter().filter(|e| e.timestamp >= since) {
            *counts
                .entry((e.timestamp.date_naive(), e.effective_category()))
                .or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|((day, category), count)| (day, category, count))
            .collect())
    }

    async fn distinct_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let mut categories: Vec<Category> =
            self.snapshot().iter().map(Exchange::effective_category).collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    async fn top_users(&self, limit: u32) -> Result<Vec<UserCount>, RepositoryError> {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for e in self.snapshot() {
            *counts.entry(e.user_id).or_default() += 1;
        }
        let mut users: Vec<UserCount> = counts
            .into_iter()
            .map(|(user_id, count)| UserCount { user_id, count })
            .collect();
        users.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.user_id.cmp(&b.user_id)));
        users.truncate(limit as usize);
        Ok(users)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Exchange>, RepositoryError> {
        let mut exchanges: Vec<Exchange> = self
            .snapshot()
            .into_iter()
            .filter(|e| e.user_id == user_id)
            .collect();
        exchanges.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(exchanges)
    }
}

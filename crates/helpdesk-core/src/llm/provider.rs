//! CompletionProvider trait definition.
//!
//! This is the abstraction every language-model backend implements.
//! Uses RPITIT for `complete`; see [`super::box_provider`] for the
//! object-safe wrapper used at runtime.

use helpdesk_types::error::ProviderError;
use helpdesk_types::llm::{CompletionRequest, CompletionResponse};

/// Trait for completion provider backends (OpenAI, OpenAI-compatible, ...).
///
/// Failures are reported as a typed [`ProviderError`]; callers decide how
/// to degrade. Implementations live in helpdesk-infra.
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, ProviderError>> + Send;
}

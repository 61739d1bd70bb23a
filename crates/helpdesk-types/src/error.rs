use thiserror::Error;

/// Errors from repository operations (used by trait definitions in helpdesk-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),
}

/// Errors from completion provider calls.
///
/// The responder treats every variant the same way (fall back to static
/// text); the variants only exist for logging.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("completion provider is not configured")]
    NotConfigured,

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limited")]
    RateLimited,

    #[error("provider overloaded: {0}")]
    Overloaded(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("provider returned an empty completion")]
    EmptyResponse,

    #[error("provider did not answer within {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

/// Errors from analytics queries.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("no exchanges recorded for user '{user_id}'")]
    NotFound { user_id: String },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors from handling a chat turn.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("validation error: {0}")]
    Validation(String),
}

//! Application error type mapping to HTTP status codes and a JSON error body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use helpdesk_types::error::{AnalyticsError, ChatError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Chat turn rejected before a reply was produced.
    Chat(ChatError),
    /// Analytics query errors.
    Analytics(AnalyticsError),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<AnalyticsError> for AppError {
    fn from(e: AnalyticsError) -> Self {
        AppError::Analytics(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Chat(ChatError::Validation(msg)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Analytics(AnalyticsError::NotFound { user_id }) => (
                StatusCode::NOT_FOUND,
                "USER_NOT_FOUND",
                format!("No conversations found for user '{user_id}'"),
            ),
            AppError::Analytics(e @ AnalyticsError::Repository(_)) => {
                tracing::error!(error = %e, "analytics query failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", e.to_string())
            }
        };

        let body = json!({
            "errors": [{
                "code": code,
                "message": message,
            }],
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpdesk_types::error::RepositoryError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                AppError::Chat(ChatError::Validation("empty".to_string())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::Analytics(AnalyticsError::NotFound {
                    user_id: "ivanov".to_string(),
                }),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Analytics(AnalyticsError::Repository(RepositoryError::Query(
                    "database is locked".to_string(),
                ))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}

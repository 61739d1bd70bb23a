//! Chat endpoint.
//!
//! POST /chat - Form-encoded `message` and optional `user_id`.

use axum::Json;
use axum::extract::{Form, State};
use chrono::SecondsFormat;
use tokio::task::JoinError;
use serde::{Deserialize, Serialize};

use helpdesk_core::responder::prompt::APOLOGY_MESSAGE;
use helpdesk_types::exchange::Category;

use crate::http::error::AppError;
use crate::state::AppState;

/// Form body of POST /chat.
#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Response body of POST /chat.
///
/// `error` is only present when something went wrong after (or instead of)
/// producing the reply.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POST /chat - Run one support turn.
///
/// The turn runs on its own task so a panic inside it is reported as an
/// apology with HTTP 200 rather than tearing down the connection.
pub async fn post_chat(
    State(state): State<AppState>,
    Form(form): Form<ChatForm>,
) -> Result<Json<ChatReply>, AppError> {
    let message = form.message.unwrap_or_default();
    let user_id = form.user_id;

    let chat_service = state.chat_service.clone();
    let joined =
        tokio::spawn(async move { chat_service.handle(&message, user_id.as_deref()).await }).await;

    let turn = match joined {
        Ok(result) => result?,
        Err(join_err) => {
            tracing::error!(error = %join_err, "chat turn task failed");
            return Ok(Json(failed_turn_reply(&join_err)));
        }
    };

    Ok(Json(ChatReply {
        timestamp: Some(turn.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)),
        category: Some(turn.category),
        error: turn.persistence_error().map(str::to_string),
        response: turn.response,
    }))
}

/// Apology returned when the turn task panicked or was cancelled.
fn failed_turn_reply(join_err: &JoinError) -> ChatReply {
    ChatReply {
        response: APOLOGY_MESSAGE.to_string(),
        timestamp: None,
        category: None,
        error: Some(join_err.to_string()),
    }
}

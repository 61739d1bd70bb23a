//! Axum router configuration with middleware.
//!
//! Routes: `POST /chat`, `GET /api/stats`, `GET /api/users/{user_id}/activity`,
//! `GET /api/trends`, `GET /health`.
//! Middleware: CORS, request tracing (verbose when debug is enabled).

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let debug = state.debug;

    let api_routes = Router::new()
        .route("/stats", get(handlers::stats::get_stats))
        .route(
            "/users/{user_id}/activity",
            get(handlers::stats::get_user_activity),
        )
        .route("/trends", get(handlers::stats::get_trends));

    let router = Router::new()
        .route("/chat", post(handlers::chat::post_chat))
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .with_state(state);

    if debug {
        router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(true))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
    } else {
        router.layer(TraceLayer::new_for_http())
    }
}

/// GET /health - Liveness check.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use helpdesk_types::config::HelpdeskConfig;
    use tower::ServiceExt;

    async fn test_app() -> (tempfile::TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::init(&HelpdeskConfig::default(), dir.path())
            .await
            .unwrap();
        (dir, build_router(state))
    }

    fn form_encode(s: &str) -> String {
        s.bytes()
            .map(|b| {
                if b.is_ascii_alphanumeric() {
                    (b as char).to_string()
                } else {
                    format!("%{b:02X}")
                }
            })
            .collect()
    }

    fn chat_request(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/chat")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (_dir, app) = test_app().await;
        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_chat_then_stats() {
        let (_dir, app) = test_app().await;

        let body = format!(
            "message={}&user_id=ivanov",
            form_encode("Не могу подключиться к VPN")
        );
        let response = app.clone().oneshot(chat_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let reply = json_body(response).await;
        assert_eq!(reply["category"], "connection");
        assert!(reply["response"].as_str().unwrap().contains("VPN"));
        assert!(reply["timestamp"].is_string());
        assert!(reply.get("error").is_none());

        let response = app.oneshot(get("/api/stats")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let stats = json_body(response).await;
        assert_eq!(stats["total_conversations"], 1);
        assert_eq!(stats["recent_conversations"], 1);
        assert_eq!(stats["categories"]["connection"], 1);
        assert_eq!(stats["daily_stats"].as_array().unwrap().len(), 7);
        assert_eq!(stats["top_users"][0]["user_id"], "ivanov");
        assert_eq!(stats["avg_response_time"], 2.5);
        assert_eq!(stats["sla_metrics"]["sla_1h"], 85.5);
    }

    #[tokio::test]
    async fn test_chat_blank_message_is_422() {
        let (_dir, app) = test_app().await;

        let response = app
            .clone()
            .oneshot(chat_request("message=%20%20".to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["errors"][0]["code"], "VALIDATION_ERROR");

        let response = app
            .oneshot(chat_request("user_id=ivanov".to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_chat_defaults_to_anonymous() {
        let (_dir, app) = test_app().await;

        let body = format!("message={}", form_encode("Расскажи анекдот"));
        let response = app.clone().oneshot(chat_request(body)).await.unwrap();
        let reply = json_body(response).await;
        assert_eq!(reply["category"], "general");
        assert!(
            reply["response"]
                .as_str()
                .unwrap()
                .contains("it-support@company.com")
        );

        let response = app
            .oneshot(get("/api/users/anonymous/activity"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let activity = json_body(response).await;
        assert_eq!(activity["total_conversations"], 1);
        assert_eq!(activity["categories"]["general"], 1);
        assert_eq!(activity["recent_conversations"][0]["message"], "Расскажи анекдот");
    }

    #[tokio::test]
    async fn test_unknown_user_activity_is_404() {
        let (_dir, app) = test_app().await;
        let response = app.oneshot(get("/api/users/nobody/activity")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["errors"][0]["code"], "USER_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_trends_window_is_clamped() {
        let (_dir, app) = test_app().await;

        let body = format!("message={}", form_encode("Забыл пароль"));
        app.clone().oneshot(chat_request(body)).await.unwrap();

        let response = app.clone().oneshot(get("/api/trends?days=1000")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let trends = json_body(response).await;
        assert_eq!(trends["password"].as_array().unwrap().len(), 365);

        let response = app.oneshot(get("/api/trends")).await.unwrap();
        let trends = json_body(response).await;
        let series = trends["password"].as_array().unwrap();
        assert_eq!(series.len(), 30);
        assert_eq!(series.last().unwrap()["count"], 1);
    }
}

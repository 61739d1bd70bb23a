//! HTTP/REST API layer for the helpdesk assistant.
//!
//! Axum-based API: the chat endpoint, statistics endpoints and a health
//! check, with CORS and request tracing.

pub mod error;
pub mod handlers;
pub mod router;

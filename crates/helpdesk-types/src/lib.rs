//! Shared domain types for the helpdesk assistant.
//!
//! Exchanges, categories, completion request/response shapes, statistics
//! reports, configuration and error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror, secrecy.

pub mod config;
pub mod error;
pub mod exchange;
pub mod llm;
pub mod stats;

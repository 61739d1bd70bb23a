//! Infrastructure layer for the helpdesk assistant.
//!
//! Contains implementations of the traits defined in `helpdesk-core`:
//! SQLite exchange storage, the OpenAI-compatible completion provider, and
//! the configuration loader.

pub mod config;
pub mod llm;
pub mod sqlite;

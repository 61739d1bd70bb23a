//! Business logic and repository trait definitions for the helpdesk.
//!
//! This crate defines the "ports" (repository and provider traits) that the
//! infrastructure layer implements. It depends only on `helpdesk-types` --
//! never on `helpdesk-infra` or any database/IO crate.

pub mod analytics;
pub mod chat;
pub mod classifier;
pub mod knowledge;
pub mod llm;
pub mod responder;

#[cfg(test)]
pub(crate) mod test_support;

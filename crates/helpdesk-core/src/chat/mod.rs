//! Chat turn handling and exchange persistence abstractions.
//!
//! This module defines the `ExchangeRepository` trait that the
//! infrastructure layer implements, and the `ChatService` that drives a
//! single support turn.

pub mod repository;
pub mod service;

//! Observability setup for the helpdesk assistant.
//!
//! Installs the global tracing subscriber (structured `fmt` output with an
//! `EnvFilter`) and, optionally, an OpenTelemetry bridge with a stdout span
//! exporter.

pub mod tracing_setup;

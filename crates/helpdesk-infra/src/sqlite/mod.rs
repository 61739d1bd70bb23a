//! SQLite storage layer.
//!
//! The exchange repository backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod exchange;
pub mod pool;

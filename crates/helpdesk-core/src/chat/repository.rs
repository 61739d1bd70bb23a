//! ExchangeRepository trait definition.
//!
//! The conversation store contract: one insert per chat turn plus the
//! read queries the analytics aggregator needs. Exchanges are never
//! updated or deleted.

use chrono::{DateTime, NaiveDate, Utc};
use helpdesk_types::error::RepositoryError;
use helpdesk_types::exchange::{Category, Exchange, NewExchange};
use helpdesk_types::stats::UserCount;

/// Repository trait for exchange persistence and aggregate queries.
///
/// Implementations live in helpdesk-infra (e.g., `SqliteExchangeRepository`).
/// Wherever a category is grouped or filtered, a missing category counts
/// as [`Category::General`].
pub trait ExchangeRepository: Send + Sync {
    /// Persist a new exchange and return it with its store-assigned id.
    fn record(
        &self,
        exchange: &NewExchange,
    ) -> impl std::future::Future<Output = Result<Exchange, RepositoryError>> + Send;

    /// Count all exchanges.
    fn count_all(&self) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Count exchanges with `timestamp >= since`.
    fn count_since(
        &self,
        since: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Exchange counts grouped by category, over all exchanges.
    fn count_by_category(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<(Category, u64)>, RepositoryError>> + Send;

    /// Exchange counts per UTC calendar day for `timestamp >= since`.
    ///
    /// Days without exchanges are omitted; order is unspecified.
    fn count_by_day(
        &self,
        since: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Vec<(NaiveDate, u64)>, RepositoryError>> + Send;

    /// Exchange counts per (UTC day, category) for `timestamp >= since`.
    fn count_by_day_and_category(
        &self,
        since: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Vec<(NaiveDate, Category, u64)>, RepositoryError>> + Send;

    /// Every category that occurs in the store.
    fn distinct_categories(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Category>, RepositoryError>> + Send;

    /// Users with the most exchanges, highest count first.
    ///
    /// Ties are returned in store-defined order.
    fn top_users(
        &self,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<UserCount>, RepositoryError>> + Send;

    /// All exchanges of one user, most recent first.
    fn list_by_user(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Exchange>, RepositoryError>> + Send;
}

//! SQLite exchange repository implementation.
//!
//! Implements `ExchangeRepository` from `helpdesk-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, inserts on the writer
//! and every aggregate on the reader.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use sqlx::Row;

use helpdesk_core::chat::repository::ExchangeRepository;
use helpdesk_types::error::RepositoryError;
use helpdesk_types::exchange::{Category, Exchange, NewExchange};
use helpdesk_types::stats::UserCount;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ExchangeRepository`.
#[derive(Clone)]
pub struct SqliteExchangeRepository {
    pool: DatabasePool,
}

impl SqliteExchangeRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct ExchangeRow {
    id: i64,
    user_id: String,
    user_message: String,
    bot_response: String,
    timestamp: String,
    category: Option<String>,
}

impl ExchangeRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            user_message: row.try_get("user_message")?,
            bot_response: row.try_get("bot_response")?,
            timestamp: row.try_get("timestamp")?,
            category: row.try_get("category")?,
        })
    }

    fn into_exchange(self) -> Result<Exchange, RepositoryError> {
        let timestamp = parse_datetime(&self.timestamp)?;
        let category = self.category.as_deref().map(parse_category).transpose()?;

        Ok(Exchange {
            id: self.id,
            user_id: self.user_id,
            user_message: self.user_message,
            bot_response: self.bot_response,
            timestamp,
            category,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Fixed-width UTC text, so `timestamp >= ?` compares chronologically.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_category(s: &str) -> Result<Category, RepositoryError> {
    s.parse().map_err(RepositoryError::Query)
}

fn parse_day(s: &str) -> Result<NaiveDate, RepositoryError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| RepositoryError::Query(format!("invalid day: {e}")))
}

fn query_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

fn to_count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or(0)
}

// ---------------------------------------------------------------------------
// ExchangeRepository implementation
// ---------------------------------------------------------------------------

impl ExchangeRepository for SqliteExchangeRepository {
    async fn record(&self, exchange: &NewExchange) -> Result<Exchange, RepositoryError> {
        let result = sqlx::query(
            r#"INSERT INTO exchanges (user_id, user_message, bot_response, timestamp, category)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(&exchange.user_id)
        .bind(&exchange.user_message)
        .bind(&exchange.bot_response)
        .bind(format_datetime(&exchange.timestamp))
        .bind(exchange.category.map(|c| c.as_str()))
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;

        Ok(Exchange {
            id: result.last_insert_rowid(),
            user_id: exchange.user_id.clone(),
            user_message: exchange.user_message.clone(),
            bot_response: exchange.bot_response.clone(),
            timestamp: exchange.timestamp,
            category: exchange.category,
        })
    }

    async fn count_all(&self) -> Result<u64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM exchanges")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(query_err)?;
        let count: i64 = row.try_get("count").map_err(query_err)?;
        Ok(to_count(count))
    }

    async fn count_since(&self, since: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM exchanges WHERE timestamp >= ?")
            .bind(format_datetime(&since))
            .fetch_one(&self.pool.reader)
            .await
            .map_err(query_err)?;
        let count: i64 = row.try_get("count").map_err(query_err)?;
        Ok(to_count(count))
    }

    async fn count_by_category(&self) -> Result<Vec<(Category, u64)>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT COALESCE(category, 'general') AS category, COUNT(*) AS count
               FROM exchanges
               GROUP BY COALESCE(category, 'general')"#,
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        let mut counts = Vec::with_capacity(rows.len());
        for row in &rows {
            let category: String = row.try_get("category").map_err(query_err)?;
            let count: i64 = row.try_get("count").map_err(query_err)?;
            counts.push((parse_category(&category)?, to_count(count)));
        }
        Ok(counts)
    }

    async fn count_by_day(&self, since: DateTime<Utc>) -> Result<Vec<(NaiveDate, u64)>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT substr(timestamp, 1, 10) AS day, COUNT(*) AS count
               FROM exchanges
               WHERE timestamp >= ?
               GROUP BY day"#,
        )
        .bind(format_datetime(&since))
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        let mut counts = Vec::with_capacity(rows.len());
        for row in &rows {
            let day: String = row.try_get("day").map_err(query_err)?;
            let count: i64 = row.try_get("count").map_err(query_err)?;
            counts.push((parse_day(&day)?, to_count(count)));
        }
        Ok(counts)
    }

    async fn count_by_day_and_category(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<(NaiveDate, Category, u64)>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT substr(timestamp, 1, 10) AS day,
                      COALESCE(category, 'general') AS category,
                      COUNT(*) AS count
               FROM exchanges
               WHERE timestamp >= ?
               GROUP BY day, COALESCE(category, 'general')"#,
        )
        .bind(format_datetime(&since))
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        let mut counts = Vec::with_capacity(rows.len());
        for row in &rows {
            let day: String = row.try_get("day").map_err(query_err)?;
            let category: String = row.try_get("category").map_err(query_err)?;
            let count: i64 = row.try_get("count").map_err(query_err)?;
            counts.push((parse_day(&day)?, parse_category(&category)?, to_count(count)));
        }
        Ok(counts)
    }

    async fn distinct_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT DISTINCT COALESCE(category, 'general') AS category FROM exchanges ORDER BY category",
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        rows.iter()
            .map(|row| {
                let category: String = row.try_get("category").map_err(query_err)?;
                parse_category(&category)
            })
            .collect()
    }

    async fn top_users(&self, limit: u32) -> Result<Vec<UserCount>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT user_id, COUNT(*) AS count
               FROM exchanges
               GROUP BY user_id
               ORDER BY count DESC, user_id
               LIMIT ?"#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        let mut users = Vec::with_capacity(rows.len());
        for row in &rows {
            let user_id: String = row.try_get("user_id").map_err(query_err)?;
            let count: i64 = row.try_get("count").map_err(query_err)?;
            users.push(UserCount {
                user_id,
                count: to_count(count),
            });
        }
        Ok(users)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Exchange>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM exchanges WHERE user_id = ? ORDER BY timestamp DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        let mut exchanges = Vec::with_capacity(rows.len());
        for row in &rows {
            let exchange_row = ExchangeRow::from_row(row).map_err(query_err)?;
            exchanges.push(exchange_row.into_exchange()?);
        }
        Ok(exchanges)
    }
}

//! Usage analytics over the conversation store.
//!
//! Every report is computed fresh from repository queries; nothing is
//! cached. Day buckets are UTC calendar days, and windows always include
//! the current day. The `*_at` variants take the reference time explicitly.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::debug;

use helpdesk_types::error::AnalyticsError;
use helpdesk_types::exchange::{Category, Exchange};
use helpdesk_types::stats::{
    CategoryTrends, DailyCount, PLACEHOLDER_AVG_RESPONSE_TIME, RecentExchange, SlaMetrics,
    StatisticsReport, UserActivity,
};

use crate::chat::repository::ExchangeRepository;

/// Days covered by `daily_stats` in the summary report.
pub const DAILY_STATS_DAYS: u32 = 7;

/// Users listed in `top_users`.
pub const TOP_USERS_LIMIT: u32 = 10;

/// Default window for category trends.
pub const DEFAULT_TREND_DAYS: u32 = 30;

/// Longest day window any report covers. Larger requests are clamped.
pub const MAX_TREND_DAYS: u32 = 365;

/// Default number of recent exchanges in a user activity report.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Characters of a user message kept in activity reports.
const MESSAGE_PREVIEW_CHARS: usize = 100;

pub struct AnalyticsService<R: ExchangeRepository> {
    repo: R,
    recent_limit: usize,
}

impl<R: ExchangeRepository> AnalyticsService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }

    /// Override how many recent exchanges `user_activity` returns.
    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    pub async fn summarize(&self) -> Result<StatisticsReport, AnalyticsError> {
        self.summarize_at(Utc::now()).await
    }

    /// Build the summary report as seen at `now`.
    pub async fn summarize_at(&self, now: DateTime<Utc>) -> Result<StatisticsReport, AnalyticsError> {
        let total_conversations = self.repo.count_all().await?;
        let recent_conversations = self.repo.count_since(now - Duration::hours(24)).await?;
        let week_conversations = self.repo.count_since(now - Duration::days(7)).await?;

        let mut categories = BTreeMap::new();
        for (category, count) in self.repo.count_by_category().await? {
            *categories.entry(category).or_insert(0) += count;
        }

        let daily_stats = self.daily_stats_at(now, DAILY_STATS_DAYS).await?;
        let top_users = self.repo.top_users(TOP_USERS_LIMIT).await?;

        debug!(total_conversations, recent_conversations, "statistics computed");

        Ok(StatisticsReport {
            total_conversations,
            recent_conversations,
            week_conversations,
            categories,
            daily_stats,
            top_users,
            avg_response_time: PLACEHOLDER_AVG_RESPONSE_TIME,
            sla_metrics: SlaMetrics::placeholder(),
        })
    }

    /// Exchange counts for the `days` calendar days ending today,
    /// oldest first, with zero-filled gaps. `days` is capped at
    /// [`MAX_TREND_DAYS`].
    pub async fn daily_stats_at(
        &self,
        now: DateTime<Utc>,
        days: u32,
    ) -> Result<Vec<DailyCount>, AnalyticsError> {
        let window = day_window(now, days);
        let Some(since) = window_start(&window) else {
            return Ok(Vec::new());
        };

        let counts: HashMap<NaiveDate, u64> = self.repo.count_by_day(since).await?.into_iter().collect();
        Ok(fill_series(&window, |day| counts.get(&day).copied()))
    }

    /// Activity report for one user.
    ///
    /// Returns [`AnalyticsError::NotFound`] when the user has no exchanges.
    pub async fn user_activity(&self, user_id: &str) -> Result<UserActivity, AnalyticsError> {
        let exchanges = self.repo.list_by_user(user_id).await?;

        let timestamps = exchanges.iter().map(|e| e.timestamp);
        let (Some(first_contact), Some(last_contact)) = (timestamps.clone().min(), timestamps.max())
        else {
            return Err(AnalyticsError::NotFound {
                user_id: user_id.to_string(),
            });
        };

        let mut categories = BTreeMap::new();
        for exchange in &exchanges {
            *categories.entry(exchange.effective_category()).or_insert(0) += 1;
        }

        let recent_conversations = exchanges
            .iter()
            .take(self.recent_limit)
            .map(recent_entry)
            .collect();

        Ok(UserActivity {
            user_id: user_id.to_string(),
            total_conversations: exchanges.len() as u64,
            categories,
            recent_conversations,
            first_contact,
            last_contact,
        })
    }

    pub async fn category_trends(&self, days: u32) -> Result<CategoryTrends, AnalyticsError> {
        self.category_trends_at(Utc::now(), days).await
    }

    /// One daily series per category present in the store, all covering
    /// the same window of at most [`MAX_TREND_DAYS`] days.
    pub async fn category_trends_at(
        &self,
        now: DateTime<Utc>,
        days: u32,
    ) -> Result<CategoryTrends, AnalyticsError> {
        let window = day_window(now, days);
        let categories = self.repo.distinct_categories().await?;

        let counts: HashMap<(NaiveDate, Category), u64> = match window_start(&window) {
            Some(since) => self
                .repo
                .count_by_day_and_category(since)
                .await?
                .into_iter()
                .map(|(day, category, count)| ((day, category), count))
                .collect(),
            None => HashMap::new(),
        };

        Ok(categories
            .into_iter()
            .map(|category| {
                let series = fill_series(&window, |day| counts.get(&(day, category)).copied());
                (category, series)
            })
            .collect())
    }
}

/// The `days` calendar days ending on `now`'s UTC date, oldest first.
fn day_window(now: DateTime<Utc>, days: u32) -> Vec<NaiveDate> {
    let today = now.date_naive();
    (0..i64::from(days.min(MAX_TREND_DAYS)))
        .rev()
        .map(|offset| today - Duration::days(offset))
        .collect()
}

/// Midnight UTC of the first day in the window.
fn window_start(window: &[NaiveDate]) -> Option<DateTime<Utc>> {
    window
        .first()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

fn fill_series(window: &[NaiveDate], count_for: impl Fn(NaiveDate) -> Option<u64>) -> Vec<DailyCount> {
    window
        .iter()
        .map(|&date| DailyCount {
            date,
            count: count_for(date).unwrap_or(0),
        })
        .collect()
}

fn recent_entry(exchange: &Exchange) -> RecentExchange {
    RecentExchange {
        id: exchange.id,
        message: preview(&exchange.user_message),
        category: exchange.effective_category(),
        timestamp: exchange.timestamp,
    }
}

/// First 100 characters of `message`, with `...` appended when cut.
fn preview(message: &str) -> String {
    match message.char_indices().nth(MESSAGE_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &message[..cut]),
        None => message.to_string(),
    }
}

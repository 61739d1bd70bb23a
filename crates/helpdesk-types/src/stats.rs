//! Statistics report types returned by the analytics aggregator.
//!
//! Field names are part of the JSON contract of `GET /api/stats` and the
//! per-user / trends endpoints.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::exchange::Category;

/// Placeholder average response time in seconds. Not measured.
pub const PLACEHOLDER_AVG_RESPONSE_TIME: f64 = 2.5;

/// Count of exchanges in one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    #[serde(with = "day_format")]
    pub date: NaiveDate,
    pub count: u64,
}

/// Exchange count for a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCount {
    pub user_id: String,
    pub count: u64,
}

/// Service-level figures. Placeholder constants until real SLA
/// instrumentation exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlaMetrics {
    pub sla_1h: f64,
    pub sla_4h: f64,
    pub sla_24h: f64,
    pub satisfaction_score: f64,
}

impl SlaMetrics {
    pub fn placeholder() -> Self {
        Self {
            sla_1h: 85.5,
            sla_4h: 95.2,
            sla_24h: 99.1,
            satisfaction_score: 4.3,
        }
    }
}

/// Aggregate usage report for `GET /api/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub total_conversations: u64,
    pub recent_conversations: u64,
    pub week_conversations: u64,
    pub categories: BTreeMap<Category, u64>,
    pub daily_stats: Vec<DailyCount>,
    pub top_users: Vec<UserCount>,
    pub avg_response_time: f64,
    pub sla_metrics: SlaMetrics,
}

/// One entry of a user's recent exchange list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentExchange {
    pub id: i64,
    /// User message, truncated to 100 characters with a `...` marker.
    pub message: String,
    pub category: Category,
    pub timestamp: DateTime<Utc>,
}

/// Activity report for a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserActivity {
    pub user_id: String,
    pub total_conversations: u64,
    pub categories: BTreeMap<Category, u64>,
    /// Most recent first, at most 10 entries.
    pub recent_conversations: Vec<RecentExchange>,
    pub first_contact: DateTime<Utc>,
    pub last_contact: DateTime<Utc>,
}

/// Per-category daily series over a trailing window.
pub type CategoryTrends = BTreeMap<Category, Vec<DailyCount>>;

/// `YYYY-MM-DD` serialization for calendar days.
mod day_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

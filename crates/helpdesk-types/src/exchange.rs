//! Exchange and category types for the helpdesk assistant.
//!
//! An `Exchange` is one recorded user-message / bot-response pair. The
//! `Category` tag is produced by the classifier and stored alongside it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// User id recorded when the caller does not identify themselves.
pub const ANONYMOUS_USER: &str = "anonymous";

/// Support topic of a user message.
///
/// The first five variants have a knowledge-base entry; `General` is the
/// fallback bucket and also stands in for a missing category in storage.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Password,
    Access,
    Documents,
    Connection,
    Software,
    #[default]
    General,
}

impl Category {
    /// Every category, in classifier priority order with `General` last.
    pub const ALL: [Category; 6] = [
        Category::Password,
        Category::Access,
        Category::Documents,
        Category::Connection,
        Category::Software,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Password => "password",
            Category::Access => "access",
            Category::Documents => "documents",
            Category::Connection => "connection",
            Category::Software => "software",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "password" => Ok(Category::Password),
            "access" => Ok(Category::Access),
            "documents" => Ok(Category::Documents),
            "connection" => Ok(Category::Connection),
            "software" => Ok(Category::Software),
            "general" => Ok(Category::General),
            other => Err(format!("invalid category: '{other}'")),
        }
    }
}


/// Insert payload for a new exchange. The store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExchange {
    pub user_id: String,
    pub user_message: String,
    pub bot_response: String,
    pub timestamp: DateTime<Utc>,
    pub category: Option<Category>,
}

/// A stored chat turn. Immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    pub id: i64,
    pub user_id: String,
    pub user_message: String,
    pub bot_response: String,
    pub timestamp: DateTime<Utc>,
    pub category: Option<Category>,
}

impl Exchange {
    /// Category used by aggregations: a missing tag counts as `General`.
    pub fn effective_category(&self) -> Category {
        self.category.unwrap_or_default()
    }
}

/// Normalize an optional caller-supplied user id.
///
/// Missing or blank ids collapse to [`ANONYMOUS_USER`].
pub fn normalize_user_id(user_id: Option<&str>) -> String {
    match user_id.map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => ANONYMOUS_USER.to_string(),
    }
}

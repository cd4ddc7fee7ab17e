//! Watch list entries and their aggregate statistics.
//!
//! A [`WatchedMovie`] is a snapshot of a [`MovieDetail`] taken at the moment the
//! user rated and added it, so the list can be rendered without refetching.

use super::movie::MovieDetail;
use serde::{Deserialize, Serialize};

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// A title the user has watched and rated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedMovie {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster: String,
    /// IMDb rating at the time of adding, `0.0` when the API reported none.
    pub imdb_rating: f64,
    /// Runtime in whole minutes, `0` when unknown.
    pub runtime_minutes: u32,
    /// The user's own rating, 1 to 10.
    pub user_rating: u8,
    /// How many times the rating was changed before the title was added.
    #[serde(default)]
    pub rating_decisions: u32,
    /// Unix timestamp of when the entry was added.
    #[serde(default)]
    pub added_at: i64,
}

impl WatchedMovie {
    /// Builds a watch list entry from a fetched detail record.
    ///
    /// # Examples
    ///
    /// ```
    /// use movielist::domain::{MovieDetail, WatchedMovie};
    ///
    /// let detail = MovieDetail {
    ///     imdb_id: "tt0133093".to_string(),
    ///     title: "The Matrix".to_string(),
    ///     runtime: "136 min".to_string(),
    ///     imdb_rating: "8.7".to_string(),
    ///     ..Default::default()
    /// };
    /// let watched = WatchedMovie::from_detail(&detail, 9, 2);
    /// assert_eq!(watched.runtime_minutes, 136);
    /// assert_eq!(watched.user_rating, 9);
    /// ```
    #[must_use]
    pub fn from_detail(detail: &MovieDetail, user_rating: u8, rating_decisions: u32) -> Self {
        Self {
            imdb_id: detail.imdb_id.clone(),
            title: detail.title.clone(),
            year: detail.year.clone(),
            poster: detail.poster.clone(),
            imdb_rating: parse_rating(&detail.imdb_rating),
            runtime_minutes: parse_runtime_minutes(&detail.runtime),
            user_rating,
            rating_decisions,
            added_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Returns a short human-readable age of the entry, e.g. `"3d ago"`.
    #[must_use]
    pub fn added_ago(&self) -> String {
        let diff = chrono::Utc::now().timestamp() - self.added_at;

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            format!("{}m ago", diff / SECONDS_PER_MINUTE)
        } else if diff < SECONDS_PER_DAY {
            format!("{}h ago", diff / SECONDS_PER_HOUR)
        } else {
            format!("{}d ago", diff / SECONDS_PER_DAY)
        }
    }
}

/// Aggregate figures shown above the watch list.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_imdb_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime: f64,
}

impl WatchedSummary {
    /// Computes the summary of a watch list. Averages of an empty list are zero.
    #[must_use]
    pub fn of(watched: &[WatchedMovie]) -> Self {
        Self {
            count: watched.len(),
            avg_imdb_rating: average(watched.iter().map(|m| m.imdb_rating)),
            avg_user_rating: average(watched.iter().map(|m| f64::from(m.user_rating))),
            avg_runtime: average(watched.iter().map(|m| f64::from(m.runtime_minutes))),
        }
    }
}

fn average(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let len = values.len();
    if len == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let divisor = len as f64;
    values.sum::<f64>() / divisor
}

/// Extracts the leading minute count from an API runtime string.
///
/// `"148 min"` yields `148`; `"N/A"` and empty strings yield `0`.
#[must_use]
pub fn parse_runtime_minutes(runtime: &str) -> u32 {
    runtime
        .split_whitespace()
        .next()
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

/// Parses an API rating string such as `"7.9"`, yielding `0.0` for `"N/A"`.
#[must_use]
pub fn parse_rating(rating: &str) -> f64 {
    rating
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|r| r.is_finite())
        .unwrap_or(0.0)
}

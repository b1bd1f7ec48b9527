//! Community feed parameters: sort modes, time ranges, and pagination bounds.
//!
//! This module lives in `core` (zero internal deps) so the same enums and
//! cutoff math are shared by the repository layer and the HTTP handlers.

use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::types::Timestamp;

/// Default number of feed items per page.
pub const DEFAULT_FEED_LIMIT: i64 = 10;

/// Maximum number of feed items per page.
pub const MAX_FEED_LIMIT: i64 = 50;

/// Number of days a like counts toward the trending sort.
pub const TRENDING_WINDOW_DAYS: i64 = 7;

/// Sort order for the community feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedSort {
    /// Creation time descending.
    #[default]
    Newest,
    /// Likes within the last 7 days descending, then creation time.
    Trending,
    /// All-time likes descending, then view count, then creation time.
    Popular,
}

/// Time-range filter for the community feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedTimeRange {
    Today,
    Week,
    Month,
    /// No time restriction.
    #[default]
    All,
}

impl FeedTimeRange {
    /// Compute the inclusive lower bound for `created_at`, relative to `now`.
    ///
    /// Returns `None` for [`FeedTimeRange::All`].
    pub fn cutoff(self, now: Timestamp) -> Option<Timestamp> {
        match self {
            FeedTimeRange::Today => Some(
                now.date_naive()
                    .and_hms_opt(0, 0, 0)
                    .expect("midnight is always a valid time")
                    .and_utc(),
            ),
            FeedTimeRange::Week => Some(now - Duration::days(7)),
            FeedTimeRange::Month => Some(now - Duration::days(30)),
            FeedTimeRange::All => None,
        }
    }
}

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Pagination invariant shared by every paginated listing.
pub fn has_more(offset: i64, limit: i64, total: i64) -> bool {
    offset + limit < total
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    // -- cutoff --------------------------------------------------------------

    #[test]
    fn today_cutoff_is_start_of_day() {
        let now = at(2026, 3, 14, 15, 9);
        assert_eq!(
            FeedTimeRange::Today.cutoff(now),
            Some(at(2026, 3, 14, 0, 0))
        );
    }

    #[test]
    fn week_cutoff_is_seven_days_back() {
        let now = at(2026, 3, 14, 15, 9);
        assert_eq!(FeedTimeRange::Week.cutoff(now), Some(at(2026, 3, 7, 15, 9)));
    }

    #[test]
    fn month_cutoff_is_thirty_days_back() {
        let now = at(2026, 3, 31, 12, 0);
        assert_eq!(
            FeedTimeRange::Month.cutoff(now),
            Some(at(2026, 3, 1, 12, 0))
        );
    }

    #[test]
    fn all_has_no_cutoff() {
        assert_eq!(FeedTimeRange::All.cutoff(Utc::now()), None);
    }

    // -- clamps --------------------------------------------------------------

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, DEFAULT_FEED_LIMIT, MAX_FEED_LIMIT), 10);
    }

    #[test]
    fn clamp_limit_respects_max() {
        assert_eq!(clamp_limit(Some(500), DEFAULT_FEED_LIMIT, MAX_FEED_LIMIT), 50);
    }

    #[test]
    fn clamp_limit_floors_at_one() {
        assert_eq!(clamp_limit(Some(0), DEFAULT_FEED_LIMIT, MAX_FEED_LIMIT), 1);
        assert_eq!(clamp_limit(Some(-3), DEFAULT_FEED_LIMIT, MAX_FEED_LIMIT), 1);
    }

    #[test]
    fn clamp_offset_floors_at_zero() {
        assert_eq!(clamp_offset(Some(-10)), 0);
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(20)), 20);
    }

    // -- has_more ------------------------------------------------------------

    #[test]
    fn has_more_matches_pagination_invariant() {
        assert!(has_more(0, 10, 11));
        assert!(!has_more(0, 10, 10));
        assert!(!has_more(10, 10, 15));
        assert!(has_more(10, 10, 21));
    }
}

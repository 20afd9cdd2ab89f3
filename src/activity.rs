// Activity classification for tracked items.
// Buckets the last-updated time of a PR or issue into a recency level.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::api::Item;

/// How recently an item saw activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::None => "none",
            Level::Low => "low",
            Level::Medium => "medium",
            Level::High => "high",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Cut-off instants relative to a fixed "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub one_week_ago: DateTime<Utc>,
    pub two_weeks_ago: DateTime<Utc>,
    pub one_month_ago: DateTime<Utc>,
}

impl Thresholds {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            one_week_ago: now - Duration::days(7),
            two_weeks_ago: now - Duration::days(14),
            one_month_ago: now - Duration::days(30),
        }
    }

    /// Later checks override earlier ones, so the nearest threshold the
    /// timestamp is after decides the level.
    pub fn classify(&self, timestamp: DateTime<Utc>) -> Level {
        let mut level = Level::None;
        if timestamp > self.one_month_ago {
            level = Level::Low;
        }
        if timestamp > self.two_weeks_ago {
            level = Level::Medium;
        }
        if timestamp > self.one_week_ago {
            level = Level::High;
        }
        level
    }
}

pub fn classify_at(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> Level {
    Thresholds::at(now).classify(timestamp)
}

pub fn classify(timestamp: DateTime<Utc>) -> Level {
    classify_at(timestamp, Utc::now())
}

/// Parse an ISO-8601 timestamp with an explicit offset (`2020-02-11T09:30:00+01:00`).
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%z"))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Unparseable timestamps classify as [`Level::None`].
pub fn classify_str(text: &str, now: DateTime<Utc>) -> Level {
    parse_timestamp(text).map_or(Level::None, |ts| classify_at(ts, now))
}

pub fn classify_item(item: &Item, now: DateTime<Utc>) -> Level {
    item.last_updated
        .as_deref()
        .map_or(Level::None, |ts| classify_str(ts, now))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_levels_by_age() {
        let now = now();
        assert_eq!(classify_at(now - Duration::days(1), now), Level::High);
        assert_eq!(classify_at(now - Duration::days(10), now), Level::Medium);
        assert_eq!(classify_at(now - Duration::days(20), now), Level::Low);
        assert_eq!(classify_at(now - Duration::days(45), now), Level::None);
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        let now = now();
        assert_eq!(classify_at(now - Duration::days(7), now), Level::Medium);
        assert_eq!(classify_at(now - Duration::days(14), now), Level::Low);
        assert_eq!(classify_at(now - Duration::days(30), now), Level::None);
    }

    #[test]
    fn test_future_timestamps_are_high() {
        let now = now();
        assert_eq!(classify_at(now + Duration::days(3), now), Level::High);
    }

    #[test]
    fn test_classify_str_with_offset() {
        let now = now();
        assert_eq!(classify_str("2020-02-29T13:00:00+01:00", now), Level::High);
        assert_eq!(classify_str("2020-02-20T08:15:00Z", now), Level::Medium);
        assert_eq!(classify_str("2020-02-10T08:15:00-0500", now), Level::Low);
    }

    #[test]
    fn test_malformed_timestamps_are_none() {
        let now = now();
        assert_eq!(classify_str("", now), Level::None);
        assert_eq!(classify_str("yesterday", now), Level::None);
        assert_eq!(classify_str("2020-13-45T99:00:00Z", now), Level::None);
    }

    #[test]
    fn test_classify_item() {
        let now = now();
        let mut item = Item {
            link: "#".to_string(),
            title: "Make channels faster".to_string(),
            by: "stjepang".to_string(),
            last_updated: None,
            labels: Vec::new(),
        };
        assert_eq!(classify_item(&item, now), Level::None);

        item.last_updated = Some("2020-02-28T12:00:00+00:00".to_string());
        assert_eq!(classify_item(&item, now), Level::High);
    }

    #[test]
    fn test_level_ordering_and_names() {
        assert!(Level::High > Level::Medium);
        assert!(Level::Low > Level::None);
        assert_eq!(Level::Medium.to_string(), "medium");
        assert_eq!(serde_json::to_string(&Level::Low).unwrap(), r#""low""#);
    }
}

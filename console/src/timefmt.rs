//! Human-relative timestamp formatting.
//!
//! Security log entries are displayed relative to the server's clock, not
//! the local one, so the reference "now" always comes from the payload that
//! delivered the entries.

use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;

/// Formats `t_sec` relative to `now_sec` (both seconds since the Unix
/// epoch).
///
/// Recent times render as "just now" / "N minutes ago" / "N hours ago" /
/// "N days ago"; anything older than a week (or in the future, which only
/// happens with a skewed server clock) renders as an absolute UTC date.
#[must_use]
pub fn long_format(now_sec: i64, t_sec: i64) -> String {
    let delta = now_sec - t_sec;
    if delta < 0 {
        return absolute(t_sec);
    }
    if delta < MINUTE {
        return "just now".to_string();
    }
    if delta < HOUR {
        return plural(delta / MINUTE, "minute");
    }
    if delta < DAY {
        return plural(delta / HOUR, "hour");
    }
    if delta < WEEK {
        return plural(delta / DAY, "day");
    }
    absolute(t_sec)
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

fn absolute(t_sec: i64) -> String {
    match DateTime::<Utc>::from_timestamp(t_sec, 0) {
        Some(t) => t.format("%Y-%m-%d %H:%M").to_string(),
        None => format!("@{t_sec}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn sub_minute_is_just_now() {
        assert_eq!(long_format(NOW, NOW), "just now");
        assert_eq!(long_format(NOW, NOW - 59), "just now");
    }

    #[test]
    fn minutes_with_singular() {
        assert_eq!(long_format(NOW, NOW - 60), "1 minute ago");
        assert_eq!(long_format(NOW, NOW - 45 * 60), "45 minutes ago");
    }

    #[test]
    fn hours_and_days() {
        assert_eq!(long_format(NOW, NOW - HOUR), "1 hour ago");
        assert_eq!(long_format(NOW, NOW - 23 * HOUR), "23 hours ago");
        assert_eq!(long_format(NOW, NOW - DAY), "1 day ago");
        assert_eq!(long_format(NOW, NOW - 6 * DAY), "6 days ago");
    }

    #[test]
    fn older_than_a_week_is_absolute() {
        let s = long_format(NOW, NOW - 8 * DAY);
        assert!(s.contains('-'), "expected absolute date, got {s}");
    }

    #[test]
    fn future_times_are_absolute() {
        let s = long_format(NOW, NOW + HOUR);
        assert!(s.contains('-'), "expected absolute date, got {s}");
    }
}

//! Human-readable relative timestamps.

use chrono::{DateTime, Utc};

/// Describes how long ago `then` was, seen from `now`.
///
/// Recent moments read as "just now", then minutes, hours, "yesterday", and
/// days; anything a week or older falls back to a calendar date. Timestamps
/// in the future are treated as "just now".
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use toist::todo::view::format_relative;
///
/// let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
/// assert_eq!(format_relative(now - Duration::minutes(5), now), "5 minutes ago");
/// assert_eq!(format_relative(now - Duration::days(1), now), "yesterday");
/// assert_eq!(format_relative(now - Duration::days(30), now), "Apr 10, 2024");
/// ```
#[must_use]
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "just now".to_owned()
    } else if hours < 1 {
        ago(minutes, "minute")
    } else if days < 1 {
        ago(hours, "hour")
    } else if days == 1 {
        "yesterday".to_owned()
    } else if days < 7 {
        ago(days, "day")
    } else {
        then.format("%b %-d, %Y").to_string()
    }
}

fn ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

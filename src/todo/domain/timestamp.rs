//! ISO-8601 timestamp handling for persisted todo records.
//!
//! Timestamps are written with millisecond precision and a `Z` suffix
//! (`2024-05-01T09:30:00.000Z`). Decoding accepts any RFC 3339 value.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Deserializer, Serializer, de};

/// Returns the current clock time truncated to whole milliseconds.
///
/// Truncation keeps in-memory values equal to their persisted form.
#[must_use]
pub fn now_millis(clock: &impl Clock) -> DateTime<Utc> {
    clock.utc().trunc_subsecs(3)
}

/// Formats a timestamp in the persisted representation.
#[must_use]
pub fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses an RFC 3339 timestamp into UTC.
///
/// # Errors
///
/// Returns [`chrono::ParseError`] when `raw` is not a valid RFC 3339 value.
pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|value| value.with_timezone(&Utc))
}

pub(crate) fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(de::Error::custom)
}

/// Optional timestamps; `null` and a missing field both decode to `None`.
pub(crate) mod option {
    use super::{DateTime, Deserialize, Deserializer, Serializer, Utc, de, format, parse};

    pub(crate) fn serialize<S>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(timestamp) => serializer.serialize_str(&format(timestamp)),
            None => serializer.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse(&raw).map_err(de::Error::custom))
            .transpose()
    }
}

//! Human-friendly durations for retry and rate-limit settings.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum DurationValue {
    Secs(u64),
    FractionalSecs(f64),
    Str(String),
}

/// Accepts either a duration string (`"1s"`, `"10m"`, `"250ms"`) or a bare
/// number of seconds.
pub(crate) fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    match DurationValue::deserialize(deserializer)? {
        DurationValue::Secs(secs) => Ok(Duration::from_secs(secs)),
        DurationValue::FractionalSecs(secs) => {
            Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
        }
        DurationValue::Str(s) => duration_str::parse(s.trim()).map_err(serde::de::Error::custom),
    }
}

/// Writes the duration in the largest unit that represents it exactly, so the
/// output decodes back to the same value.
pub(crate) fn serialize_duration<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_duration(duration))
}

pub(crate) fn format_duration(duration: &Duration) -> String {
    let nanos = duration.as_nanos();
    const UNITS: [(u128, &str); 4] = [
        (3_600_000_000_000, "h"),
        (60_000_000_000, "m"),
        (1_000_000_000, "s"),
        (1_000_000, "ms"),
    ];

    if nanos == 0 {
        return "0s".into();
    }
    for (size, unit) in UNITS {
        if nanos % size == 0 {
            return format!("{}{}", nanos / size, unit);
        }
    }
    format!("{}ns", nanos)
}

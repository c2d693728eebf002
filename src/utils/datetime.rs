//! Date-time formatting for the API surface
//!
//! Every timestamp crossing the HTTP boundary uses the `yyyy-MM-dd HH:mm:ss`
//! pattern, with no time zone. Internally timestamps are `NaiveDateTime`.

use chrono::{NaiveDateTime, Utc};

use crate::utils::errors::EwmError;

/// The single timestamp format of the API: `2024-06-01 18:30:00`
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current timestamp, truncated to whole seconds to match the wire format
pub fn now() -> NaiveDateTime {
    use chrono::Timelike;
    let now = Utc::now().naive_utc();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Parse an API timestamp, producing a bad-request error on any mismatch
pub fn parse(value: &str) -> Result<NaiveDateTime, EwmError> {
    NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT)
        .map_err(|_| EwmError::InvalidDateTime(value.to_string()))
}

/// Format a timestamp for the API
pub fn format(value: NaiveDateTime) -> String {
    value.format(DATE_TIME_FORMAT).to_string()
}

/// Serde codec for `NaiveDateTime` fields in the API format
pub mod date_format {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::DATE_TIME_FORMAT;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(DATE_TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, DATE_TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Serde codec for `Option<NaiveDateTime>` fields in the API format
pub mod opt_date_format {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::DATE_TIME_FORMAT;

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_str(&v.format(DATE_TIME_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: Option<String> = Option::deserialize(deserializer)?;
        match s {
            Some(s) => NaiveDateTime::parse_from_str(&s, DATE_TIME_FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_and_format_round_trip() {
        let parsed = parse("2035-06-01 18:30:00").unwrap();
        assert_eq!(format(parsed), "2035-06-01 18:30:00");
    }

    #[test]
    fn test_parse_rejects_iso_t_separator() {
        assert_matches!(parse("2035-06-01T18:30:00"), Err(EwmError::InvalidDateTime(_)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_matches!(parse("not a date"), Err(EwmError::InvalidDateTime(_)));
        assert_matches!(parse("2035-13-01 18:30:00"), Err(EwmError::InvalidDateTime(_)));
    }

    #[test]
    fn test_now_has_whole_seconds() {
        use chrono::Timelike;
        assert_eq!(now().nanosecond(), 0);
    }
}

use crate::error::*;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Feed timestamps look like `Sun Apr 01 06:31:18 +0000 2012`.
pub const TWITTER_TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

pub fn twitter_timestamp_parse(s: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_str(s.trim(), TWITTER_TIMESTAMP_FORMAT)?;
    Ok(parsed.with_timezone(&Utc))
}

/// Parse an ISO 8601 timestamp. A missing offset means UTC.
pub fn iso8601utc_parse(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    match DateTime::parse_from_rfc3339(s) {
        Ok(parsed) => Ok(parsed.with_timezone(&Utc)),
        Err(_) => {
            let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))?;
            Ok(naive.and_utc())
        }
    }
}

pub fn iso8601_format(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// `#[serde(with = ...)]` adapter that stores a UTC timestamp as ISO 8601 text.
pub mod serde_iso8601 {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::iso8601_format(dt))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::iso8601utc_parse(&s).map_err(de::Error::custom)
    }
}

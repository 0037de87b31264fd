// farmlink/src/models/timestamp.rs

//! Lenient timestamp decoding.
//!
//! The API writes Python `isoformat()` values without an offset, but RFC 3339 with an
//! offset shows up too. Both are read into a naive UTC timestamp.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};

pub fn parse(raw: &str) -> Option<NaiveDateTime> {
  if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
    return Some(with_offset.naive_utc());
  }
  raw
    .parse::<NaiveDateTime>()
    .ok()
    .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f").ok())
}

/// `Option<NaiveDateTime>` field deserializer. Unparseable values read as `None`
/// rather than failing the whole order.
pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
  D: Deserializer<'de>,
{
  let raw = Option::<String>::deserialize(deserializer)?;
  Ok(raw.as_deref().and_then(parse))
}

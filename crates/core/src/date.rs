//! Calendar dates as they arrive from timeline fixtures.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A timeline date.
///
/// Fixtures are loosely typed, so a date string that cannot be parsed is kept
/// verbatim instead of failing the whole load. Unparsed dates order after every
/// calendar date (see [`EventDate::sort_key`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventDate {
    Calendar(NaiveDate),
    Unparsed(String),
}

impl EventDate {
    /// Parse `YYYY-MM-DD`, falling back to an RFC 3339 timestamp (UTC calendar
    /// date). Never fails.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
            return Self::Calendar(date);
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::Calendar(ts.with_timezone(&Utc).date_naive());
        }
        Self::Unparsed(raw.to_string())
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Calendar(date) => Some(*date),
            Self::Unparsed(_) => None,
        }
    }

    pub fn is_calendar(&self) -> bool {
        matches!(self, Self::Calendar(_))
    }

    /// Total order used for timeline sorting.
    ///
    /// Calendar dates ascend; all unparsed dates compare equal to each other and
    /// greater than any calendar date, so a stable sort keeps their input order.
    pub fn sort_key(&self) -> (bool, Option<NaiveDate>) {
        match self {
            Self::Calendar(date) => (false, Some(*date)),
            Self::Unparsed(_) => (true, None),
        }
    }
}

/// A missing date: unparsed and empty, so it sorts last.
impl Default for EventDate {
    fn default() -> Self {
        Self::Unparsed(String::new())
    }
}

impl From<NaiveDate> for EventDate {
    fn from(value: NaiveDate) -> Self {
        Self::Calendar(value)
    }
}

impl core::fmt::Display for EventDate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Calendar(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            Self::Unparsed(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for EventDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Accepts any JSON value. Strings go through [`EventDate::parse`]; numbers and
/// booleans are kept as their text, `null` as an empty unparsed date.
impl<'de> Deserialize<'de> for EventDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EventDateVisitor)
    }
}

struct EventDateVisitor;

impl<'de> Visitor<'de> for EventDateVisitor {
    type Value = EventDate;

    fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("a date string or any other JSON value")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(EventDate::parse(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(EventDate::Unparsed(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(EventDate::Unparsed(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(EventDate::Unparsed(v.to_string()))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(EventDate::Unparsed(v.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(EventDate::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(EventDate::default())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(EventDate::Unparsed("[array]".to_string()))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(EventDate::Unparsed("{object}".to_string()))
    }
}

//! Minute-precision entry timestamp.
//!
//! # Responsibility
//! - Define the grouping key shared by every row of a logical entry.
//! - Parse the timestamp formats found in historical journal files.
//! - Render one canonical form for storage and display.
//!
//! # Invariants
//! - Seconds and sub-second precision are always truncated away; two
//!   timestamps within the same minute compare equal.
//! - `Display` output is always re-parseable by `parse`.

use chrono::{NaiveDateTime, Timelike};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Canonical minute-precision form written to storage and shown to callers.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Accepted input shapes, canonical first. The 12-hour forms cover rows
/// written by earlier journal versions and must keep loading forever.
const ACCEPTED_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %I:%M:%S %p",
];

/// Timestamp of one logical journal entry, truncated to minute precision.
///
/// Acts as the grouping key for rows saved by the same user action, so
/// equality must be exact and stable across a store round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryTimestamp(NaiveDateTime);

impl EntryTimestamp {
    /// Wraps a date-time, dropping seconds and sub-second precision.
    pub fn new(value: NaiveDateTime) -> Self {
        let truncated = value
            .with_second(0)
            .and_then(|dt| dt.with_nanosecond(0))
            .unwrap_or(value);
        Self(truncated)
    }

    /// Parses a stored or user-supplied timestamp string.
    ///
    /// Accepts the canonical ISO-like form and the legacy localized
    /// 12-hour form, each with optional seconds. Whitespace around the
    /// value is ignored.
    pub fn parse(value: &str) -> Result<Self, TimestampParseError> {
        let trimmed = value.trim();
        for format in ACCEPTED_FORMATS {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(Self::new(parsed));
            }
        }
        Err(TimestampParseError {
            value: value.to_string(),
        })
    }

    /// Returns the underlying minute-truncated date-time.
    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl Display for EntryTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(CANONICAL_FORMAT))
    }
}

impl FromStr for EntryTimestamp {
    type Err = TimestampParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for EntryTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntryTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(D::Error::custom)
    }
}

/// Raised when a timestamp string matches none of the accepted formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampParseError {
    /// The rejected input, kept for row-drop diagnostics.
    pub value: String,
}

impl Display for TimestampParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unparseable timestamp `{}`", self.value)
    }
}

impl Error for TimestampParseError {}

//! Event row domain model.
//!
//! # Responsibility
//! - Define the canonical persisted record of the journal.
//! - Enforce severity bounds and selection preconditions before any write.
//!
//! # Invariants
//! - `severity` is always within 1..=10 once constructed.
//! - `note` carries the entry-level note; every row of the same logical
//!   entry holds an identical copy after reconciliation.

use crate::model::timestamp::EntryTimestamp;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Category of a logged event, derived from catalog membership.
///
/// Stored alongside each row but recomputed on every reconciliation, so a
/// stale persisted value never wins over current catalog contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    /// Name found in the symptom catalog.
    Symptom,
    /// Name found in the trigger catalog.
    Trigger,
    /// Name found in neither catalog (user-supplied custom event).
    Other,
}

impl EventCategory {
    /// Stable storage spelling of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Symptom => "Symptom",
            Self::Trigger => "Trigger",
            Self::Other => "Other",
        }
    }

    /// Strict decode of a stored category value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Symptom" => Some(Self::Symptom),
            "Trigger" => Some(Self::Trigger),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl Display for EventCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intensity score of one event, bounded to 1..=10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Severity(u8);

impl Severity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Validates and wraps a raw score.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::SeverityOutOfRange(i64::from(value)))
        }
    }

    /// Returns the raw 1..=10 score.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Severity {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Severity> for u8 {
    fn from(value: Severity) -> Self {
        value.get()
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One persisted journal record.
///
/// Rows saved by the same user action share `timestamp` and `note`; the
/// shared note is denormalized onto every row because the store is flat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRow {
    /// Grouping key shared by all rows of one logical entry.
    pub timestamp: EntryTimestamp,
    /// Catalog symptom/trigger name, or a user-supplied custom name.
    pub event_name: String,
    /// Derived catalog membership at last reconciliation.
    pub category: EventCategory,
    /// Per-event intensity, independent of the other rows of the entry.
    pub severity: Severity,
    /// Entry-level note, copied verbatim onto each row of the entry.
    pub note: String,
}

/// One chosen event inside a draft or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSelection {
    pub name: String,
    pub severity: Severity,
}

impl EventSelection {
    pub fn new(name: impl Into<String>, severity: Severity) -> Self {
        Self {
            name: name.into(),
            severity,
        }
    }
}

/// Precondition failures on user input, surfaced before any persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A draft selected no events at all.
    NoEventsSelected,
    /// An update would leave the entry with zero events; explicit delete
    /// is the only way to remove a whole entry.
    EmptyEntryUpdate,
    /// Severity outside 1..=10.
    SeverityOutOfRange(i64),
    /// An event name was empty or whitespace-only.
    BlankEventName,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoEventsSelected => write!(f, "select or name at least one event"),
            Self::EmptyEntryUpdate => write!(
                f,
                "update would leave the entry without events; delete it instead"
            ),
            Self::SeverityOutOfRange(value) => {
                write!(
                    f,
                    "severity {value} outside {}..={}",
                    Severity::MIN,
                    Severity::MAX
                )
            }
            Self::BlankEventName => write!(f, "event name cannot be blank"),
        }
    }
}

impl Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::{EventCategory, Severity, ValidationError};

    #[test]
    fn severity_accepts_bounds_and_rejects_outside() {
        assert_eq!(Severity::new(1).expect("min is valid").get(), 1);
        assert_eq!(Severity::new(10).expect("max is valid").get(), 10);
        assert!(matches!(
            Severity::new(0),
            Err(ValidationError::SeverityOutOfRange(0))
        ));
        assert!(matches!(
            Severity::new(11),
            Err(ValidationError::SeverityOutOfRange(11))
        ));
    }

    #[test]
    fn category_codec_round_trips() {
        for category in [
            EventCategory::Symptom,
            EventCategory::Trigger,
            EventCategory::Other,
        ] {
            assert_eq!(EventCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(EventCategory::parse("symptom"), None);
    }
}

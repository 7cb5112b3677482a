//! Timestamp grouping of raw rows into logical entries.
//!
//! # Responsibility
//! - Partition the flat row set into logical entries keyed by exact
//!   timestamp equality.
//! - Fix the display ordering: most recent entry first, rows inside an
//!   entry in original insertion order.
//!
//! # Invariants
//! - Every row lands in exactly one entry; entry timestamps are unique
//!   across the result.
//! - Two independent saves that collide on the same minute merge into one
//!   entry. Documented limitation of timestamp keying.

use crate::model::event::{EventRow, Severity};
use crate::model::timestamp::EntryTimestamp;
use std::collections::BTreeMap;

/// Derived view of one user save action: all rows sharing a timestamp.
///
/// Never persisted; recomputed from the flat row set on every read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalEntry {
    /// Shared grouping key of the member rows.
    pub timestamp: EntryTimestamp,
    /// Entry-level note, taken from the first member row.
    pub note: String,
    /// Member rows in original insertion order.
    pub rows: Vec<EventRow>,
}

impl LogicalEntry {
    /// Event names of the member rows, in insertion order.
    pub fn event_names(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.event_name.as_str()).collect()
    }

    /// Severity recorded for one member event, if present.
    pub fn severity_of(&self, event_name: &str) -> Option<Severity> {
        self.rows
            .iter()
            .find(|row| row.event_name == event_name)
            .map(|row| row.severity)
    }
}

/// Partitions rows into logical entries, most recent timestamp first.
pub fn group_entries(rows: &[EventRow]) -> Vec<LogicalEntry> {
    let mut groups: BTreeMap<EntryTimestamp, Vec<EventRow>> = BTreeMap::new();
    for row in rows {
        groups.entry(row.timestamp).or_default().push(row.clone());
    }

    groups
        .into_iter()
        .rev()
        .map(|(timestamp, rows)| LogicalEntry {
            timestamp,
            note: rows.first().map(|row| row.note.clone()).unwrap_or_default(),
            rows,
        })
        .collect()
}

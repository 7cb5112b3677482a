//! Entry reconciliation: the row-set transformations behind every
//! mutating user action.
//!
//! # Responsibility
//! - Expand a draft into its batch of rows (create).
//! - Compute the full next row set for an entry edit (update).
//! - Drop an entry's rows (delete).
//!
//! # Invariants
//! - Every emitted row of one entry carries the same timestamp and note.
//! - Category is re-derived from the catalog on every expansion; stored
//!   categories are never trusted during reconciliation.
//! - Rows of untouched entries pass through unchanged and in order.
//! - All functions are pure; persistence is the caller's job.

use crate::model::catalog::EventCatalog;
use crate::model::event::{EventRow, EventSelection, ValidationError};
use crate::model::timestamp::EntryTimestamp;

/// Input for logging a new entry: one timestamp, 1..N events, one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub timestamp: EntryTimestamp,
    pub events: Vec<EventSelection>,
    pub note: String,
}

/// Input for editing an existing entry.
///
/// `events` is the desired final event set: retained events keep their
/// (possibly rescored) severity, added events appear, dropped events are
/// simply absent. `timestamp` moves the whole entry when `Some`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryUpdate {
    pub timestamp: Option<EntryTimestamp>,
    pub events: Vec<EventSelection>,
    pub note: String,
}

/// Result of [`apply_update`]: the full next row set plus how many rows
/// of the target entry were replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledUpdate {
    pub rows: Vec<EventRow>,
    pub replaced: usize,
}

/// Expands a draft into one row per selected event.
///
/// # Errors
/// - `NoEventsSelected` when the draft selects nothing.
/// - `BlankEventName` when a selection has an empty name.
pub fn expand_draft(
    catalog: &EventCatalog,
    draft: &EntryDraft,
) -> Result<Vec<EventRow>, ValidationError> {
    let selections = collapse_selections(&draft.events)?;
    if selections.is_empty() {
        return Err(ValidationError::NoEventsSelected);
    }

    Ok(selections
        .into_iter()
        .map(|selection| emit_row(catalog, draft.timestamp, &draft.note, selection))
        .collect())
}

/// Computes the full next row set for an entry edit.
///
/// Removes every row matching `target`, then re-emits the desired event
/// set under the (possibly moved) timestamp with the new note on every
/// row and categories freshly derived. The caller decides what a zero
/// `replaced` count means; this function does not treat it as an error.
///
/// # Errors
/// - `EmptyEntryUpdate` when the desired event set is empty; an edit must
///   never silently turn into a delete.
/// - `BlankEventName` when a selection has an empty name.
pub fn apply_update(
    rows: Vec<EventRow>,
    target: EntryTimestamp,
    catalog: &EventCatalog,
    update: &EntryUpdate,
) -> Result<ReconciledUpdate, ValidationError> {
    let selections = collapse_selections(&update.events)?;
    if selections.is_empty() {
        return Err(ValidationError::EmptyEntryUpdate);
    }

    let timestamp = update.timestamp.unwrap_or(target);
    let mut next = Vec::with_capacity(rows.len() + selections.len());
    let mut replaced = 0usize;
    for row in rows {
        if row.timestamp == target {
            replaced += 1;
        } else {
            next.push(row);
        }
    }
    for selection in selections {
        next.push(emit_row(catalog, timestamp, &update.note, selection));
    }

    Ok(ReconciledUpdate {
        rows: next,
        replaced,
    })
}

/// Removes every row matching `target`.
///
/// Returns the surviving rows and the removed count; zero removals is a
/// valid no-op, not an error.
pub fn remove_entry(rows: Vec<EventRow>, target: EntryTimestamp) -> (Vec<EventRow>, usize) {
    let before = rows.len();
    let kept: Vec<EventRow> = rows
        .into_iter()
        .filter(|row| row.timestamp != target)
        .collect();
    let removed = before - kept.len();
    (kept, removed)
}

fn emit_row(
    catalog: &EventCatalog,
    timestamp: EntryTimestamp,
    note: &str,
    selection: EventSelection,
) -> EventRow {
    EventRow {
        timestamp,
        category: catalog.classify(&selection.name),
        event_name: selection.name,
        severity: selection.severity,
        note: note.to_string(),
    }
}

/// Normalizes a selection list: trims names, rejects blank ones, and
/// collapses duplicates last-severity-wins while keeping first-occurrence
/// order.
fn collapse_selections(
    events: &[EventSelection],
) -> Result<Vec<EventSelection>, ValidationError> {
    let mut collapsed: Vec<EventSelection> = Vec::with_capacity(events.len());
    for selection in events {
        let name = selection.name.trim();
        if name.is_empty() {
            return Err(ValidationError::BlankEventName);
        }
        match collapsed.iter_mut().find(|existing| existing.name == name) {
            Some(existing) => existing.severity = selection.severity,
            None => collapsed.push(EventSelection::new(name, selection.severity)),
        }
    }
    Ok(collapsed)
}

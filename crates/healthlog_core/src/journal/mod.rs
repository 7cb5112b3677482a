//! Journal use-case layer.
//!
//! # Responsibility
//! - Orchestrate load -> reconcile -> persist cycles over an event store.
//! - Carry per-request session state explicitly instead of ambient
//!   globals.
//!
//! # Invariants
//! - Every mutating action runs one full cycle; the store is always told
//!   the complete resulting state, never a diff.
//! - Validation failures surface before any persistence is attempted.

use crate::model::event::ValidationError;
use crate::model::timestamp::EntryTimestamp;
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod grouper;
pub mod reconciler;
mod service;

pub use service::JournalService;

/// Explicit per-request session state.
///
/// Replaces the original UI's ambient globals; the entry currently being
/// edited is an explicit optional field, not hidden widget state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    /// Target of an in-progress edit, when there is one.
    pub editing: Option<EntryTimestamp>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context with an active edit target.
    pub fn editing_entry(target: EntryTimestamp) -> Self {
        Self {
            editing: Some(target),
        }
    }
}

pub type JournalResult<T> = Result<T, JournalError>;

/// Journal-level error taxonomy, surfaced at the boundary of each user
/// action. Mirror push failures do not appear here: they are logged
/// warnings, never operation errors.
#[derive(Debug)]
pub enum JournalError {
    /// User input violated a precondition; nothing was persisted.
    Validation(ValidationError),
    /// An update was requested with no entry selected for editing.
    NoEditTarget,
    /// The edit target matched no stored rows.
    EntryNotFound(EntryTimestamp),
    /// The backing medium failed; prior state is intact.
    Store(StoreError),
}

impl Display for JournalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NoEditTarget => write!(f, "no entry selected for editing"),
            Self::EntryNotFound(timestamp) => write!(f, "no entry at {timestamp}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for JournalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NoEditTarget | Self::EntryNotFound(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ValidationError> for JournalError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for JournalError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

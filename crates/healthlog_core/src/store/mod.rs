//! Record store: durable flat storage of event rows.
//!
//! # Responsibility
//! - Define the storage contract used by the journal service.
//! - Keep file layout and codec details inside this persistence boundary.
//!
//! # Invariants
//! - `load()` after any `append`/`rewrite` reflects exactly the written
//!   rows; nothing is buffered across operations.
//! - Writes are whole-batch appends or whole-file rewrites, never
//!   row-by-row with partial failure.
//! - Single local writer; there is no concurrent-writer conflict
//!   detection.

use crate::model::event::EventRow;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub(crate) mod codec;
mod file;
mod memory;

pub use codec::HEADER;
pub use file::CsvFileStore;
pub use memory::MemoryEventStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Backing-medium failure. Fatal to the requested operation; prior store
/// state stays intact because writes are atomic whole-file operations.
#[derive(Debug)]
pub enum StoreError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read store file `{}`: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(
                    f,
                    "failed to write store file `{}`: {source}",
                    path.display()
                )
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
        }
    }
}

/// Storage contract for event rows.
///
/// Implementations persist rows in insertion order and return them the
/// same way; ordering policy for display lives in the grouper, not here.
pub trait EventStore {
    /// Returns all decodable rows. Rows whose timestamp, severity or
    /// column shape fails to decode are dropped with a warning, not an
    /// error; one bad historical row must not take the journal down.
    fn load(&self) -> StoreResult<Vec<EventRow>>;

    /// Appends a batch of rows without touching existing content.
    fn append(&self, rows: &[EventRow]) -> StoreResult<()>;

    /// Replaces the entire store contents with the given rows.
    fn rewrite(&self, rows: &[EventRow]) -> StoreResult<()>;
}

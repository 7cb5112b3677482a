//! In-memory store implementation.
//!
//! # Responsibility
//! - Provide a file-free `EventStore` for tests and embedded callers,
//!   matching the file store's observable contract exactly.

use super::{EventStore, StoreResult};
use crate::model::event::EventRow;
use std::sync::{Mutex, PoisonError};

/// Volatile event store holding rows in insertion order.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    rows: Mutex<Vec<EventRow>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with an initial row set.
    pub fn with_rows(rows: Vec<EventRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }
}

impl EventStore for MemoryEventStore {
    fn load(&self) -> StoreResult<Vec<EventRow>> {
        let rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(rows.clone())
    }

    fn append(&self, batch: &[EventRow]) -> StoreResult<()> {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        rows.extend_from_slice(batch);
        Ok(())
    }

    fn rewrite(&self, next: &[EventRow]) -> StoreResult<()> {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        *rows = next.to_vec();
        Ok(())
    }
}

//! Core domain logic for HealthLog.
//! This crate is the single source of truth for journaling invariants.

pub mod export;
pub mod journal;
pub mod logging;
pub mod model;
pub mod store;
pub mod sync;

pub use journal::grouper::{group_entries, LogicalEntry};
pub use journal::reconciler::{EntryDraft, EntryUpdate};
pub use journal::{JournalError, JournalResult, JournalService, SessionContext};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::catalog::{CatalogError, EventCatalog};
pub use model::event::{EventCategory, EventRow, EventSelection, Severity, ValidationError};
pub use model::timestamp::{EntryTimestamp, TimestampParseError};
pub use store::{CsvFileStore, EventStore, MemoryEventStore, StoreError, StoreResult};
pub use sync::mirror::{
    MirrorError, MirrorProvider, MirrorReceipt, MirrorRegistry, MirrorRegistryError,
    MirrorResult, MirrorSnapshot,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

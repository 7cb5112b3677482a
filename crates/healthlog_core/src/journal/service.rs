//! Journal orchestration service.
//!
//! # Responsibility
//! - Drive the load -> reconcile -> persist cycle for create, update and
//!   delete actions.
//! - Push a full-copy mirror snapshot after each durable local write,
//!   best-effort.
//!
//! # Invariants
//! - The local write is authoritative; a mirror failure is logged as a
//!   warning and never rolls back or fails the action.
//! - Create uses the append fast path; update and delete rewrite the
//!   whole store.

use super::grouper::{group_entries, LogicalEntry};
use super::reconciler::{self, EntryDraft, EntryUpdate};
use super::{JournalError, JournalResult, SessionContext};
use crate::model::catalog::EventCatalog;
use crate::model::event::EventRow;
use crate::model::timestamp::EntryTimestamp;
use crate::store::EventStore;
use crate::sync::mirror::{MirrorRegistry, MirrorSnapshot};
use log::{info, warn};
use std::time::Instant;

/// Use-case service wrapping an event store, a catalog and an optional
/// set of mirror providers.
pub struct JournalService<S: EventStore> {
    store: S,
    catalog: EventCatalog,
    mirrors: MirrorRegistry,
}

impl<S: EventStore> JournalService<S> {
    /// Creates a service with no mirrors registered.
    pub fn new(store: S, catalog: EventCatalog) -> Self {
        Self {
            store,
            catalog,
            mirrors: MirrorRegistry::new(),
        }
    }

    /// Creates a service with a pre-populated mirror registry.
    pub fn with_mirrors(store: S, catalog: EventCatalog, mirrors: MirrorRegistry) -> Self {
        Self {
            store,
            catalog,
            mirrors,
        }
    }

    /// Catalog used for category derivation.
    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    /// Mirror registry, for registration and active-mirror selection.
    pub fn mirrors_mut(&mut self) -> &mut MirrorRegistry {
        &mut self.mirrors
    }

    /// Logs a new entry: expands the draft into its row batch and appends
    /// it. Existing rows are untouched. Returns the appended rows.
    pub fn log_entry(&self, draft: &EntryDraft) -> JournalResult<Vec<EventRow>> {
        let started_at = Instant::now();
        let rows = reconciler::expand_draft(&self.catalog, draft)?;
        self.store.append(&rows)?;
        info!(
            "event=entry_logged module=journal status=ok ts={} rows={} duration_ms={}",
            draft.timestamp,
            rows.len(),
            started_at.elapsed().as_millis()
        );
        self.push_mirror_snapshot();
        Ok(rows)
    }

    /// Edits the entry identified by the session's edit target and
    /// persists the full resulting row set. Returns that row set.
    pub fn update_entry(
        &self,
        ctx: &SessionContext,
        update: &EntryUpdate,
    ) -> JournalResult<Vec<EventRow>> {
        let Some(target) = ctx.editing else {
            return Err(JournalError::NoEditTarget);
        };

        let started_at = Instant::now();
        let current = self.store.load()?;
        let reconciled = reconciler::apply_update(current, target, &self.catalog, update)?;
        if reconciled.replaced == 0 {
            warn!(
                "event=entry_updated module=journal status=error ts={target} reason=entry_not_found"
            );
            return Err(JournalError::EntryNotFound(target));
        }

        self.store.rewrite(&reconciled.rows)?;
        info!(
            "event=entry_updated module=journal status=ok ts={} replaced={} rows={} duration_ms={}",
            target,
            reconciled.replaced,
            reconciled.rows.len(),
            started_at.elapsed().as_millis()
        );
        self.push_mirror_snapshot();
        Ok(reconciled.rows)
    }

    /// Deletes the entry at `target`, removing all of its rows. Deleting
    /// a nonexistent timestamp is a no-op. Returns the removed row count.
    pub fn delete_entry(&self, target: EntryTimestamp) -> JournalResult<usize> {
        let started_at = Instant::now();
        let current = self.store.load()?;
        let (kept, removed) = reconciler::remove_entry(current, target);
        if removed == 0 {
            info!("event=entry_deleted module=journal status=ok ts={target} removed=0 noop=true");
            return Ok(0);
        }

        self.store.rewrite(&kept)?;
        info!(
            "event=entry_deleted module=journal status=ok ts={} removed={} duration_ms={}",
            target,
            removed,
            started_at.elapsed().as_millis()
        );
        self.push_mirror_snapshot();
        Ok(removed)
    }

    /// Grouped display view: logical entries, most recent first.
    pub fn entries(&self) -> JournalResult<Vec<LogicalEntry>> {
        Ok(group_entries(&self.store.load()?))
    }

    /// Raw rows in store order, for charting and export.
    pub fn rows(&self) -> JournalResult<Vec<EventRow>> {
        Ok(self.store.load()?)
    }

    /// Pushes a full store copy to the active mirror, if one is selected.
    /// Failures are warnings only; the local write already succeeded and
    /// stays authoritative.
    fn push_mirror_snapshot(&self) {
        if self.mirrors.active_mirror().is_none() {
            return;
        }

        let rows = match self.store.load() {
            Ok(rows) => rows,
            Err(err) => {
                warn!("event=mirror_push module=journal status=warn reason=load_failed error={err}");
                return;
            }
        };

        let snapshot = MirrorSnapshot::from_rows(&rows);
        match self.mirrors.push_active(&snapshot) {
            Ok(receipt) => info!(
                "event=mirror_push module=journal status=ok mirror={} rows={}",
                receipt.mirror_id, receipt.rows_pushed
            ),
            Err(err) => warn!(
                "event=mirror_push module=journal status=warn mirror={} code={} retryable={} error={}",
                err.mirror_id, err.code, err.retryable, err.message
            ),
        }
    }
}

//! File-backed store implementation.
//!
//! # Responsibility
//! - Own the journal's flat tabular file: tolerant load, batch append,
//!   atomic whole-file rewrite.
//! - Emit `store_*` logging events with row counts and durations.
//!
//! # Invariants
//! - `append` never reads or rewrites existing content.
//! - `rewrite` replaces the file via same-directory temp file + rename;
//!   a partially written batch is never observable at the target path.
//! - Records that fail to decode are dropped with a warn log, never fatal.

use super::codec::{decode_record, encode_document, encode_row, is_header, parse_records, HEADER};
use super::{EventStore, StoreError, StoreResult};
use crate::model::event::EventRow;
use log::{info, warn};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Flat CSV-backed event store.
///
/// Assumes a single local writer; there is no cross-process locking, and
/// correctness of the load-transform-persist cycle relies on no concurrent
/// mutation being in flight.
pub struct CsvFileStore {
    path: PathBuf,
}

impl CsvFileStore {
    /// Creates a store over the given file path. The file itself is
    /// created lazily by the first append or rewrite.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("journal.csv"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Read {
            path: self.path.clone(),
            source,
        }
    }

    fn write_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl EventStore for CsvFileStore {
    fn load(&self) -> StoreResult<Vec<EventRow>> {
        let started_at = Instant::now();

        if !self.path.exists() {
            info!(
                "event=store_load module=store status=ok rows=0 dropped=0 duration_ms={} missing_file=true",
                started_at.elapsed().as_millis()
            );
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path).map_err(|err| self.read_error(err))?;

        let mut rows = Vec::new();
        let mut dropped = 0usize;
        for (index, record) in parse_records(&raw).iter().enumerate() {
            if index == 0 && is_header(record) {
                continue;
            }
            match decode_record(record) {
                Ok(row) => rows.push(row),
                Err(err) => {
                    dropped += 1;
                    warn!(
                        "event=row_dropped module=store status=warn record={} reason={}",
                        index + 1,
                        err
                    );
                }
            }
        }

        info!(
            "event=store_load module=store status=ok rows={} dropped={} duration_ms={}",
            rows.len(),
            dropped,
            started_at.elapsed().as_millis()
        );
        Ok(rows)
    }

    fn append(&self, rows: &[EventRow]) -> StoreResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let started_at = Instant::now();

        let needs_header = match fs::metadata(&self.path) {
            Ok(metadata) => metadata.len() == 0,
            Err(_) => true,
        };

        let mut batch = String::with_capacity(rows.len() * 48);
        if needs_header {
            batch.push_str(HEADER);
            batch.push('\n');
        }
        for row in rows {
            batch.push_str(&encode_row(row));
            batch.push('\n');
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| self.write_error(err))?;
        file.write_all(batch.as_bytes())
            .map_err(|err| self.write_error(err))?;
        file.sync_all().map_err(|err| self.write_error(err))?;

        info!(
            "event=store_append module=store status=ok rows={} duration_ms={}",
            rows.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn rewrite(&self, rows: &[EventRow]) -> StoreResult<()> {
        let started_at = Instant::now();
        let staging = self.staging_path();

        let result = (|| {
            let mut file = File::create(&staging).map_err(|err| self.write_error(err))?;
            file.write_all(encode_document(rows).as_bytes())
                .map_err(|err| self.write_error(err))?;
            file.sync_all().map_err(|err| self.write_error(err))?;
            drop(file);
            fs::rename(&staging, &self.path).map_err(|err| self.write_error(err))
        })();

        if result.is_err() {
            let _ = fs::remove_file(&staging);
            return result;
        }

        info!(
            "event=store_rewrite module=store status=ok rows={} duration_ms={}",
            rows.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

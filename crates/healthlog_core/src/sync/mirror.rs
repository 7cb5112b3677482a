//! Mirror provider SPI and in-process registry.
//!
//! # Responsibility
//! - Define the push-only contract remote mirrors implement.
//! - Hold registered providers and the active selection.
//!
//! # Invariants
//! - Mirror ids are non-empty lowercase `[a-z0-9_-]`.
//! - A push happens only after the local write is durable; its outcome
//!   never changes local state.

use crate::model::event::EventRow;
use crate::store::codec::encode_document;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type MirrorResult<T> = Result<T, MirrorError>;

/// Error envelope returned by mirror operations.
///
/// Carries a stable machine code and a retryability hint so callers can
/// log and optionally re-push without parsing message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorError {
    pub mirror_id: String,
    pub code: String,
    pub message: String,
    pub retryable: bool,
}

impl MirrorError {
    pub fn new(
        mirror_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
        retryable: bool,
    ) -> Self {
        Self {
            mirror_id: mirror_id.into(),
            code: code.into(),
            message: message.into(),
            retryable,
        }
    }
}

impl Display for MirrorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "mirror `{}` failed with {}: {}",
            self.mirror_id, self.code, self.message
        )
    }
}

impl Error for MirrorError {}

/// Full-copy payload pushed after a successful local write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorSnapshot {
    /// Number of rows in the copy.
    pub row_count: usize,
    /// The complete store document, rendered in the on-disk layout.
    pub document: String,
}

impl MirrorSnapshot {
    /// Renders a snapshot of the given rows.
    pub fn from_rows(rows: &[EventRow]) -> Self {
        Self {
            row_count: rows.len(),
            document: encode_document(rows),
        }
    }
}

/// Acknowledgement returned by a successful push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorReceipt {
    pub mirror_id: String,
    pub rows_pushed: usize,
}

/// Push-only contract implemented by remote mirrors.
///
/// Transport and credentials are the provider's concern; core only hands
/// over the rendered full copy.
pub trait MirrorProvider {
    /// Stable registry id, lowercase `[a-z0-9_-]`.
    fn mirror_id(&self) -> &str;

    /// Pushes one full store copy.
    fn push(&self, snapshot: &MirrorSnapshot) -> MirrorResult<MirrorReceipt>;
}

/// Mirror registration/selection errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorRegistryError {
    InvalidMirrorId(String),
    DuplicateMirrorId(String),
    MirrorNotFound(String),
}

impl Display for MirrorRegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMirrorId(value) => write!(f, "mirror id is invalid: {value}"),
            Self::DuplicateMirrorId(value) => write!(f, "mirror id already registered: {value}"),
            Self::MirrorNotFound(value) => write!(f, "mirror not found: {value}"),
        }
    }
}

impl Error for MirrorRegistryError {}

/// Runtime registry of mirror providers with one optional active pick.
#[derive(Default)]
pub struct MirrorRegistry {
    mirrors: BTreeMap<String, Arc<dyn MirrorProvider>>,
    active_mirror_id: Option<String>,
}

impl MirrorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one mirror provider.
    pub fn register(&mut self, mirror: Arc<dyn MirrorProvider>) -> Result<(), MirrorRegistryError> {
        let mirror_id = mirror.mirror_id().trim().to_string();
        if !is_valid_mirror_id(&mirror_id) {
            return Err(MirrorRegistryError::InvalidMirrorId(mirror_id));
        }
        if self.mirrors.contains_key(mirror_id.as_str()) {
            return Err(MirrorRegistryError::DuplicateMirrorId(mirror_id));
        }

        self.mirrors.insert(mirror_id, mirror);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.mirrors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mirrors.is_empty()
    }

    /// Sorted registered mirror ids.
    pub fn mirror_ids(&self) -> Vec<String> {
        self.mirrors.keys().cloned().collect()
    }

    /// Selects the active mirror.
    pub fn select_active(&mut self, mirror_id: &str) -> Result<(), MirrorRegistryError> {
        let normalized = mirror_id.trim();
        if !self.mirrors.contains_key(normalized) {
            return Err(MirrorRegistryError::MirrorNotFound(normalized.to_string()));
        }
        self.active_mirror_id = Some(normalized.to_string());
        Ok(())
    }

    /// Clears the active selection; pushes become no-ops.
    pub fn clear_active(&mut self) {
        self.active_mirror_id = None;
    }

    pub fn active_mirror_id(&self) -> Option<&str> {
        self.active_mirror_id.as_deref()
    }

    /// Returns one mirror by id.
    pub fn get(&self, mirror_id: &str) -> Option<Arc<dyn MirrorProvider>> {
        self.mirrors.get(mirror_id.trim()).cloned()
    }

    /// Returns the active mirror handle.
    pub fn active_mirror(&self) -> Option<Arc<dyn MirrorProvider>> {
        let id = self.active_mirror_id()?;
        self.get(id)
    }

    /// Pushes a snapshot to the active mirror.
    pub fn push_active(&self, snapshot: &MirrorSnapshot) -> MirrorResult<MirrorReceipt> {
        match self.active_mirror() {
            Some(mirror) => mirror.push(snapshot),
            None => Err(MirrorError::new(
                "registry",
                "mirror_not_selected",
                "No active mirror selected.",
                false,
            )),
        }
    }
}

fn is_valid_mirror_id(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}

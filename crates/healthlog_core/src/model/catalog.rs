//! Symptom/trigger catalog configuration.
//!
//! # Responsibility
//! - Hold the recognized symptom and trigger name sets.
//! - Derive `EventCategory` by membership test, nothing else.
//!
//! # Invariants
//! - A catalog is immutable once constructed; category derivation is a
//!   pure function of (catalog, name).
//! - Symptom membership wins when a name appears in both sets.

use crate::model::event::EventCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Built-in symptom names, matching the original journal deployment.
const DEFAULT_SYMPTOMS: &[&str] = &[
    "Fatigue",
    "Optic Neuritis",
    "Tingling",
    "MS Hug (Chest Tightness)",
    "Incontinence",
];

/// Built-in trigger names, matching the original journal deployment.
const DEFAULT_TRIGGERS: &[&str] = &["Cold Exposure", "Heat", "Stress", "Lack of Sleep"];

/// Immutable pair of recognized-name sets injected into reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCatalog {
    symptoms: BTreeSet<String>,
    triggers: BTreeSet<String>,
}

impl EventCatalog {
    /// Builds a catalog from arbitrary name collections.
    pub fn new<S, T>(symptoms: S, triggers: T) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            symptoms: symptoms.into_iter().map(Into::into).collect(),
            triggers: triggers.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the built-in catalog used when no config file is supplied.
    pub fn default_catalog() -> Self {
        Self::new(DEFAULT_SYMPTOMS.iter().copied(), DEFAULT_TRIGGERS.iter().copied())
    }

    /// Loads a catalog from a JSON file of shape
    /// `{"symptoms": [...], "triggers": [...]}`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Derives the category of an event name by catalog membership.
    pub fn classify(&self, name: &str) -> EventCategory {
        if self.symptoms.contains(name) {
            EventCategory::Symptom
        } else if self.triggers.contains(name) {
            EventCategory::Trigger
        } else {
            EventCategory::Other
        }
    }

    /// Whether the name belongs to either catalog set.
    pub fn is_known(&self, name: &str) -> bool {
        self.symptoms.contains(name) || self.triggers.contains(name)
    }

    /// Recognized symptom names in sorted order.
    pub fn symptom_names(&self) -> impl Iterator<Item = &str> {
        self.symptoms.iter().map(String::as_str)
    }

    /// Recognized trigger names in sorted order.
    pub fn trigger_names(&self) -> impl Iterator<Item = &str> {
        self.triggers.iter().map(String::as_str)
    }
}

impl Default for EventCatalog {
    fn default() -> Self {
        Self::default_catalog()
    }
}

/// Catalog config loading failures.
#[derive(Debug)]
pub enum CatalogError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read catalog file `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid catalog file `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EventCatalog;
    use crate::model::event::EventCategory;
    use std::io::Write;

    #[test]
    fn default_catalog_classifies_known_names() {
        let catalog = EventCatalog::default_catalog();
        assert_eq!(catalog.classify("Fatigue"), EventCategory::Symptom);
        assert_eq!(catalog.classify("Stress"), EventCategory::Trigger);
        assert_eq!(catalog.classify("Brain Fog"), EventCategory::Other);
    }

    #[test]
    fn default_catalog_exposes_both_name_lists() {
        let catalog = EventCatalog::default_catalog();
        assert_eq!(catalog.symptom_names().count(), 5);
        assert_eq!(catalog.trigger_names().count(), 4);
        assert!(catalog.is_known("Fatigue"));
        assert!(!catalog.is_known("Brain Fog"));
    }

    #[test]
    fn classification_is_exact_match() {
        let catalog = EventCatalog::default_catalog();
        assert_eq!(catalog.classify("fatigue"), EventCategory::Other);
        assert_eq!(catalog.classify(" Fatigue"), EventCategory::Other);
    }

    #[test]
    fn symptom_membership_wins_over_trigger() {
        let catalog = EventCatalog::new(["Heat"], ["Heat"]);
        assert_eq!(catalog.classify("Heat"), EventCategory::Symptom);
    }

    #[test]
    fn loads_catalog_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{"symptoms": ["Vertigo"], "triggers": ["Caffeine"]}}"#
        )
        .expect("write catalog json");

        let catalog = EventCatalog::from_json_file(file.path()).expect("catalog should load");
        assert_eq!(catalog.classify("Vertigo"), EventCategory::Symptom);
        assert_eq!(catalog.classify("Caffeine"), EventCategory::Trigger);
        assert_eq!(catalog.classify("Fatigue"), EventCategory::Other);
    }

    #[test]
    fn rejects_malformed_catalog_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write bad payload");

        let err = EventCatalog::from_json_file(file.path()).expect_err("must fail");
        assert!(err.to_string().contains("invalid catalog file"));
    }
}

//! Manifest entity - maps package sequence numbers to target paths
//!
//! Numbers are dense from 1 and assigned in packaging order. The manifest is a
//! pure data structure; reading and writing `upload-spec.json` is handled by
//! `infrastructure::repositories::manifest`.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::value_objects::TargetPath;

/// Why a set of entries cannot form a manifest
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    #[error("source revision is empty")]
    EmptySourceRevision,

    #[error("entry numbers must be dense from 1: expected {expected}, found {found}")]
    NotDense { expected: u32, found: u32 },
}

/// One packaged file: its number in the package and where it is deployed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestEntry<'a> {
    pub number: u32,
    pub target: &'a TargetPath,
}

impl ManifestEntry<'_> {
    /// Name of the numbered file inside the package directory
    pub fn file_name(&self) -> String {
        self.number.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    source_revision: String,
    entries: BTreeMap<u32, TargetPath>,
}

impl Manifest {
    pub fn new(source_revision: impl Into<String>) -> Self {
        Self {
            source_revision: source_revision.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Rebuild a manifest from stored entries, enforcing dense numbering.
    pub fn from_entries(
        source_revision: impl Into<String>,
        entries: BTreeMap<u32, TargetPath>,
    ) -> Result<Self, ManifestError> {
        let source_revision = source_revision.into();
        if source_revision.trim().is_empty() {
            return Err(ManifestError::EmptySourceRevision);
        }

        for (expected, found) in (1u32..).zip(entries.keys()) {
            if expected != *found {
                return Err(ManifestError::NotDense {
                    expected,
                    found: *found,
                });
            }
        }

        Ok(Self {
            source_revision,
            entries,
        })
    }

    pub fn source_revision(&self) -> &str {
        &self.source_revision
    }

    /// Number the next pushed entry will receive
    pub fn next_number(&self) -> u32 {
        self.entries.len() as u32 + 1
    }

    /// Append a target path, returning its assigned number.
    pub fn push(&mut self, target: TargetPath) -> u32 {
        let number = self.next_number();
        self.entries.insert(number, target);
        number
    }

    pub fn get(&self, number: u32) -> Option<&TargetPath> {
        self.entries.get(&number)
    }

    /// Entries in ascending number order
    pub fn entries(&self) -> impl Iterator<Item = ManifestEntry<'_>> {
        self.entries
            .iter()
            .map(|(number, target)| ManifestEntry {
                number: *number,
                target,
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

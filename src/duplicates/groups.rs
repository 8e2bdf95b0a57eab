//! Duplicate grouping by content fingerprint.
//!
//! # Overview
//!
//! [`group_by_fingerprint`] consumes [`FileRecord`]s in traversal order and
//! partitions them into [`DuplicateGroup`]s. A fingerprint seen once is only
//! remembered as "first path so far"; a group is materialized the moment a
//! second file with the same fingerprint appears, with the first path at
//! element 0. Groups are returned in creation order.
//!
//! # Example
//!
//! ```
//! use dupsweep::duplicates::group_by_fingerprint;
//! use dupsweep::scanner::{FileRecord, Hasher};
//! use std::path::PathBuf;
//!
//! let hello = Hasher::hash_bytes(b"hello");
//! let world = Hasher::hash_bytes(b"world");
//! let records = vec![
//!     FileRecord::new(PathBuf::from("/a.txt"), hello),
//!     FileRecord::new(PathBuf::from("/b.txt"), hello),
//!     FileRecord::new(PathBuf::from("/c.txt"), world),
//! ];
//!
//! let groups = group_by_fingerprint(records);
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].paths, vec![PathBuf::from("/a.txt"), PathBuf::from("/b.txt")]);
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::scanner::{FileRecord, Fingerprint};

/// Confirmed group of files with identical content.
///
/// `paths` is in traversal discovery order and always holds at least two
/// entries when produced by [`group_by_fingerprint`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    /// Shared content fingerprint
    pub fingerprint: Fingerprint,
    /// Member paths, first-discovered first
    pub paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Create a new duplicate group.
    #[must_use]
    pub fn new(fingerprint: Fingerprint, paths: Vec<PathBuf>) -> Self {
        Self { fingerprint, paths }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// The first-discovered file, retained by the automatic policy.
    #[must_use]
    pub fn first(&self) -> Option<&Path> {
        self.paths.first().map(PathBuf::as_path)
    }

    /// Every member after the first.
    #[must_use]
    pub fn redundant(&self) -> &[PathBuf] {
        self.paths.get(1..).unwrap_or(&[])
    }

    /// Number of duplicate copies (total - 1 original).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }

    /// Fingerprint as hexadecimal string.
    #[must_use]
    pub fn hash_hex(&self) -> String {
        self.fingerprint.to_hex()
    }
}

/// Group file records by fingerprint, keeping traversal order.
///
/// # Arguments
///
/// * `records` - Hashed files in traversal order
///
/// # Returns
///
/// Groups in creation order. Fingerprints seen exactly once never appear.
#[must_use]
pub fn group_by_fingerprint(records: impl IntoIterator<Item = FileRecord>) -> Vec<DuplicateGroup> {
    enum Seen {
        Once(PathBuf),
        Grouped(usize),
    }

    let mut seen: HashMap<Fingerprint, Seen> = HashMap::new();
    let mut groups: Vec<DuplicateGroup> = Vec::new();

    for FileRecord { path, fingerprint } in records {
        match seen.remove(&fingerprint) {
            None => {
                seen.insert(fingerprint, Seen::Once(path));
            }
            Some(Seen::Once(first)) => {
                log::debug!(
                    "Duplicate {} of {} ({})",
                    path.display(),
                    first.display(),
                    fingerprint
                );
                groups.push(DuplicateGroup::new(fingerprint, vec![first, path]));
                seen.insert(fingerprint, Seen::Grouped(groups.len() - 1));
            }
            Some(Seen::Grouped(idx)) => {
                log::debug!("Duplicate {} ({})", path.display(), fingerprint);
                groups[idx].paths.push(path);
                seen.insert(fingerprint, Seen::Grouped(idx));
            }
        }
    }

    log::debug!(
        "Grouping complete: {} unique fingerprints, {} duplicate groups",
        seen.len(),
        groups.len()
    );

    groups
}

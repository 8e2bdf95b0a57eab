//! Index-based manual selection.
//!
//! A [`Listing`] flattens duplicate groups into one numbered list: indices
//! start at 1, are contiguous, and follow group order and then the order
//! inside each group. [`resolve_selection`] turns the operator's
//! comma-separated answer into the paths to delete plus a diagnostic for
//! every token that could not be used. It performs no I/O.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::duplicates::DuplicateGroup;
use crate::scanner::Fingerprint;

/// One numbered line of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// 1-based selection index
    pub index: usize,
    /// Position of the owning group in the scan result
    pub group: usize,
    /// Fingerprint of the owning group
    pub fingerprint: Fingerprint,
    /// File path
    pub path: PathBuf,
}

/// Numbered view over duplicate groups, rebuilt for every selection round.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    entries: Vec<ListingEntry>,
    group_bounds: Vec<std::ops::Range<usize>>,
}

impl Listing {
    /// Number every file of every group, starting at 1.
    #[must_use]
    pub fn build(groups: &[DuplicateGroup]) -> Self {
        let mut entries = Vec::with_capacity(groups.iter().map(DuplicateGroup::len).sum());
        let mut group_bounds = Vec::with_capacity(groups.len());

        for (group_idx, group) in groups.iter().enumerate() {
            let start = entries.len();
            for path in &group.paths {
                entries.push(ListingEntry {
                    index: entries.len() + 1,
                    group: group_idx,
                    fingerprint: group.fingerprint,
                    path: path.clone(),
                });
            }
            group_bounds.push(start..entries.len());
        }

        Self {
            entries,
            group_bounds,
        }
    }

    /// Total number of listed files (the highest valid index).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in index order.
    #[must_use]
    pub fn entries(&self) -> &[ListingEntry] {
        &self.entries
    }

    /// Path for a 1-based index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Path> {
        index
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
            .map(|e| e.path.as_path())
    }

    /// Entries belonging to one group, in listing order.
    #[must_use]
    pub fn group_entries(&self, group: usize) -> &[ListingEntry] {
        self.group_bounds
            .get(group)
            .map_or(&[], |range| &self.entries[range.clone()])
    }

    /// Number of groups in the listing.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.group_bounds.len()
    }
}

/// A selection token that could not be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// The token is not an integer.
    #[error("invalid input: '{0}'")]
    InvalidInput(String),

    /// The token is an integer outside `1..=max`.
    #[error("invalid index: {index} (valid range is 1-{max})")]
    InvalidIndex {
        /// The offending token as typed
        index: String,
        /// Highest valid index
        max: usize,
    },
}

/// Resolved manual selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Paths to delete, in the order first requested
    pub paths: Vec<PathBuf>,
    /// One entry per rejected token
    pub diagnostics: Vec<SelectionError>,
}

impl Selection {
    /// True when no valid index was given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Resolve a comma-separated index list against a listing.
///
/// Tokens are trimmed. A blank answer selects nothing and reports nothing;
/// otherwise an empty or non-integer token yields
/// [`SelectionError::InvalidInput`], and an integer outside `1..=listing.len()`
/// (including 0 and negative numbers) yields
/// [`SelectionError::InvalidIndex`]. An index given more than once is
/// queued once.
///
/// # Example
///
/// ```
/// use dupsweep::actions::selection::{resolve_selection, Listing, SelectionError};
/// use dupsweep::duplicates::DuplicateGroup;
/// use dupsweep::scanner::Hasher;
/// use std::path::PathBuf;
///
/// let group = DuplicateGroup::new(
///     Hasher::hash_bytes(b"hello"),
///     vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")],
/// );
/// let listing = Listing::build(&[group]);
///
/// let selection = resolve_selection(&listing, "2, abc, 9");
/// assert_eq!(selection.paths, vec![PathBuf::from("b.txt")]);
/// assert_eq!(selection.diagnostics.len(), 2);
/// ```
#[must_use]
pub fn resolve_selection(listing: &Listing, raw: &str) -> Selection {
    let mut selection = Selection::default();
    let mut queued: HashSet<usize> = HashSet::new();

    if raw.trim().is_empty() {
        return selection;
    }

    for token in raw.split(',').map(str::trim) {
        if !is_integer(token) {
            log::debug!("Rejected selection token '{}': not an integer", token);
            selection
                .diagnostics
                .push(SelectionError::InvalidInput(token.to_string()));
            continue;
        }

        let resolved = token
            .parse::<usize>()
            .ok()
            .and_then(|index| listing.get(index).map(|path| (index, path)));

        match resolved {
            Some((index, path)) => {
                if queued.insert(index) {
                    selection.paths.push(path.to_path_buf());
                } else {
                    log::debug!("Index {} selected more than once", index);
                }
            }
            None => {
                log::debug!("Rejected selection token '{}': out of range", token);
                selection.diagnostics.push(SelectionError::InvalidIndex {
                    index: token.to_string(),
                    max: listing.len(),
                });
            }
        }
    }

    selection
}

/// Optional sign followed by at least one ASCII digit.
fn is_integer(token: &str) -> bool {
    let digits = token
        .strip_prefix('-')
        .or_else(|| token.strip_prefix('+'))
        .unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

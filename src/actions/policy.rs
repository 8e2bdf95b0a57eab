//! Deletion policies.
//!
//! - **Manual**: the operator picks files by listing index
//!   (see [`crate::actions::selection`]).
//! - **Automatic**: every group keeps its first-discovered file and loses the
//!   rest.
//!
//! Both policies run every queued deletion even when some fail, and return a
//! [`PolicyReport`] with the counts and every per-file failure.

use std::path::PathBuf;

use serde::Serialize;

use super::delete::{
    delete_batch, validate_preserves_copy, DeleteFailure, DeleteProgressCallback, FileRemover,
};
use super::selection::{resolve_selection, Listing, SelectionError};
use crate::duplicates::DuplicateGroup;

/// Which deletion policy to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Operator selects files by index
    Manual,
    /// Keep the first file of every group, delete the rest
    Automatic,
}

impl PolicyKind {
    /// Interpret the interactive menu answer: `"2"` is automatic,
    /// anything else is manual.
    #[must_use]
    pub fn from_choice(input: &str) -> Self {
        if input.trim() == "2" {
            Self::Automatic
        } else {
            Self::Manual
        }
    }
}

/// Outcome of applying a policy.
#[derive(Debug, Clone, Serialize)]
pub struct PolicyReport {
    /// Policy that produced this report
    pub policy: PolicyKind,
    /// Files removed (or that would be removed in a dry run)
    pub deleted: Vec<PathBuf>,
    /// Files left in place: one per group for the automatic policy, every
    /// listed file not actually deleted for the manual policy
    pub kept: usize,
    /// Per-file deletion failures
    pub failures: Vec<DeleteFailure>,
    /// Rejected selection tokens (manual policy only)
    #[serde(serialize_with = "serialize_diagnostics")]
    pub diagnostics: Vec<SelectionError>,
    /// Bytes freed by successful deletions
    pub bytes_freed: u64,
}

impl PolicyReport {
    fn empty(policy: PolicyKind) -> Self {
        Self {
            policy,
            deleted: Vec::new(),
            kept: 0,
            failures: Vec::new(),
            diagnostics: Vec::new(),
            bytes_freed: 0,
        }
    }

    /// Number of files deleted.
    #[must_use]
    pub fn deleted_count(&self) -> usize {
        self.deleted.len()
    }

    /// True when nothing was queued for deletion.
    #[must_use]
    pub fn nothing_to_delete(&self) -> bool {
        self.deleted.is_empty() && self.failures.is_empty()
    }

    /// True when at least one deletion failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

fn serialize_diagnostics<S: serde::Serializer>(
    diagnostics: &[SelectionError],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(diagnostics.iter().map(ToString::to_string))
}

/// Files the automatic policy keeps and deletes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoPlan {
    /// Element 0 of every group
    pub keep: Vec<PathBuf>,
    /// Every other element, group by group
    pub delete: Vec<PathBuf>,
}

/// Partition groups into survivors and deletions without touching the
/// filesystem.
#[must_use]
pub fn plan_automatic(groups: &[DuplicateGroup]) -> AutoPlan {
    let mut plan = AutoPlan::default();
    for group in groups {
        if let Some(first) = group.first() {
            plan.keep.push(first.to_path_buf());
        }
        plan.delete.extend(group.redundant().iter().cloned());
    }
    plan
}

/// Apply the automatic policy.
///
/// Keeps element 0 of every group and deletes the rest. A failed deletion is
/// recorded and processing continues with the remaining files and groups.
pub fn apply_automatic(
    groups: &[DuplicateGroup],
    remover: &dyn FileRemover,
    callback: Option<&dyn DeleteProgressCallback>,
) -> PolicyReport {
    let plan = plan_automatic(groups);
    log::info!(
        "Automatic policy: keeping {} file(s), deleting {}",
        plan.keep.len(),
        plan.delete.len()
    );

    let batch = delete_batch(&plan.delete, remover, callback);

    PolicyReport {
        policy: PolicyKind::Automatic,
        deleted: batch.successes.into_iter().map(|d| d.path).collect(),
        kept: plan.keep.len(),
        failures: batch.failures,
        diagnostics: Vec::new(),
        bytes_freed: batch.bytes_freed,
    }
}

/// Apply the manual policy for one selection round.
///
/// `raw` is the operator's comma-separated index list. Rejected tokens are
/// reported in [`PolicyReport::diagnostics`]. When no token resolves to a
/// file, nothing is deleted.
pub fn apply_manual(
    listing: &Listing,
    raw: &str,
    remover: &dyn FileRemover,
    callback: Option<&dyn DeleteProgressCallback>,
) -> PolicyReport {
    let selection = resolve_selection(listing, raw);
    for diagnostic in &selection.diagnostics {
        log::warn!("{}", diagnostic);
    }

    if selection.is_empty() {
        log::info!("Manual policy: nothing to delete");
        return PolicyReport {
            kept: listing.len(),
            diagnostics: selection.diagnostics,
            ..PolicyReport::empty(PolicyKind::Manual)
        };
    }

    warn_if_group_emptied(listing, &selection.paths);

    let batch = delete_batch(&selection.paths, remover, callback);
    let deleted: Vec<PathBuf> = batch.successes.into_iter().map(|d| d.path).collect();

    PolicyReport {
        policy: PolicyKind::Manual,
        kept: listing.len() - deleted.len(),
        deleted,
        failures: batch.failures,
        diagnostics: selection.diagnostics,
        bytes_freed: batch.bytes_freed,
    }
}

/// Manual selection may remove every copy of a group; the operator asked for
/// it, so it only gets a warning.
fn warn_if_group_emptied(listing: &Listing, selected: &[PathBuf]) {
    for group in 0..listing.group_count() {
        let paths: Vec<PathBuf> = listing
            .group_entries(group)
            .iter()
            .map(|e| e.path.clone())
            .collect();
        if let Err(e) = validate_preserves_copy(selected, &paths) {
            if let Some(first) = listing.group_entries(group).first() {
                log::warn!("{} (group {})", e, first.fingerprint);
            }
        }
    }
}

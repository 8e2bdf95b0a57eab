//! File actions module.
//!
//! This module provides functionality for:
//! - Permanent deletion, single and batched ([`delete`])
//! - Index-based manual selection ([`selection`])
//! - Manual and automatic deletion policies ([`policy`])
//!
//! ```no_run
//! use dupsweep::actions::{apply_automatic, PermanentRemover};
//! use dupsweep::duplicates::DuplicateFinder;
//! use std::path::Path;
//!
//! let result = DuplicateFinder::with_defaults().scan(Path::new(".")).unwrap();
//! let report = apply_automatic(&result.groups, &PermanentRemover, None);
//! println!("deleted {}, kept {}", report.deleted_count(), report.kept);
//! ```

pub mod delete;
pub mod policy;
pub mod selection;

// Re-export commonly used types
pub use delete::{
    delete_batch, permanent_delete, validate_preserves_copy, BatchDeleteResult, DeleteError,
    DeleteFailure, DeleteProgressCallback, DeleteResult, DryRunRemover, FileRemover,
    PermanentRemover,
};
pub use policy::{apply_automatic, apply_manual, plan_automatic, AutoPlan, PolicyKind, PolicyReport};
pub use selection::{resolve_selection, Listing, ListingEntry, Selection, SelectionError};

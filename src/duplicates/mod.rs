//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Scanning a directory tree and fingerprinting every file ([`finder`])
//! - Grouping files by fingerprint in traversal order ([`groups`])

pub mod finder;
pub mod groups;

pub use finder::{DuplicateFinder, FinderConfig, FinderError, ScanResult, ScanSummary};
pub use groups::{group_by_fingerprint, DuplicateGroup};

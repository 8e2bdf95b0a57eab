//! JSON output formatter for scan results and policy reports.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "root": "/data",
//!   "duplicates": [
//!     {
//!       "hash": "2cf24dba...",
//!       "size": 5,
//!       "files": ["/data/a.txt", "/data/b.txt"]
//!     }
//!   ],
//!   "summary": {
//!     "total_files": 3,
//!     "hashed_files": 3,
//!     "duplicate_groups": 1,
//!     "duplicate_files": 1,
//!     "scan_duration_ms": 2,
//!     "warnings": [
//!       { "path": "/data/locked", "message": "Permission denied: /data/locked" }
//!     ]
//!   },
//!   "report": null,
//!   "dry_run": false,
//!   "exit_code": 0,
//!   "exit_code_name": "DS000"
//! }
//! ```
//!
//! Group sizes are read when the groups are captured with
//! [`JsonDuplicateGroup::capture_all`], so capture them before any policy
//! runs.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::actions::PolicyReport;
use crate::duplicates::{DuplicateGroup, ScanSummary};
use crate::scanner::ScanError;
use crate::error::ExitCode;

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// SHA-256 as hexadecimal string (64 characters)
    pub hash: String,
    /// File size in bytes, if the first file could be stat'ed
    pub size: Option<u64>,
    /// Paths in discovery order
    pub files: Vec<String>,
}

impl JsonDuplicateGroup {
    /// Create a JSON duplicate group from a DuplicateGroup.
    #[must_use]
    pub fn from_duplicate_group(group: &DuplicateGroup) -> Self {
        Self {
            hash: group.hash_hex(),
            size: group
                .first()
                .and_then(|p| std::fs::symlink_metadata(p).ok())
                .map(|m| m.len()),
            files: group.paths.iter().map(|p| path_string(p)).collect(),
        }
    }

    /// Capture every group, in order, while its files are still on disk.
    #[must_use]
    pub fn capture_all(groups: &[DuplicateGroup]) -> Vec<Self> {
        groups.iter().map(Self::from_duplicate_group).collect()
    }
}

/// A recoverable scan error in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonWarning {
    /// Path that was skipped
    pub path: String,
    /// Human-readable reason
    pub message: String,
}

impl From<&ScanError> for JsonWarning {
    fn from(err: &ScanError) -> Self {
        Self {
            path: path_string(err.path()),
            message: err.to_string(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Regular files discovered
    pub total_files: usize,
    /// Files successfully hashed
    pub hashed_files: usize,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Files that are not the first of their group
    pub duplicate_files: usize,
    /// Duration of the scan in milliseconds
    pub scan_duration_ms: u64,
    /// Recoverable scan errors
    pub warnings: Vec<JsonWarning>,
}

impl From<&ScanSummary> for JsonSummary {
    fn from(summary: &ScanSummary) -> Self {
        Self {
            total_files: summary.total_files,
            hashed_files: summary.hashed_files,
            duplicate_groups: summary.duplicate_groups,
            duplicate_files: summary.duplicate_files,
            scan_duration_ms: u64::try_from(summary.scan_duration.as_millis()).unwrap_or(u64::MAX),
            warnings: summary.scan_errors.iter().map(JsonWarning::from).collect(),
        }
    }
}

/// Complete JSON document.
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    /// Scanned root
    pub root: String,
    /// Duplicate groups in listing order
    pub duplicates: Vec<JsonDuplicateGroup>,
    /// Scan statistics
    pub summary: JsonSummary,
    /// Policy outcome, absent for a listing-only run
    pub report: Option<&'a PolicyReport>,
    /// Whether deletions were simulated
    pub dry_run: bool,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "DS000")
    pub exit_code_name: String,
}

impl<'a> JsonOutput<'a> {
    /// Build the document from groups captured before the policy ran.
    #[must_use]
    pub fn new(
        root: &Path,
        duplicates: Vec<JsonDuplicateGroup>,
        summary: &ScanSummary,
        report: Option<&'a PolicyReport>,
        dry_run: bool,
        exit_code: ExitCode,
    ) -> Self {
        Self {
            root: path_string(root),
            duplicates,
            summary: JsonSummary::from(summary),
            report,
            dry_run,
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
        }
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty-printed JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        Ok(())
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

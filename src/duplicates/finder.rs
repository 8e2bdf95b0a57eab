//! Duplicate finder: walk, hash, group.
//!
//! # Overview
//!
//! This module orchestrates one scan:
//! 1. **Walk** - Collect every regular file under the root in traversal order
//! 2. **Hash** - Fingerprint each file on a bounded rayon pool
//! 3. **Group** - Merge results sequentially, in traversal order, into
//!    [`DuplicateGroup`]s (see [`crate::duplicates::groups`])
//!
//! Hashing may complete in any order; the collect step keeps input order, so
//! the retained "first seen" file never depends on thread scheduling.
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default().with_io_threads(2));
//! let result = finder.scan(Path::new(".")).unwrap();
//! for group in &result.groups {
//!     println!("{}: {} copies", group.fingerprint, group.len());
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use super::groups::{group_by_fingerprint, DuplicateGroup};
use crate::progress::{PhaseCounter, ProgressCallback, PHASE_HASHING, PHASE_WALKING};
use crate::scanner::{FileRecord, HashError, Hasher, ScanError, Walker, WalkerConfig};

/// Configuration for a duplicate scan.
#[derive(Clone)]
pub struct FinderConfig {
    /// Number of threads used for hashing. Default is 4 to avoid disk thrashing.
    pub io_threads: usize,
    /// Read buffer size for hashing, in bytes.
    pub buffer_size: usize,
    /// Directory walking options.
    pub walker_config: WalkerConfig,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("io_threads", &self.io_threads)
            .field("buffer_size", &self.buffer_size)
            .field("walker_config", &self.walker_config)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            io_threads: 4,
            buffer_size: crate::scanner::DEFAULT_BUFFER_SIZE,
            walker_config: WalkerConfig::default(),
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Set the number of hashing threads (at least 1).
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }

    /// Set the hashing read buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Summary statistics from a duplicate scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Regular files discovered by the walk
    pub total_files: usize,
    /// Files successfully hashed
    pub hashed_files: usize,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Files that are not the first of their group
    pub duplicate_files: usize,
    /// Duration of the entire scan
    pub scan_duration: Duration,
    /// Recoverable errors encountered during the scan
    pub scan_errors: Vec<ScanError>,
}

impl ScanSummary {
    /// Whether any recoverable error was recorded.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.scan_errors.is_empty()
    }
}

/// Outcome of [`DuplicateFinder::scan`].
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Duplicate groups in creation order
    pub groups: Vec<DuplicateGroup>,
    /// Scan statistics and warnings
    pub summary: ScanSummary,
}

impl ScanResult {
    /// True when no duplicates were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Errors that abort a scan before it starts.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The provided path does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Duplicate finder.
///
/// Holds no state between scans; every call to [`scan`](Self::scan)
/// recomputes every fingerprint.
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let hasher = Hasher::new().with_buffer_size(config.buffer_size);
        Self { config, hasher }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Scan `root` and return its duplicate groups.
    ///
    /// Unreadable files and directories do not abort the scan; they are
    /// logged and collected in [`ScanSummary::scan_errors`].
    ///
    /// # Errors
    ///
    /// Returns [`FinderError`] if `root` does not exist or is not a directory.
    pub fn scan(&self, root: &Path) -> Result<ScanResult, FinderError> {
        let start_time = Instant::now();

        if !root.exists() {
            return Err(FinderError::PathNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(FinderError::NotADirectory(root.to_path_buf()));
        }

        log::info!("Starting duplicate scan of {}", root.display());

        let mut summary = ScanSummary::default();
        let callback = self.config.progress_callback.as_deref();

        let walking = PhaseCounter::start(callback, PHASE_WALKING, 0);
        let mut files = Vec::new();
        for result in Walker::new(root, self.config.walker_config.clone()).walk() {
            match result {
                Ok(path) => {
                    walking.tick(&path);
                    files.push(path);
                }
                Err(e) => summary.scan_errors.push(e),
            }
        }
        walking.finish(PHASE_WALKING);
        summary.total_files = files.len();
        log::info!("Discovered {} files", files.len());

        let hashed = self.hash_all(files, callback);

        let mut records = Vec::with_capacity(hashed.len());
        for (path, result) in hashed {
            match result {
                Ok(fingerprint) => records.push(FileRecord::new(path, fingerprint)),
                Err(e) => {
                    log::warn!("Skipping unreadable file: {}", e);
                    summary.scan_errors.push(e.into());
                }
            }
        }
        summary.hashed_files = records.len();

        let groups = group_by_fingerprint(records);
        summary.duplicate_groups = groups.len();
        summary.duplicate_files = groups.iter().map(DuplicateGroup::duplicate_count).sum();
        summary.scan_duration = start_time.elapsed();

        log::info!(
            "Scan complete: {} files, {} duplicate groups, {} redundant copies, {} warnings in {:.2?}",
            summary.total_files,
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.scan_errors.len(),
            summary.scan_duration
        );

        Ok(ScanResult { groups, summary })
    }

    /// Hash every path, returning results in the same order as the input.
    fn hash_all(
        &self,
        files: Vec<PathBuf>,
        callback: Option<&dyn ProgressCallback>,
    ) -> Vec<(PathBuf, Result<crate::scanner::Fingerprint, HashError>)> {
        let counter = PhaseCounter::start(callback, PHASE_HASHING, files.len());
        let hash_one = |path: PathBuf| {
            let result = self.hasher.full_hash(&path);
            counter.tick(&path);
            (path, result)
        };

        let results: Vec<_> = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.io_threads)
            .build()
        {
            // into_par_iter().map().collect() preserves input order
            Ok(pool) => pool.install(|| files.into_par_iter().map(hash_one).collect()),
            Err(e) => {
                log::warn!("Failed to create hashing thread pool ({}), hashing sequentially", e);
                files.into_iter().map(hash_one).collect()
            }
        };

        counter.finish(PHASE_HASHING);
        results
    }
}

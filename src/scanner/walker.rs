//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory tree
//! and yielding every regular file beneath it. Traversal is depth-first and
//! entries within each directory are visited in file-name order, so the
//! sequence of discovered files is reproducible across runs and platforms.
//! That order decides which file of a duplicate group counts as "first seen".
//!
//! # Skipped entries
//!
//! - Symbolic links are never followed and never yielded.
//! - Special files (sockets, FIFOs, devices) are never yielded.
//! - Unreadable directories produce a [`ScanError`] item; the walk continues.
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), WalkerConfig::default());
//! let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();
//! println!("Found {} files", files.len());
//! ```

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::{ScanError, WalkerConfig};

/// Deterministic directory walker.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - Root directory to scan
    /// * `config` - Walker configuration options
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    fn is_hidden(entry: &DirEntry) -> bool {
        // The root itself is never filtered, even if its name starts with '.'
        entry.depth() > 0
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with('.'))
    }

    /// Walk the directory tree, yielding regular file paths.
    ///
    /// Errors are yielded as [`ScanError`] values rather than stopping
    /// iteration.
    pub fn walk(&self) -> impl Iterator<Item = Result<PathBuf, ScanError>> + '_ {
        let mut walk_dir = WalkDir::new(&self.root)
            .follow_links(false)
            .min_depth(1)
            .sort_by_file_name();

        if let Some(depth) = self.config.max_depth {
            walk_dir = walk_dir.max_depth(depth);
        }

        let skip_hidden = self.config.skip_hidden;

        walk_dir
            .into_iter()
            .filter_entry(move |entry| !(skip_hidden && Self::is_hidden(entry)))
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => self.process_entry(entry),
                Err(e) => {
                    let path = e
                        .path()
                        .map_or_else(|| self.root.clone(), Path::to_path_buf);
                    let err = match e.into_io_error() {
                        Some(io) => ScanError::from_io(path, io),
                        None => ScanError::Io {
                            path,
                            source: std::io::Error::other("directory traversal error"),
                        },
                    };
                    log::warn!("Traversal error: {}", err);
                    Some(Err(err))
                }
            })
    }

    /// Decide whether a walked entry is yielded.
    fn process_entry(&self, entry: DirEntry) -> Option<Result<PathBuf, ScanError>> {
        let file_type = entry.file_type();

        if file_type.is_dir() {
            return None;
        }

        if file_type.is_symlink() {
            log::debug!("Skipping symlink: {}", entry.path().display());
            return None;
        }

        if !file_type.is_file() {
            log::debug!("Skipping special file: {}", entry.path().display());
            return None;
        }

        log::trace!("Discovered: {}", entry.path().display());
        Some(Ok(entry.into_path()))
    }
}

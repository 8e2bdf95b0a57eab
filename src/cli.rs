//! Command-line interface definitions for dupsweep.
//!
//! This module defines all CLI arguments and options using the clap derive API.
//! Anything not given on the command line is asked for interactively, so
//! `dupsweep` with no arguments behaves like a guided prompt session.
//!
//! # Example
//!
//! ```bash
//! # Fully interactive: prompts for the directory, policy and selection
//! dupsweep
//!
//! # Keep the first copy of every duplicate, no questions asked
//! dupsweep ~/Downloads --policy auto
//!
//! # Delete listing entries 2 and 5
//! dupsweep ~/Downloads --policy manual --select 2,5
//!
//! # Machine-readable listing only
//! dupsweep ~/Downloads --list-only --output json
//! ```

use bytesize::ByteSize;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::actions::PolicyKind;
use crate::scanner::{MAX_BUFFER_SIZE, MIN_BUFFER_SIZE};

/// Find files with identical content and remove redundant copies.
///
/// Files are compared by SHA-256 of their content. Deletion is permanent.
#[derive(Debug, Parser)]
#[command(name = "dupsweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan (prompted for when omitted)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Deletion policy (prompted for when omitted)
    #[arg(short, long, value_enum, value_name = "POLICY")]
    pub policy: Option<PolicyArg>,

    /// Comma-separated listing indices to delete with the manual policy (e.g. 1,3,5)
    #[arg(short, long, value_name = "LIST")]
    pub select: Option<String>,

    /// Scan and list duplicate groups without deleting anything
    #[arg(long, conflicts_with_all = ["policy", "select", "dry_run"])]
    pub list_only: bool,

    /// Report what would be deleted without deleting
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Number of threads used for hashing
    #[arg(long, value_name = "N", default_value = "4")]
    pub io_threads: usize,

    /// Read buffer size for hashing, 4KiB to 16MiB (e.g. 64KiB, 1MiB)
    #[arg(long, value_name = "SIZE", default_value = "64KiB", value_parser = parse_buffer_size)]
    pub buffer_size: u64,

    /// Skip hidden files and directories (starting with .)
    #[arg(long)]
    pub skip_hidden: bool,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Report fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Deletion policy as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Choose files to delete by listing index
    Manual,
    /// Keep the first-discovered file of every group, delete the rest
    #[value(alias = "automatic")]
    Auto,
}

impl From<PolicyArg> for PolicyKind {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Manual => PolicyKind::Manual,
            PolicyArg::Auto => PolicyKind::Automatic,
        }
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing and report
    Text,
    /// One JSON document on stdout; never prompts
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Parse a human-readable size string into bytes.
///
/// Supports suffixes: B, KB/K, KiB, MB/M, MiB, GB/G, GiB (case-insensitive).
///
/// # Errors
///
/// Returns an error message if the number or suffix is invalid.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }

    // Find where the number ends and the suffix begins
    let (num_str, suffix) = match s.find(|c: char| !c.is_ascii_digit() && c != '.') {
        Some(idx) => (&s[..idx], s[idx..].trim().to_uppercase()),
        None => (s, String::new()),
    };

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number: '{num_str}'"))?;

    let multiplier: u64 = match suffix.as_str() {
        "" | "B" => 1,
        "KB" | "K" => 1_000,
        "KIB" => 1_024,
        "MB" | "M" => 1_000_000,
        "MIB" => 1_048_576,
        "GB" | "G" => 1_000_000_000,
        "GIB" => 1_073_741_824,
        _ => return Err(format!("Unknown size suffix: '{suffix}'")),
    };

    Ok((num * multiplier as f64) as u64)
}

/// Parse a buffer size and check it against the hasher's limits.
///
/// # Errors
///
/// Returns an error message if the size is malformed or out of range.
pub fn parse_buffer_size(s: &str) -> Result<u64, String> {
    let size = parse_size(s)?;
    let range = MIN_BUFFER_SIZE as u64..=MAX_BUFFER_SIZE as u64;
    if !range.contains(&size) {
        return Err(format!(
            "Buffer size must be between {} and {}",
            ByteSize::b(*range.start()),
            ByteSize::b(*range.end())
        ));
    }
    Ok(size)
}

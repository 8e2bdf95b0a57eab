//! Human-readable output for the interactive shell.
//!
//! Renders the numbered listing, the policy report and scan warnings.
//! Colours come from `yansi`; the shell disables them globally for
//! `--no-color` or a non-terminal stdout.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use bytesize::ByteSize;
use yansi::Paint;

use crate::actions::{Listing, PolicyKind, PolicyReport};
use crate::duplicates::ScanSummary;

/// Size of a file if it can still be read.
fn file_size(path: &Path) -> Option<u64> {
    fs::symlink_metadata(path).ok().map(|m| m.len())
}

/// Write the numbered listing, one block per duplicate group.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_listing<W: Write + ?Sized>(out: &mut W, listing: &Listing) -> io::Result<()> {
    writeln!(out, "{}", "Duplicate files:".bold())?;

    for group in 0..listing.group_count() {
        let entries = listing.group_entries(group);
        let Some(first) = entries.first() else {
            continue;
        };

        writeln!(out)?;
        match file_size(&first.path) {
            Some(size) => writeln!(
                out,
                "Hash: {} ({} files, {} each, {} reclaimable)",
                first.fingerprint.to_hex().cyan(),
                entries.len(),
                ByteSize::b(size),
                ByteSize::b(size * (entries.len() as u64 - 1))
            )?,
            None => writeln!(
                out,
                "Hash: {} ({} files)",
                first.fingerprint.to_hex().cyan(),
                entries.len()
            )?,
        }

        for entry in entries {
            writeln!(out, "  {}. {}", entry.index.yellow(), entry.path.display())?;
        }
    }

    Ok(())
}

/// Write the policy choice menu.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_policy_menu<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "How should duplicates be removed?")?;
    writeln!(out, "  1. Manual - choose files by number")?;
    writeln!(out, "  2. Automatic - keep the first file of each group")?;
    Ok(())
}

/// Write the outcome of a policy run, including every diagnostic.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_report<W: Write + ?Sized>(
    out: &mut W,
    report: &PolicyReport,
    dry_run: bool,
) -> io::Result<()> {
    for diagnostic in &report.diagnostics {
        writeln!(out, "{} {}", "warning:".yellow().bold(), diagnostic)?;
    }

    if report.nothing_to_delete() {
        writeln!(out, "Nothing to delete.")?;
        return Ok(());
    }

    let verb = if dry_run { "Would delete" } else { "Deleted" };
    for path in &report.deleted {
        writeln!(out, "{}: {}", verb.red(), path.display())?;
    }
    for failure in &report.failures {
        writeln!(
            out,
            "{} could not delete {}: {}",
            "error:".red().bold(),
            failure.path.display(),
            failure.error
        )?;
    }

    writeln!(out)?;
    match report.policy {
        PolicyKind::Manual => writeln!(
            out,
            "{} {} file(s), {} failed, {} freed",
            verb,
            report.deleted_count().bold(),
            report.failures.len(),
            ByteSize::b(report.bytes_freed)
        )?,
        PolicyKind::Automatic => writeln!(
            out,
            "{} {} file(s), kept {}, {} failed, {} freed",
            verb,
            report.deleted_count().bold(),
            report.kept.bold(),
            report.failures.len(),
            ByteSize::b(report.bytes_freed)
        )?,
    }

    Ok(())
}

/// Write recoverable scan errors, one per line.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_scan_warnings<W: Write + ?Sized>(out: &mut W, summary: &ScanSummary) -> io::Result<()> {
    for err in &summary.scan_errors {
        writeln!(out, "{} skipped: {}", "warning:".yellow().bold(), err)?;
    }
    Ok(())
}

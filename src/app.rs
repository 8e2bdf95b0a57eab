//! Application shell: prompts, scan, policy and report.
//!
//! [`run_app`] wires the process streams into [`run_session`], which is
//! generic over its input and output so whole sessions can be driven from
//! tests with in-memory buffers.
//!
//! Session flow:
//!
//! 1. Obtain the root (from `PATH` or a prompt) and scan it
//! 2. Print the numbered listing, or "No duplicate files found."
//! 3. Pick a policy (from `--policy` or the menu)
//! 4. Manual: read the selection (from `--select` or a prompt); Automatic: keep
//!    the first file of each group
//! 5. Print the report
//!
//! JSON output never prompts and prints one document at the end.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use crate::actions::{
    apply_automatic, apply_manual, DryRunRemover, FileRemover, Listing, PermanentRemover,
    PolicyKind, PolicyReport,
};
use crate::cli::{Cli, OutputFormat};
use crate::duplicates::{DuplicateFinder, FinderConfig, ScanResult, ScanSummary};
use crate::error::ExitCode;
use crate::logging::init_logging;
use crate::output::json::JsonDuplicateGroup;
use crate::output::text::{write_listing, write_policy_menu, write_report, write_scan_warnings};
use crate::output::JsonOutput;
use crate::progress::{DeleteProgress, Progress};
use crate::scanner::WalkerConfig;

const DIRECTORY_PROMPT: &str = "Directory to scan:";
const POLICY_PROMPT: &str = "Choice [1]:";
const SELECTION_PROMPT: &str = "Enter file numbers to delete, separated by commas (e.g. 1,3,5):";

/// Run the application against the process's stdin and stdout.
///
/// # Errors
///
/// Returns an error if the root is invalid or a stream fails.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    init_logging(cli.verbose, cli.quiet);

    if cli.no_color || !io::stdout().is_terminal() {
        yansi::disable();
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&cli, &mut stdin.lock(), &mut stdout.lock())
}

/// Run one session with explicit input and output streams.
///
/// # Errors
///
/// Returns an error if the root is missing or not a directory, or if reading
/// or writing a stream fails. Per-file problems are reported, not returned.
pub fn run_session<R: BufRead, W: Write>(cli: &Cli, input: &mut R, out: &mut W) -> Result<ExitCode> {
    let root = match &cli.path {
        Some(path) => path.clone(),
        None if cli.output == OutputFormat::Text => prompt_directory(input, out)?,
        None => bail!("A directory argument is required with --output {}", cli.output),
    };

    log::info!("Scanning {}", root.display());
    let result = DuplicateFinder::new(finder_config(cli))
        .scan(&root)
        .context("Cannot scan")?;

    match cli.output {
        OutputFormat::Text => run_text(cli, &result, input, out),
        OutputFormat::Json => run_json(cli, &root, &result, out),
    }
}

fn run_text<R: BufRead, W: Write>(
    cli: &Cli,
    result: &ScanResult,
    input: &mut R,
    out: &mut W,
) -> Result<ExitCode> {
    write_scan_warnings(out, &result.summary)?;

    if result.is_empty() {
        writeln!(out, "No duplicate files found.")?;
        return Ok(ExitCode::NoDuplicates);
    }

    let listing = Listing::build(&result.groups);
    write_listing(out, &listing)?;

    if cli.list_only {
        return Ok(exit_code(&result.summary, None));
    }

    let policy = match cli.policy {
        Some(arg) => PolicyKind::from(arg),
        None => {
            write_policy_menu(out)?;
            PolicyKind::from_choice(&prompt(input, out, POLICY_PROMPT)?)
        }
    };
    log::debug!("Policy: {:?}", policy);

    let remover = remover_for(cli.dry_run);
    let progress = DeleteProgress::new(cli.quiet);
    let report = match policy {
        PolicyKind::Manual => {
            let raw = match &cli.select {
                Some(select) => select.clone(),
                None => {
                    writeln!(out)?;
                    prompt(input, out, SELECTION_PROMPT)?
                }
            };
            apply_manual(&listing, &raw, remover, Some(&progress))
        }
        PolicyKind::Automatic => apply_automatic(&result.groups, remover, Some(&progress)),
    };

    writeln!(out)?;
    write_report(out, &report, cli.dry_run)?;

    Ok(exit_code(&result.summary, Some(&report)))
}

fn run_json<W: Write>(cli: &Cli, root: &Path, result: &ScanResult, out: &mut W) -> Result<ExitCode> {
    // Sizes must be read before any file is removed
    let duplicates = JsonDuplicateGroup::capture_all(&result.groups);

    let report = match cli.policy.map(PolicyKind::from) {
        _ if result.is_empty() || cli.list_only => None,
        Some(PolicyKind::Manual) => {
            let listing = Listing::build(&result.groups);
            let raw = cli.select.as_deref().unwrap_or_default();
            Some(apply_manual(&listing, raw, remover_for(cli.dry_run), None))
        }
        Some(PolicyKind::Automatic) => Some(apply_automatic(
            &result.groups,
            remover_for(cli.dry_run),
            None,
        )),
        None => None,
    };

    let code = if result.is_empty() {
        ExitCode::NoDuplicates
    } else {
        exit_code(&result.summary, report.as_ref())
    };

    JsonOutput::new(
        root,
        duplicates,
        &result.summary,
        report.as_ref(),
        cli.dry_run,
        code,
    )
    .write_to(out)?;

    Ok(code)
}

fn finder_config(cli: &Cli) -> FinderConfig {
    let config = FinderConfig::default()
        .with_io_threads(cli.io_threads)
        .with_buffer_size(usize::try_from(cli.buffer_size).unwrap_or(usize::MAX))
        .with_walker_config(WalkerConfig::new(None, cli.skip_hidden));

    if cli.quiet || cli.output == OutputFormat::Json {
        config
    } else {
        config.with_progress_callback(Arc::new(Progress::new(false)))
    }
}

fn remover_for(dry_run: bool) -> &'static dyn FileRemover {
    if dry_run {
        &DryRunRemover
    } else {
        &PermanentRemover
    }
}

/// Per-file problems anywhere in the run downgrade success to partial.
fn exit_code(summary: &ScanSummary, report: Option<&PolicyReport>) -> ExitCode {
    if summary.has_warnings() || report.is_some_and(PolicyReport::has_failures) {
        ExitCode::PartialSuccess
    } else {
        ExitCode::Success
    }
}

fn prompt_directory<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<PathBuf> {
    let answer = prompt(input, out, DIRECTORY_PROMPT)?;
    if answer.is_empty() {
        bail!("No directory given");
    }
    Ok(PathBuf::from(answer))
}

/// Print `question`, then read one trimmed line. End of input reads as empty.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<String> {
    write!(out, "{question} ")?;
    out.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}

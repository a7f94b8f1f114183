//! kline-preflight: check local chart images against the upload policy.
//!
//! Runs each file through the same staging controller the web form
//! uses and reports which files would be submitted and why the others
//! would be rejected. Only file metadata is inspected, plus the first
//! few bytes when `--sniff` is given.
//!
//! # Usage
//!
//! ```text
//! cargo run --bin kline-preflight -- [OPTIONS] <PATHS>...
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use kline_staging::{
    FileMeta, FileStagingController, MIB, StagingError, ValidationPolicy, format_mib,
    mime_for_filename,
};
use serde::Serialize;

/// Bytes read from each file when sniffing its format.
const SNIFF_LEN: u64 = 64;

/// Check which chart images would be accepted for upload.
///
/// Applies the size, format and duplicate checks of the upload form to
/// local files, in the order given.
#[derive(Parser)]
#[command(name = "kline-preflight", version)]
struct Cli {
    /// Image files to check.
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Size limit per file in MiB.
    #[arg(long, default_value_t = ValidationPolicy::DEFAULT_MAX_SIZE_BYTES / MIB)]
    max_size_mib: u64,

    /// Full validation policy as a JSON string.
    ///
    /// When provided, `--max-size-mib` is ignored. Missing fields take
    /// their default values.
    #[arg(long)]
    policy_json: Option<String>,

    /// Detect the format from file contents instead of the extension.
    #[arg(long)]
    sniff: bool,

    /// Print the report as JSON instead of human-readable text.
    #[arg(long)]
    json: bool,
}

/// Outcome for one input path.
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Entry {
    /// Accepted into the staging list.
    Staged { path: PathBuf, meta: FileMeta },
    /// Rejected by validation.
    Rejected {
        path: PathBuf,
        meta: FileMeta,
        kind: &'static str,
        reason: String,
    },
    /// Could not be inspected at all.
    Unreadable { path: PathBuf, reason: String },
}

/// Full preflight report.
#[derive(Serialize)]
struct Report {
    policy: ValidationPolicy,
    field_name: Option<&'static str>,
    entries: Vec<Entry>,
    staged: usize,
    total_size_bytes: u64,
}

/// Build a [`ValidationPolicy`] from CLI arguments.
fn policy_from_cli(cli: &Cli) -> Result<ValidationPolicy, String> {
    if let Some(ref json) = cli.policy_json {
        return serde_json::from_str(json).map_err(|e| format!("Error parsing --policy-json: {e}"));
    }

    let max_size_bytes = cli
        .max_size_mib
        .checked_mul(MIB)
        .ok_or_else(|| format!("--max-size-mib {} is too large", cli.max_size_mib))?;

    Ok(ValidationPolicy {
        max_size_bytes,
        ..ValidationPolicy::default()
    })
}

/// Determine the MIME type of `path`, or an empty string if unknown.
fn mime_type_of(path: &Path, sniff: bool) -> std::io::Result<String> {
    if sniff {
        let mut head = Vec::new();
        File::open(path)?.take(SNIFF_LEN).read_to_end(&mut head)?;
        return Ok(image::guess_format(&head)
            .map(|format| format.to_mime_type().to_owned())
            .unwrap_or_default());
    }
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    Ok(mime_for_filename(&name).unwrap_or_default().to_owned())
}

/// Read the metadata the browser would report for `path`.
fn inspect(path: &Path, sniff: bool) -> std::io::Result<FileMeta> {
    let metadata = std::fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(std::io::Error::other("not a regular file"));
    }
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    Ok(FileMeta::new(name, metadata.len(), mime_type_of(path, sniff)?))
}

/// Stage every path in order, recording the outcome of each.
fn run(
    paths: &[PathBuf],
    sniff: bool,
    controller: &mut FileStagingController<PathBuf>,
) -> Vec<Entry> {
    paths
        .iter()
        .map(|path| {
            let meta = match inspect(path, sniff) {
                Ok(meta) => meta,
                Err(e) => {
                    return Entry::Unreadable {
                        path: path.clone(),
                        reason: e.to_string(),
                    };
                }
            };
            match controller.add_candidate(meta.clone(), path.clone()) {
                Ok(()) => Entry::Staged {
                    path: path.clone(),
                    meta,
                },
                Err(e) => Entry::Rejected {
                    path: path.clone(),
                    meta,
                    kind: e.kind(),
                    reason: e.to_string(),
                },
            }
        })
        .collect()
}

/// Print the human-readable report.
fn print_report(report: &Report, controller: &FileStagingController<PathBuf>) {
    for entry in &report.entries {
        match entry {
            Entry::Staged { .. } => {}
            Entry::Rejected { path, reason, .. } => {
                println!("rejected    {}: {reason}", path.display());
            }
            Entry::Unreadable { path, reason } => {
                println!("unreadable  {}: {reason}", path.display());
            }
        }
    }

    let rendered = controller.render();
    if rendered.visible {
        println!();
        println!("{:<4} {:<40} {:>10}", "#", "File", "Size");
        println!("{}", "-".repeat(56));
        for row in &rendered.rows {
            println!("{:<4} {:<40} {:>10}", row.index + 1, row.name, row.size_label);
        }
    }

    println!();
    match report.field_name {
        Some(field) => println!(
            "{} of {} file(s) would be submitted as `{field}` ({} total)",
            report.staged,
            report.entries.len(),
            format_mib(report.total_size_bytes),
        ),
        None => println!("{}", StagingError::EmptySubmission),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let policy = match policy_from_cli(&cli) {
        Ok(p) => p,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    eprintln!(
        "Policy: up to {} per file, formats: {}",
        format_mib(policy.max_size_bytes),
        policy.allowed_mime_types.join(", "),
    );

    let mut controller = FileStagingController::new(policy.clone());
    let entries = run(&cli.paths, cli.sniff, &mut controller);

    let staged = controller.files().len();
    let total_size_bytes = controller.files().total_size();
    let submission = controller.prepare_submission();

    let report = Report {
        policy,
        field_name: submission.as_ref().ok().map(|s| s.field_name),
        entries,
        staged,
        total_size_bytes,
    };

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing report: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_report(&report, &controller);
    }

    if submission.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

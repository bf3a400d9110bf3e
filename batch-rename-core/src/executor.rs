use crate::planner::{find_operation_conflicts, RenameOperation};
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Why a rename was not performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Another operation in the same batch targets the same destination
    Conflict,
    /// The destination is not a plain file name in the source's folder
    InvalidName,
    /// Something already exists at the destination
    DestinationExists,
    /// The source file is gone
    SourceMissing,
    /// Any other filesystem error
    Io,
}

/// Result of one rename attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameOutcome {
    pub source: PathBuf,
    /// Where the file now lives; only set when the rename succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<PathBuf>,
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RenameOutcome {
    fn success(operation: &RenameOperation) -> Self {
        Self {
            source: operation.source.clone(),
            destination: Some(operation.destination.clone()),
            succeeded: true,
            failure: None,
            error: None,
        }
    }

    fn failure(operation: &RenameOperation, kind: FailureKind, detail: String) -> Self {
        Self {
            source: operation.source.clone(),
            destination: None,
            succeeded: false,
            failure: Some(kind),
            error: Some(detail),
        }
    }
}

/// Options for applying a batch of renames
#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    /// Issue the renames on the rayon thread pool. Outcomes keep input order.
    pub parallel: bool,
    /// Append a timestamped line per attempt to this file
    pub log_file: Option<PathBuf>,
}

/// Outcomes of a batch apply plus totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReport {
    pub outcomes: Vec<RenameOutcome>,
    pub succeeded: usize,
    pub failed: usize,
}

impl ApplyReport {
    pub fn from_outcomes(outcomes: Vec<RenameOutcome>) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.succeeded).count();
        let failed = outcomes.len() - succeeded;
        Self {
            outcomes,
            succeeded,
            failed,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &RenameOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded)
    }
}

/// Journal of an apply, written to the optional log file
struct ApplyJournal {
    file: Option<Mutex<File>>,
}

impl ApplyJournal {
    fn open(log_file: Option<&Path>) -> Result<Self> {
        let file = if let Some(path) = log_file {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory {}", parent.display())
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open apply log {}", path.display()))?;
            Some(Mutex::new(file))
        } else {
            None
        };
        Ok(Self { file })
    }

    fn log(&self, message: &str) {
        let Some(ref file) = self.file else {
            return;
        };
        let Ok(mut file) = file.lock() else {
            return;
        };
        let line = format!(
            "[{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            message
        );
        if let Err(e) = writeln!(file, "{}", line).and_then(|()| file.flush()) {
            warn!(error = %e, "Failed to write apply log");
        }
    }
}

/// Apply renames one after another, in order. Never fails as a whole:
/// every operation gets an outcome at the same index.
pub fn apply(operations: &[RenameOperation]) -> Vec<RenameOutcome> {
    let journal = ApplyJournal { file: None };
    run_batch(operations, false, &journal)
}

/// Apply a batch of renames.
///
/// Per-operation failures are reported in the returned [`ApplyReport`]. An
/// `Err` means the batch could not start at all and nothing was renamed.
pub fn apply_batch(operations: &[RenameOperation], options: &ApplyOptions) -> Result<ApplyReport> {
    let journal = ApplyJournal::open(options.log_file.as_deref())?;
    journal.log(&format!("Applying {} renames", operations.len()));

    let outcomes = run_batch(operations, options.parallel, &journal);
    let report = ApplyReport::from_outcomes(outcomes);

    journal.log(&format!(
        "Apply finished: {} renamed, {} failed",
        report.succeeded, report.failed
    ));
    Ok(report)
}

fn run_batch(
    operations: &[RenameOperation],
    parallel: bool,
    journal: &ApplyJournal,
) -> Vec<RenameOutcome> {
    let conflicts: HashMap<PathBuf, usize> = find_operation_conflicts(operations)
        .into_iter()
        .map(|c| (c.destination, c.sources.len()))
        .collect();

    let run = |operation: &RenameOperation| {
        let outcome = match conflicts.get(&operation.destination) {
            Some(count) => RenameOutcome::failure(
                operation,
                FailureKind::Conflict,
                format!(
                    "{} files would be renamed to {}",
                    count,
                    operation.destination.display()
                ),
            ),
            None => rename_one(operation, journal),
        };
        if let Some(ref detail) = outcome.error {
            warn!(source = %operation.source.display(), "{}", detail);
            journal.log(&format!("Failed: {}", detail));
        }
        outcome
    };

    if parallel {
        operations.par_iter().map(run).collect()
    } else {
        operations.iter().map(run).collect()
    }
}

fn rename_one(operation: &RenameOperation, journal: &ApplyJournal) -> RenameOutcome {
    let from = operation.source.as_path();
    let to = operation.destination.as_path();

    if !stays_in_folder(from, to) {
        return RenameOutcome::failure(
            operation,
            FailureKind::InvalidName,
            format!("Invalid file name for {}: {}", from.display(), to.display()),
        );
    }

    if from == to {
        return RenameOutcome::success(operation);
    }

    if let Err(e) = fs::symlink_metadata(from) {
        return RenameOutcome::failure(
            operation,
            classify(&e),
            format!("Cannot rename {}: {}", from.display(), e),
        );
    }

    // Only a case-only change may find its own source at the destination
    let destination_taken = fs::symlink_metadata(to).is_ok();
    let same_file = destination_taken
        && is_case_only_change(from, to)
        && !has_exact_entry(to).unwrap_or(true);
    if destination_taken && !same_file {
        return RenameOutcome::failure(
            operation,
            FailureKind::DestinationExists,
            format!("Destination already exists: {}", to.display()),
        );
    }

    journal.log(&format!("Renaming {} -> {}", from.display(), to.display()));
    let result = if same_file {
        rename_via_temp(from, to)
    } else {
        fs::rename(from, to)
    };

    match result {
        Ok(()) => {
            debug!(from = %from.display(), to = %to.display(), "Renamed");
            journal.log(&format!("Renamed {} -> {}", from.display(), to.display()));
            RenameOutcome::success(operation)
        },
        Err(e) => RenameOutcome::failure(
            operation,
            classify(&e),
            format!("Failed to rename {} to {}: {}", from.display(), to.display(), e),
        ),
    }
}

/// True when `to` is a plain file name next to `from`
fn stays_in_folder(from: &Path, to: &Path) -> bool {
    let Some(name) = to.file_name() else {
        return false;
    };
    if name.is_empty() || name == "." || name == ".." {
        return false;
    }
    to.parent() == from.parent()
}

fn is_case_only_change(from: &Path, to: &Path) -> bool {
    from != to && from.to_string_lossy().to_lowercase() == to.to_string_lossy().to_lowercase()
}

/// True when the folder of `path` holds an entry with exactly its name.
///
/// On a case-insensitive filesystem `README.md` resolves to an existing
/// `readme.md`; only the folder listing tells the two apart.
fn has_exact_entry(path: &Path) -> io::Result<bool> {
    let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
        return Ok(false);
    };
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    for entry in fs::read_dir(parent)? {
        if entry?.file_name() == name {
            return Ok(true);
        }
    }
    Ok(false)
}

/// A name next to `from` that nothing occupies yet
fn temp_path(from: &Path) -> io::Result<PathBuf> {
    let name = from.file_name().unwrap_or_default().to_string_lossy();
    let pid = std::process::id();
    for attempt in 0..100u32 {
        let candidate = if attempt == 0 {
            from.with_file_name(format!("{name}.{pid}.batch-rename.tmp"))
        } else {
            from.with_file_name(format!("{name}.{pid}-{attempt}.batch-rename.tmp"))
        };
        match fs::symlink_metadata(&candidate) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(candidate),
            _ => {},
        }
    }
    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("no free temporary name next to {}", from.display()),
    ))
}

/// Two-step rename so case-only changes work on case-insensitive filesystems
fn rename_via_temp(from: &Path, to: &Path) -> io::Result<()> {
    let temp_name = temp_path(from)?;
    fs::rename(from, &temp_name)?;
    if let Err(e) = fs::rename(&temp_name, to) {
        if let Err(rollback) = fs::rename(&temp_name, from) {
            return Err(io::Error::new(
                e.kind(),
                format!(
                    "{e}; moving it back also failed ({rollback}), the file is now at {}",
                    temp_name.display()
                ),
            ));
        }
        return Err(e);
    }
    Ok(())
}

fn classify(error: &io::Error) -> FailureKind {
    match error.kind() {
        io::ErrorKind::NotFound => FailureKind::SourceMissing,
        io::ErrorKind::AlreadyExists => FailureKind::DestinationExists,
        _ => FailureKind::Io,
    }
}

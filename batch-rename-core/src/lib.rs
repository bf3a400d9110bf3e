#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod executor;
pub mod lister;
pub mod operations;
pub mod output;
pub mod planner;
pub mod preview;
pub mod rule;
pub mod session;

pub use config::Config;
pub use error::{ListError, SessionError};
pub use executor::{apply, apply_batch, ApplyOptions, ApplyReport, FailureKind, RenameOutcome};
pub use lister::{list_files, list_files_with, FileEntry, ListOptions};
pub use operations::{apply_operation, list_operation, plan_operation};
pub use output::{
    ApplyResult, ListResult, OutputFormat, OutputFormatter, PlanResult, VersionResult,
};
pub use planner::{
    find_conflicts, pending_operations, plan, Conflict, PreviewStats, RenameOperation,
    RenamePreviewEntry,
};
pub use preview::{render_failures, render_preview, Preview};
pub use rule::{split_name, RenameMode, RenameRule};
pub use session::Session;

use batch_rename_core::{ListError, SessionError};
use thiserror::Error;

/// Outcomes that end the process with a specific exit code
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{failed} of {total} renames failed")]
    RenamesFailed { failed: usize, total: usize },

    #[error("{0} destination conflicts in plan")]
    Conflicts(usize),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::RenamesFailed { .. } | Self::Conflicts(_) => 1,
            Self::InvalidInput(_) => 2,
        }
    }
}

/// Exit code for an error returned by a command handler
pub fn exit_code(error: &anyhow::Error) -> i32 {
    if let Some(cli_error) = error.downcast_ref::<CliError>() {
        return cli_error.exit_code();
    }

    let listing_failed = error
        .chain()
        .any(|cause| cause.is::<ListError>() || cause.is::<SessionError>());
    if listing_failed {
        2
    } else {
        3
    }
}

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while listing the files of a folder
#[derive(Error, Debug)]
pub enum ListError {
    #[error("Folder not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Not a folder: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors raised by a [`Session`](crate::session::Session)
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No folder selected")]
    NoFolder,

    #[error(transparent)]
    List(#[from] ListError),
}

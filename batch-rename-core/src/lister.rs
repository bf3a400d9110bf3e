use crate::error::ListError;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A file found while listing a folder.
///
/// This is a snapshot: it goes stale as soon as the filesystem changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Base name including the extension
    pub name: String,
    /// Absolute path to the file
    pub path: PathBuf,
    /// Folder containing the file
    pub directory: PathBuf,
}

impl FileEntry {
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_string();
        let directory = path.parent()?.to_path_buf();
        Some(Self {
            name,
            path: path.to_path_buf(),
            directory,
        })
    }
}

/// Options controlling which files [`list_files_with`] returns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    /// Descend into nested folders
    pub recursive: bool,
    /// Only list files whose path relative to the folder matches one of these globs
    #[serde(default)]
    pub include: Vec<String>,
    /// Skip files whose path relative to the folder matches one of these globs
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl ListOptions {
    pub fn recursive(recursive: bool) -> Self {
        Self {
            recursive,
            ..Self::default()
        }
    }
}

/// List the files of `directory`, descending into nested folders when `recursive` is set.
pub fn list_files(directory: &Path, recursive: bool) -> Result<Vec<FileEntry>, ListError> {
    list_files_with(directory, &ListOptions::recursive(recursive))
}

/// List the files of `directory` using the given options.
///
/// Only files are returned, never folders. Symlinks are not followed into
/// folders, but a symlink pointing at a file is listed like a file. Entries are
/// sorted by file name within each folder.
pub fn list_files_with(
    directory: &Path,
    options: &ListOptions,
) -> Result<Vec<FileEntry>, ListError> {
    let metadata = fs::metadata(directory).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ListError::NotFound(directory.to_path_buf())
        } else {
            ListError::Io {
                path: directory.to_path_buf(),
                source: e,
            }
        }
    })?;
    if !metadata.is_dir() {
        return Err(ListError::NotADirectory(directory.to_path_buf()));
    }

    let root = resolve_folder(directory);
    let include = build_globset(&options.include)?;
    let exclude = build_globset(&options.exclude)?;

    let max_depth = if options.recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(&root)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(false)
        .sort_by_file_name();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().map_or_else(|| root.clone(), Path::to_path_buf);
            ListError::Io {
                path,
                source: e.into(),
            }
        })?;

        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }
        if file_type.is_symlink() && !entry.path().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(&root).unwrap_or(entry.path());
        if let Some(ref globs) = include {
            if !globs.is_match(relative) {
                continue;
            }
        }
        if let Some(ref globs) = exclude {
            if globs.is_match(relative) {
                continue;
            }
        }

        match FileEntry::from_path(entry.path()) {
            Some(file) => files.push(file),
            None => warn!(path = %entry.path().display(), "Skipping file with a non UTF-8 name"),
        }
    }

    debug!(
        folder = %root.display(),
        recursive = options.recursive,
        count = files.len(),
        "Listed files"
    );
    Ok(files)
}

/// Build a glob set from patterns, returning None when there are no patterns
pub fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, ListError> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| ListError::InvalidGlob {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map(Some)
        .map_err(|source| ListError::InvalidGlob {
            pattern: patterns.join(","),
            source,
        })
}

/// Absolute, canonical form of `directory`, or just absolute if canonicalizing fails
pub fn resolve_folder(directory: &Path) -> PathBuf {
    let absolute = if directory.is_absolute() {
        directory.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(directory))
            .unwrap_or_else(|_| directory.to_path_buf())
    };
    absolute.canonicalize().unwrap_or(absolute)
}

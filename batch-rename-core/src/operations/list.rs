use crate::lister::{list_files_with, resolve_folder, ListOptions};
use crate::output::ListResult;
use anyhow::{Context, Result};
use std::path::Path;

/// List operation - returns structured data
pub fn list_operation(folder: &Path, options: &ListOptions) -> Result<ListResult> {
    let files = list_files_with(folder, options)
        .with_context(|| format!("Failed to list files in {}", folder.display()))?;

    Ok(ListResult {
        folder: resolve_folder(folder),
        recursive: options.recursive,
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_list_operation() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "").unwrap();
        fs::create_dir(temp_dir.path().join("nested")).unwrap();
        fs::write(temp_dir.path().join("nested").join("b.txt"), "").unwrap();

        let result = list_operation(temp_dir.path(), &ListOptions::recursive(false)).unwrap();
        assert_eq!(result.files.len(), 1);
        assert!(!result.recursive);

        let result = list_operation(temp_dir.path(), &ListOptions::recursive(true)).unwrap();
        assert_eq!(result.files.len(), 2);
        assert!(result.files.iter().all(|f| f.path.starts_with(&result.folder)));
    }

    #[test]
    fn test_list_operation_reports_missing_folder() {
        let temp_dir = TempDir::new().unwrap();
        let err = list_operation(&temp_dir.path().join("missing"), &ListOptions::default())
            .unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Failed to list files"));
        assert!(message.contains("Folder not found"));
    }
}

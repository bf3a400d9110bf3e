use crate::lister::FileEntry;
use crate::rule::RenameRule;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The computed rename for one listed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePreviewEntry {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub original_name: String,
    pub proposed_name: String,
}

impl RenamePreviewEntry {
    /// Unchanged entries are shown in previews but never applied
    pub fn is_changed(&self) -> bool {
        self.proposed_name != self.original_name
    }
}

/// A single filesystem rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameOperation {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl RenameOperation {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

impl From<&RenamePreviewEntry> for RenameOperation {
    fn from(entry: &RenamePreviewEntry) -> Self {
        Self {
            source: entry.source.clone(),
            destination: entry.destination.clone(),
        }
    }
}

/// Several changed entries that would end up at the same destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub destination: PathBuf,
    pub sources: Vec<PathBuf>,
}

/// Compute the preview for every file. Pure: the same inputs always give the same output.
pub fn plan(files: &[FileEntry], rule: &RenameRule) -> Vec<RenamePreviewEntry> {
    files
        .iter()
        .map(|file| {
            let proposed_name = rule.apply(&file.name);
            RenamePreviewEntry {
                source: file.path.clone(),
                destination: file.directory.join(&proposed_name),
                original_name: file.name.clone(),
                proposed_name,
            }
        })
        .collect()
}

/// The operations needed to apply a preview, in preview order, skipping unchanged entries
pub fn pending_operations(previews: &[RenamePreviewEntry]) -> Vec<RenameOperation> {
    previews
        .iter()
        .filter(|entry| entry.is_changed())
        .map(RenameOperation::from)
        .collect()
}

/// Find changed entries whose destinations coincide
pub fn find_conflicts(previews: &[RenamePreviewEntry]) -> Vec<Conflict> {
    let operations = pending_operations(previews);
    find_operation_conflicts(&operations)
}

/// Group operations by destination and keep the groups with more than one source
pub fn find_operation_conflicts(operations: &[RenameOperation]) -> Vec<Conflict> {
    let mut targets: BTreeMap<&PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for operation in operations {
        targets
            .entry(&operation.destination)
            .or_default()
            .push(operation.source.clone());
    }

    targets
        .into_iter()
        .filter(|(_, sources)| sources.len() > 1)
        .map(|(destination, sources)| Conflict {
            destination: destination.clone(),
            sources,
        })
        .collect()
}

/// Counts shown alongside a preview
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewStats {
    pub files: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub conflicts: usize,
}

impl PreviewStats {
    pub fn from_previews(previews: &[RenamePreviewEntry]) -> Self {
        let changed = previews.iter().filter(|p| p.is_changed()).count();
        Self {
            files: previews.len(),
            changed,
            unchanged: previews.len() - changed,
            conflicts: find_conflicts(previews).len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn entry(directory: &str, name: &str) -> FileEntry {
        FileEntry {
            name: name.to_string(),
            path: Path::new(directory).join(name),
            directory: PathBuf::from(directory),
        }
    }

    #[test]
    fn test_plan_computes_destination_in_same_folder() {
        let files = vec![entry("/photos", "img.jpg")];
        let previews = plan(&files, &RenameRule::prepend("trip_"));
        assert_eq!(previews.len(), 1);
        assert_eq!(previews[0].source, Path::new("/photos").join("img.jpg"));
        assert_eq!(
            previews[0].destination,
            Path::new("/photos").join("trip_img.jpg")
        );
        assert_eq!(previews[0].original_name, "img.jpg");
        assert_eq!(previews[0].proposed_name, "trip_img.jpg");
    }

    #[test]
    fn test_plan_keeps_input_order() {
        let files = vec![entry("/d", "c.txt"), entry("/d", "a.txt"), entry("/d", "b.txt")];
        let previews = plan(&files, &RenameRule::append("_x"));
        let names: Vec<_> = previews.iter().map(|p| p.original_name.as_str()).collect();
        assert_eq!(names, vec!["c.txt", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_unchanged_entries_are_previewed_but_not_pending() {
        let files = vec![entry("/d", "report.txt"), entry("/d", "notes.txt")];
        let previews = plan(&files, &RenameRule::replace("notes", "memo"));

        assert_eq!(previews.len(), 2);
        assert!(!previews[0].is_changed());
        assert_eq!(previews[0].proposed_name, "report.txt");
        assert!(previews[1].is_changed());
        assert_eq!(previews[1].proposed_name, "memo.txt");

        let operations = pending_operations(&previews);
        assert_eq!(
            operations,
            vec![RenameOperation::new(
                Path::new("/d").join("notes.txt"),
                Path::new("/d").join("memo.txt")
            )]
        );
    }

    #[test]
    fn test_find_conflicts() {
        let files = vec![
            entry("/d", "copyreport.txt"),
            entry("/d", "reportcopy.txt"),
            entry("/d", "notes.txt"),
        ];
        let previews = plan(&files, &RenameRule::replace("copy", ""));
        let conflicts = find_conflicts(&previews);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].destination, Path::new("/d").join("report.txt"));
        assert_eq!(conflicts[0].sources.len(), 2);

        let files = vec![entry("/d", "x_1.txt"), entry("/d", "x_2.txt")];
        let previews = plan(&files, &RenameRule::replace("_1", "_2"));
        // x_1 -> x_2 is changed, x_2 is unchanged, so no two changed entries collide
        assert!(find_conflicts(&previews).is_empty());

        let operations = vec![
            RenameOperation::new("/d/one.txt", "/d/same.txt"),
            RenameOperation::new("/d/two.txt", "/d/same.txt"),
            RenameOperation::new("/d/three.txt", "/d/other.txt"),
        ];
        let conflicts = find_operation_conflicts(&operations);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].destination, PathBuf::from("/d/same.txt"));
        assert_eq!(
            conflicts[0].sources,
            vec![PathBuf::from("/d/one.txt"), PathBuf::from("/d/two.txt")]
        );
    }

    #[test]
    fn test_conflict_in_different_folders_is_not_a_conflict() {
        let files = vec![entry("/a", "old.txt"), entry("/b", "old.txt")];
        let previews = plan(&files, &RenameRule::replace("old", "new"));
        assert!(find_conflicts(&previews).is_empty());
    }

    #[test]
    fn test_preview_stats() {
        let files = vec![entry("/d", "report.txt"), entry("/d", "notes.txt")];
        let previews = plan(&files, &RenameRule::replace("notes", "memo"));
        let stats = PreviewStats::from_previews(&previews);
        assert_eq!(
            stats,
            PreviewStats {
                files: 2,
                changed: 1,
                unchanged: 1,
                conflicts: 0,
            }
        );
    }
}

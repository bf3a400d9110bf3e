use crate::executor::ApplyReport;
use crate::lister::FileEntry;
use crate::planner::{Conflict, PreviewStats, RenamePreviewEntry};
use crate::rule::RenameRule;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;
use std::path::PathBuf;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of a list operation
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResult {
    pub folder: PathBuf,
    pub recursive: bool,
    pub files: Vec<FileEntry>,
}

/// Result of a plan operation
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResult {
    pub folder: PathBuf,
    pub rule: RenameRule,
    pub stats: PreviewStats,
    pub previews: Vec<RenamePreviewEntry>,
    pub conflicts: Vec<Conflict>,
}

/// Result of an apply operation
#[derive(Debug, Serialize, Deserialize)]
pub struct ApplyResult {
    pub folder: PathBuf,
    pub rule: RenameRule,
    /// False when the user declined the confirmation prompt
    pub applied: bool,
    pub report: ApplyReport,
}

impl ApplyResult {
    pub fn all_succeeded(&self) -> bool {
        self.report.all_succeeded()
    }
}

/// Result of a version command
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResult {
    pub name: String,
    pub version: String,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for ListResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "list",
            "folder": self.folder,
            "recursive": self.recursive,
            "count": self.files.len(),
            "files": self.files,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        for file in &self.files {
            let shown = file.path.strip_prefix(&self.folder).unwrap_or(&file.path);
            writeln!(output, "{}", shown.display()).unwrap();
        }
        writeln!(
            output,
            "{} files in {}",
            self.files.len(),
            self.folder.display()
        )
        .unwrap();
        output
    }
}

impl OutputFormatter for PlanResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "plan",
            "folder": self.folder,
            "rule": self.rule,
            "summary": self.stats,
            "previews": self.previews,
            "conflicts": self.conflicts,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        writeln!(output, "Batch rename plan: {}", self.rule).unwrap();
        writeln!(
            output,
            "Files: {}, renames: {}, unchanged: {}",
            self.stats.files, self.stats.changed, self.stats.unchanged
        )
        .unwrap();

        for conflict in &self.conflicts {
            writeln!(
                output,
                "Conflict: {} files would be renamed to {}",
                conflict.sources.len(),
                conflict.destination.display()
            )
            .unwrap();
        }

        output
    }
}

impl OutputFormatter for ApplyResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.all_succeeded(),
            "operation": "apply",
            "folder": self.folder,
            "rule": self.rule,
            "applied": self.applied,
            "summary": {
                "renamed": self.report.succeeded,
                "failed": self.report.failed,
            },
            "outcomes": self.report.outcomes,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        if !self.applied {
            return "Aborted.\n".to_string();
        }

        if self.report.outcomes.is_empty() {
            return "Nothing to rename\n".to_string();
        }

        let mut output = String::new();
        if self.report.succeeded > 0 {
            writeln!(output, "✓ Renamed {} files", self.report.succeeded).unwrap();
        }
        if self.report.failed > 0 {
            writeln!(
                output,
                "✗ {} of {} renames failed",
                self.report.failed,
                self.report.outcomes.len()
            )
            .unwrap();
        }
        output
    }
}

impl OutputFormatter for VersionResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "name": self.name,
            "version": self.version,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{FailureKind, RenameOutcome};
    use crate::planner::plan;
    use std::path::Path;

    fn plan_result() -> PlanResult {
        let files = vec![
            FileEntry {
                name: "report.txt".to_string(),
                path: PathBuf::from("/docs/report.txt"),
                directory: PathBuf::from("/docs"),
            },
            FileEntry {
                name: "notes.txt".to_string(),
                path: PathBuf::from("/docs/notes.txt"),
                directory: PathBuf::from("/docs"),
            },
        ];
        let rule = RenameRule::replace("notes", "memo");
        let previews = plan(&files, &rule);
        PlanResult {
            folder: PathBuf::from("/docs"),
            rule,
            stats: PreviewStats::from_previews(&previews),
            previews,
            conflicts: vec![],
        }
    }

    #[test]
    fn test_plan_result_summary() {
        let summary = plan_result().format(OutputFormat::Summary);
        assert!(summary.contains("Batch rename plan: replace 'notes' with 'memo'"));
        assert!(summary.contains("Files: 2, renames: 1, unchanged: 1"));
    }

    #[test]
    fn test_plan_result_json() {
        let json = plan_result().format(OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["operation"], "plan");
        assert_eq!(value["rule"]["mode"], "replace");
        assert_eq!(value["summary"]["changed"], 1);
        assert_eq!(value["previews"][1]["proposed_name"], "memo.txt");
    }

    #[test]
    fn test_apply_result_summary_with_failures() {
        let result = ApplyResult {
            folder: PathBuf::from("/docs"),
            rule: RenameRule::prepend("x_"),
            applied: true,
            report: ApplyReport::from_outcomes(vec![
                RenameOutcome {
                    source: PathBuf::from("/docs/a.txt"),
                    destination: Some(PathBuf::from("/docs/x_a.txt")),
                    succeeded: true,
                    failure: None,
                    error: None,
                },
                RenameOutcome {
                    source: PathBuf::from("/docs/b.txt"),
                    destination: None,
                    succeeded: false,
                    failure: Some(FailureKind::SourceMissing),
                    error: Some("gone".to_string()),
                },
            ]),
        };

        let summary = result.format_summary();
        assert!(summary.contains("✓ Renamed 1 files"));
        assert!(summary.contains("✗ 1 of 2 renames failed"));

        let value: serde_json::Value = serde_json::from_str(&result.format_json()).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["outcomes"][1]["failure"], "source_missing");
        assert!(value["outcomes"][1].get("destination").is_none());
    }

    #[test]
    fn test_apply_result_declined() {
        let result = ApplyResult {
            folder: PathBuf::from("/docs"),
            rule: RenameRule::prepend("x_"),
            applied: false,
            report: ApplyReport::from_outcomes(vec![]),
        };
        assert_eq!(result.format_summary(), "Aborted.\n");
    }

    #[test]
    fn test_list_result_summary_shows_relative_paths() {
        let result = ListResult {
            folder: PathBuf::from("/docs"),
            recursive: true,
            files: vec![FileEntry {
                name: "a.txt".to_string(),
                path: Path::new("/docs").join("sub").join("a.txt"),
                directory: Path::new("/docs").join("sub"),
            }],
        };
        let summary = result.format_summary();
        assert!(summary.contains(&Path::new("sub").join("a.txt").display().to_string()));
        assert!(summary.contains("1 files in /docs"));
    }

    #[test]
    fn test_version_result() {
        let version = VersionResult {
            name: "batch-rename".to_string(),
            version: "0.1.0".to_string(),
        };
        assert_eq!(version.format_summary(), "batch-rename 0.1.0");
        assert_eq!(
            version.format_json(),
            r#"{"name":"batch-rename","version":"0.1.0"}"#
        );
    }
}

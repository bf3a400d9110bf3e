use crate::lister::{resolve_folder, ListOptions};
use crate::output::PlanResult;
use crate::planner::PreviewStats;
use crate::preview::{render_preview_with_fixed_width, Preview};
use crate::rule::RenameRule;
use crate::session::Session;
use anyhow::{Context, Result};
use std::path::Path;

/// Plan operation - returns structured data plus the rendered preview, if any
pub fn plan_operation(
    folder: &Path,
    options: &ListOptions,
    rule: &RenameRule,
    preview: Option<Preview>,
    fixed_table_width: bool,
    use_color: bool,
) -> Result<(PlanResult, Option<String>)> {
    let mut session = Session::new(rule.clone(), options.clone());
    session
        .open(folder)
        .with_context(|| format!("Failed to list files in {}", folder.display()))?;

    let root = resolve_folder(folder);
    let preview_content = preview.filter(|p| *p != Preview::None).map(|format| {
        render_preview_with_fixed_width(
            session.previews(),
            rule,
            Some(root.as_path()),
            format,
            Some(use_color),
            fixed_table_width,
        )
    });

    let previews = session.previews().to_vec();
    let result = PlanResult {
        folder: root,
        rule: rule.clone(),
        stats: PreviewStats::from_previews(&previews),
        conflicts: session.conflicts(),
        previews,
    };

    Ok((result, preview_content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_plan_operation_does_not_touch_disk() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();

        let (result, preview) = plan_operation(
            temp_dir.path(),
            &ListOptions::default(),
            &RenameRule::replace("notes", "memo"),
            Some(Preview::Summary),
            false,
            false,
        )
        .unwrap();

        assert_eq!(result.stats.changed, 1);
        assert_eq!(result.previews[0].proposed_name, "memo.txt");
        assert!(preview.unwrap().contains("notes.txt -> memo.txt"));
        assert!(temp_dir.path().join("notes.txt").exists());
        assert!(!temp_dir.path().join("memo.txt").exists());
    }

    #[test]
    fn test_plan_operation_without_preview() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "").unwrap();

        let (_, preview) = plan_operation(
            temp_dir.path(),
            &ListOptions::default(),
            &RenameRule::append("_1"),
            Some(Preview::None),
            false,
            false,
        )
        .unwrap();
        assert!(preview.is_none());
    }

    #[test]
    fn test_plan_operation_reports_conflicts() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("copyreport.txt"), "").unwrap();
        fs::write(temp_dir.path().join("reportcopy.txt"), "").unwrap();

        let (result, _) = plan_operation(
            temp_dir.path(),
            &ListOptions::default(),
            &RenameRule::replace("copy", ""),
            None,
            false,
            false,
        )
        .unwrap();

        assert_eq!(result.conflicts.len(), 1);
        assert_eq!(result.stats.conflicts, 1);
    }
}

use super::{conflicting_sources, display_folder};
use crate::planner::{PreviewStats, RenamePreviewEntry};
use crate::rule::RenameRule;
use nu_ansi_term::{Color as AnsiColor, Style};
use std::fmt::Write;
use std::path::Path;

/// Render a preview as plain `old -> new` lines grouped by folder
pub fn render_summary(
    previews: &[RenamePreviewEntry],
    rule: &RenameRule,
    root: Option<&Path>,
    use_color: bool,
) -> String {
    let mut output = String::new();
    let stats = PreviewStats::from_previews(previews);

    writeln!(output, "[PREVIEW]").unwrap();
    writeln!(output, "Rule: {}", rule).unwrap();
    writeln!(output, "Files: {}", stats.files).unwrap();
    writeln!(output, "Renames: {}", stats.changed).unwrap();
    if stats.conflicts > 0 {
        writeln!(output, "Conflicts: {}", stats.conflicts).unwrap();
    }

    let conflicts = conflicting_sources(previews);
    let changed = Style::new().fg(AnsiColor::Yellow);
    let unchanged = Style::new().dimmed();
    let conflict = Style::new().fg(AnsiColor::Red).bold();

    let mut current_folder: Option<&Path> = None;
    for entry in previews {
        let folder = entry.source.parent();
        if folder != current_folder {
            current_folder = folder;
            writeln!(output).unwrap();
            let label = folder
                .map(|dir| display_folder(dir, root))
                .unwrap_or_default();
            writeln!(output, "[{}]", label).unwrap();
        }

        let line = if entry.is_changed() {
            format!("{} -> {}", entry.original_name, entry.proposed_name)
        } else {
            format!("{} (unchanged)", entry.original_name)
        };

        let is_conflict = conflicts.contains(entry.source.as_path());
        let line = match (use_color, is_conflict, entry.is_changed()) {
            (false, true, _) => format!("{} [conflict]", line),
            (false, false, _) => line,
            (true, true, _) => conflict.paint(format!("{} [conflict]", line)).to_string(),
            (true, false, true) => changed.paint(line).to_string(),
            (true, false, false) => unchanged.paint(line).to_string(),
        };
        writeln!(output, "{}", line).unwrap();
    }

    output
}

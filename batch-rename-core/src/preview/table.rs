use super::{conflicting_sources, display_folder};
use crate::planner::{PreviewStats, RenamePreviewEntry};
use comfy_table::{Cell, Color, ColumnConstraint, ContentArrangement, Table, Width};
use std::io::{self, IsTerminal};
use std::path::Path;

fn fixed_constraints() -> Vec<ColumnConstraint> {
    vec![
        ColumnConstraint::Absolute(Width::Fixed(45)), // Original Name
        ColumnConstraint::Absolute(Width::Fixed(45)), // New Name
        ColumnConstraint::Absolute(Width::Fixed(30)), // Folder
        ColumnConstraint::Absolute(Width::Fixed(16)), // Status
    ]
}

/// Render a preview as a table, one row per listed file
pub fn render_table(
    previews: &[RenamePreviewEntry],
    root: Option<&Path>,
    use_color: bool,
    fixed_table_width: bool,
) -> String {
    let mut table = Table::new();

    if fixed_table_width || !io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Disabled);
        table.set_constraints(fixed_constraints());
    } else {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    }

    // Force styling even in non-TTY environments when colors are explicitly requested
    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("Original Name").fg(Color::Cyan),
            Cell::new("New Name").fg(Color::Cyan),
            Cell::new("Folder").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["Original Name", "New Name", "Folder", "Status"]);
    }

    let conflicts = conflicting_sources(previews);

    for entry in previews {
        let folder = entry
            .source
            .parent()
            .map(|dir| display_folder(dir, root))
            .unwrap_or_default();
        let (status, color) = if conflicts.contains(entry.source.as_path()) {
            ("conflict", Color::Red)
        } else if entry.is_changed() {
            ("rename", Color::Yellow)
        } else {
            ("unchanged", Color::DarkGrey)
        };

        if use_color {
            let new_name = if entry.is_changed() {
                Cell::new(&entry.proposed_name).fg(color)
            } else {
                Cell::new(&entry.proposed_name)
            };
            table.add_row(vec![
                Cell::new(&entry.original_name),
                new_name,
                Cell::new(&folder),
                Cell::new(status).fg(color),
            ]);
        } else {
            table.add_row(vec![
                entry.original_name.as_str(),
                entry.proposed_name.as_str(),
                folder.as_str(),
                status,
            ]);
        }
    }

    let stats = PreviewStats::from_previews(previews);
    let totals = format!("{} files, {} to rename", stats.files, stats.changed);
    let conflicts = format!("{} conflicts", stats.conflicts);

    if use_color {
        table.add_row(vec![
            Cell::new("─────────").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
        ]);
        table.add_row(vec![
            Cell::new("TOTALS").fg(Color::Cyan),
            Cell::new(&totals).fg(Color::White),
            Cell::new(""),
            Cell::new(&conflicts).fg(if stats.conflicts > 0 {
                Color::Red
            } else {
                Color::White
            }),
        ]);
    } else {
        table.add_row(vec!["─────────", "─────────", "─────────", "─────────"]);
        table.add_row(vec!["TOTALS", totals.as_str(), "", conflicts.as_str()]);
    }

    table.to_string()
}

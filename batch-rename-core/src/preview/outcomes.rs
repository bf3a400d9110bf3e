use super::display_folder;
use crate::executor::{ApplyReport, FailureKind};
use comfy_table::{Cell, Color, ContentArrangement, Table};
use std::path::Path;

fn failure_label(kind: Option<FailureKind>) -> &'static str {
    match kind {
        Some(FailureKind::Conflict) => "conflict",
        Some(FailureKind::InvalidName) => "invalid name",
        Some(FailureKind::DestinationExists) => "exists",
        Some(FailureKind::SourceMissing) => "missing",
        Some(FailureKind::Io) | None => "error",
    }
}

/// Render the failed renames of a report as a table. Returns an empty string
/// when everything succeeded.
pub fn render_failures(report: &ApplyReport, root: Option<&Path>, use_color: bool) -> String {
    if report.all_succeeded() {
        return String::new();
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("File").fg(Color::Cyan),
            Cell::new("Reason").fg(Color::Cyan),
            Cell::new("Detail").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["File", "Reason", "Detail"]);
    }

    for outcome in report.failures() {
        let file = display_folder(&outcome.source, root);
        let reason = failure_label(outcome.failure);
        let detail = outcome.error.as_deref().unwrap_or("");
        if use_color {
            table.add_row(vec![
                Cell::new(&file),
                Cell::new(reason).fg(Color::Red),
                Cell::new(detail),
            ]);
        } else {
            table.add_row(vec![file.as_str(), reason, detail]);
        }
    }

    table.to_string()
}

mod outcomes;
mod summary;
mod table;

pub use outcomes::render_failures;
pub use summary::render_summary;
pub use table::render_table;

use crate::planner::{find_conflicts, RenamePreviewEntry};
use crate::rule::RenameRule;
use std::collections::HashSet;
use std::io::{self, IsTerminal};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    Table,
    Summary,
    None,
}

impl std::str::FromStr for Preview {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "summary" => Ok(Self::Summary),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid preview format: {}", s)),
        }
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color_with_detector<F>(use_color: Option<bool>, is_terminal: F) -> bool
where
    F: Fn() -> bool,
{
    match use_color {
        Some(explicit_color) => explicit_color, // Honor explicit color request
        None => is_terminal(),                  // Auto-detect only when not specified
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color(use_color: Option<bool>) -> bool {
    should_use_color_with_detector(use_color, || io::stdout().is_terminal())
}

/// Render a preview in the specified format
pub fn render_preview(
    previews: &[RenamePreviewEntry],
    rule: &RenameRule,
    root: Option<&Path>,
    format: Preview,
    use_color: Option<bool>,
) -> String {
    render_preview_with_fixed_width(previews, rule, root, format, use_color, false)
}

pub fn render_preview_with_fixed_width(
    previews: &[RenamePreviewEntry],
    rule: &RenameRule,
    root: Option<&Path>,
    format: Preview,
    use_color: Option<bool>,
    fixed_width: bool,
) -> String {
    let use_color = should_use_color(use_color);

    match format {
        Preview::Table => render_table(previews, root, use_color, fixed_width),
        Preview::Summary => render_summary(previews, rule, root, use_color),
        Preview::None => String::new(),
    }
}

/// Sources of changed entries that share a destination with another entry
pub(crate) fn conflicting_sources(previews: &[RenamePreviewEntry]) -> HashSet<&Path> {
    let conflicts = find_conflicts(previews);
    previews
        .iter()
        .filter(|entry| {
            conflicts
                .iter()
                .any(|c| c.sources.iter().any(|s| s == &entry.source))
        })
        .map(|entry| entry.source.as_path())
        .collect()
}

/// Show a path relative to the listed folder, or `.` for the folder itself
pub(crate) fn display_folder(path: &Path, root: Option<&Path>) -> String {
    match root.and_then(|root| path.strip_prefix(root).ok()) {
        Some(relative) if relative.as_os_str().is_empty() => ".".to_string(),
        Some(relative) => relative.display().to_string(),
        None => path.display().to_string(),
    }
}

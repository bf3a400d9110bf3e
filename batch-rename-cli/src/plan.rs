use anyhow::Result;
use batch_rename_core::{plan_operation, ListOptions, OutputFormatter, Preview, RenameRule};
use std::path::Path;

use crate::cli::OutputFormat;
use crate::error::CliError;

#[allow(clippy::too_many_arguments)]
pub fn handle_plan(
    folder: &Path,
    options: &ListOptions,
    rule: &RenameRule,
    preview: Option<Preview>,
    fixed_table_width: bool,
    use_color: bool,
    output: OutputFormat,
) -> Result<()> {
    // Validate that --fixed-table-width is only used with table preview
    if fixed_table_width && preview.is_some() && preview != Some(Preview::Table) {
        return Err(CliError::InvalidInput(
            "--fixed-table-width can only be used with --preview table".to_string(),
        )
        .into());
    }

    let (result, preview_content) =
        plan_operation(folder, options, rule, preview, fixed_table_width, use_color)?;

    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => {
            if let Some(content) = preview_content {
                print_block(&content);
            }
            print!("{}", result.format_summary());
        },
    }

    if !result.conflicts.is_empty() {
        return Err(CliError::Conflicts(result.conflicts.len()).into());
    }
    Ok(())
}

/// Print rendered output, adding the trailing newline tables leave off
pub fn print_block(content: &str) {
    if content.is_empty() {
        return;
    }
    if content.ends_with('\n') {
        print!("{content}");
    } else {
        println!("{content}");
    }
}

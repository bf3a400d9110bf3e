use anyhow::Result;
use batch_rename_core::preview::render_preview_with_fixed_width;
use batch_rename_core::{
    apply_operation, render_failures, ApplyOptions, ListOptions, OutputFormatter, PlanResult,
    Preview, RenameRule,
};
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::plan::print_block;

#[allow(clippy::too_many_arguments)]
pub fn handle_apply(
    folder: &Path,
    options: &ListOptions,
    rule: &RenameRule,
    preview: Option<Preview>,
    fixed_table_width: bool,
    apply_options: &ApplyOptions,
    yes: bool,
    use_color: bool,
    output: OutputFormat,
) -> Result<()> {
    let result = apply_operation(folder, options, rule, apply_options, |plan| {
        if output == OutputFormat::Summary {
            if let Some(format) = preview {
                print_block(&render_preview_with_fixed_width(
                    &plan.previews,
                    &plan.rule,
                    Some(plan.folder.as_path()),
                    format,
                    Some(use_color),
                    fixed_table_width,
                ));
            }
            print!("{}", plan.format_summary());
        }

        if !plan.conflicts.is_empty() {
            eprintln!(
                "Warning: {} files share a destination and will be skipped",
                plan.conflicts.iter().map(|c| c.sources.len()).sum::<usize>()
            );
        }

        if yes {
            return Ok(true);
        }
        confirm(plan)
    })?;

    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => {
            print!("{}", result.format_summary());
            print_block(&render_failures(
                &result.report,
                Some(result.folder.as_path()),
                use_color,
            ));
        },
    }

    if !result.all_succeeded() {
        return Err(CliError::RenamesFailed {
            failed: result.report.failed,
            total: result.report.outcomes.len(),
        }
        .into());
    }
    Ok(())
}

fn confirm(plan: &PlanResult) -> Result<bool> {
    confirm_with_input(&mut io::stdin().lock(), plan.stats.changed)
}

/// Ask on stderr whether to rename `count` files. Anything but yes declines,
/// including end of input.
pub fn confirm_with_input<R: BufRead>(reader: &mut R, count: usize) -> Result<bool> {
    eprint!("Rename {count} files? [y/N]: ");
    io::stderr().flush()?;

    let mut input = String::new();
    reader.read_line(&mut input)?;
    let choice = input.trim().to_lowercase();

    Ok(matches!(choice.as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_accepts_yes() {
        assert!(confirm_with_input(&mut &b"y\n"[..], 2).unwrap());
        assert!(confirm_with_input(&mut &b"YES\n"[..], 2).unwrap());
    }

    #[test]
    fn test_confirm_declines_by_default() {
        assert!(!confirm_with_input(&mut &b"\n"[..], 2).unwrap());
        assert!(!confirm_with_input(&mut &b"n\n"[..], 2).unwrap());
        assert!(!confirm_with_input(&mut &b"maybe\n"[..], 2).unwrap());
    }

    #[test]
    fn test_confirm_declines_on_end_of_input() {
        assert!(!confirm_with_input(&mut &b""[..], 2).unwrap());
    }
}

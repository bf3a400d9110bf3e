use anyhow::Result;
use batch_rename_core::{list_operation, ListOptions, OutputFormatter};
use std::path::Path;

use crate::cli::OutputFormat;

pub fn handle_list(folder: &Path, options: &ListOptions, output: OutputFormat) -> Result<()> {
    let result = list_operation(folder, options)?;

    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => print!("{}", result.format_summary()),
    }

    Ok(())
}

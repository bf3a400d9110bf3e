use anyhow::{Context, Result};
use batch_rename_core::{
    ApplyOptions, Config, ListOptions, OutputFormatter, Preview, RenameRule, Session,
    VersionResult,
};
use clap::{CommandFactory, Parser};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;
use tracing::warn;

mod apply;
mod cli;
mod error;
mod interactive;
mod list;
mod logging;
mod plan;

use cli::{Cli, Commands, FilterArgs, OutputFormat, PreviewArg, RuleArgs};
use interactive::InteractiveOptions;

fn main() {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose, !cli.no_color && io::stderr().is_terminal());

    // Handle -C directory flag
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir)
            .with_context(|| format!("Failed to change to directory: {}", dir.display()))
            .unwrap_or_else(|e| {
                eprintln!("Error: {e:#}");
                process::exit(2);
            });
    }

    // Load config to get defaults
    let config = Config::load().unwrap_or_else(|e| {
        warn!("Ignoring config: {e:#}");
        Config::default()
    });

    let use_color = !cli.no_color
        && config
            .defaults
            .use_color
            .unwrap_or_else(|| io::stdout().is_terminal());

    let result = match cli.command {
        Commands::List {
            folder,
            filter,
            output,
        } => list::handle_list(&folder, &list_options(&filter, &config), output),

        Commands::Plan {
            folder,
            filter,
            rule,
            preview,
            fixed_table_width,
            output,
        } => {
            // No preview for JSON output
            let format = if output == OutputFormat::Json {
                None
            } else {
                Some(preview_format(preview, &config))
            };

            plan::handle_plan(
                &folder,
                &list_options(&filter, &config),
                &rename_rule(rule, &config),
                format,
                fixed_table_width,
                use_color,
                output,
            )
        },

        Commands::Apply {
            folder,
            filter,
            rule,
            preview,
            fixed_table_width,
            parallel,
            log_file,
            output,
        } => {
            let format = if output == OutputFormat::Json {
                None
            } else {
                Some(preview_format(preview, &config))
            };

            apply::handle_apply(
                &folder,
                &list_options(&filter, &config),
                &rename_rule(rule, &config),
                format,
                fixed_table_width,
                &apply_options(parallel, log_file, &config),
                cli.yes,
                use_color,
                output,
            )
        },

        Commands::Interactive { folder, filter } => {
            let session = Session::new(
                RenameRule::new(config.defaults.mode, ""),
                list_options(&filter, &config),
            );
            let options = InteractiveOptions {
                preview: preview_format(None, &config),
                apply_options: apply_options(false, None, &config),
                use_color,
            };
            interactive::handle_interactive(session, folder, &options)
        },

        Commands::Completions { shell, dir } => {
            generate_completions(shell, &mut Cli::command(), "batch-rename", &dir)
        },

        Commands::Version { output } => handle_version(output),
    };

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(error::exit_code(&e));
        },
    }
}

fn list_options(filter: &FilterArgs, config: &Config) -> ListOptions {
    ListOptions {
        recursive: filter.recursive_or(config.defaults.recursive),
        include: filter.include.clone(),
        exclude: filter.exclude.clone(),
    }
}

fn rename_rule(args: RuleArgs, config: &Config) -> RenameRule {
    RenameRule {
        mode: args.mode.map_or(config.defaults.mode, Into::into),
        match_text: args.match_text,
        replacement_text: args.replacement_text,
    }
}

/// Use preview format from CLI arg or config default
fn preview_format(arg: Option<PreviewArg>, config: &Config) -> Preview {
    arg.or_else(|| PreviewArg::from_str(&config.defaults.preview_format))
        .map_or(Preview::Table, Into::into)
}

fn apply_options(parallel: bool, log_file: Option<PathBuf>, config: &Config) -> ApplyOptions {
    ApplyOptions {
        parallel: parallel || config.defaults.parallel,
        log_file: log_file.or_else(|| config.defaults.log_file.clone()),
    }
}

// Generate shell completions
pub fn generate_completions<G: clap_complete::Generator>(
    gen: G,
    cmd: &mut clap::Command,
    name: &str,
    out_dir: &std::path::Path,
) -> Result<()> {
    use clap_complete::generate_to;
    use std::fs;

    fs::create_dir_all(out_dir)?;
    let path = generate_to(gen, cmd, name, out_dir)?;
    println!("Generated completion file: {}", path.display());
    Ok(())
}

fn handle_version(output: OutputFormat) -> Result<()> {
    let version_result = VersionResult {
        name: "batch-rename".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    println!("{}", version_result.format(output.into()));
    Ok(())
}

use clap::builder::FalseyValueParser;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::types::{ModeArg, OutputFormat, PreviewArg};

/// Preview and apply batch file renames: prepend, append, or replace text in file names
#[derive(Parser, Debug)]
#[command(name = "batch-rename")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR", value_parser = FalseyValueParser::new())]
    pub no_color: bool,

    /// Run as if started in <path> instead of the current working directory
    #[arg(short = 'C', global = true, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Log more detail to stderr. Can be repeated (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Assume yes for all prompts
    #[arg(
        short = 'y',
        long = "yes",
        global = true,
        env = "BATCH_RENAME_YES",
        value_parser = FalseyValueParser::new()
    )]
    pub yes: bool,
}

/// Which files of the folder are considered
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Include files in nested folders
    #[arg(short = 'r', long)]
    pub recursive: bool,

    /// Only list direct children, even when the config enables recursion
    #[arg(long, conflicts_with = "recursive")]
    pub no_recursive: bool,

    /// Include glob patterns, matched against the path relative to the folder
    #[arg(long, value_delimiter = ',')]
    pub include: Vec<String>,

    /// Exclude glob patterns, matched against the path relative to the folder
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,
}

impl FilterArgs {
    /// Resolve the recursive flag against the configured default
    pub fn recursive_or(&self, default: bool) -> bool {
        if self.recursive {
            true
        } else if self.no_recursive {
            false
        } else {
            default
        }
    }
}

/// How new names are computed
#[derive(Args, Debug, Clone)]
pub struct RuleArgs {
    /// Rename mode (defaults from config if not specified)
    #[arg(short = 'm', long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Text to prepend, append, or search for (replace mode)
    #[arg(long = "match", default_value = "", value_name = "TEXT")]
    pub match_text: String,

    /// Replacement for the first occurrence of the match text (replace mode only)
    #[arg(long = "with", default_value = "", value_name = "TEXT")]
    pub replacement_text: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the files a batch rename would consider
    List {
        /// Folder to list
        folder: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Preview the new names without touching the disk
    Plan {
        /// Folder containing the files to rename
        folder: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        rule: RuleArgs,

        /// Preview output format (defaults from config if not specified)
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Use fixed column widths for table output (useful in CI environments or other non-TTY use cases)
        #[arg(long)]
        fixed_table_width: bool,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Preview, confirm, and rename
    Apply {
        /// Folder containing the files to rename
        folder: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        rule: RuleArgs,

        /// Show preview before confirmation prompt
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Use fixed column widths for table output (useful in CI environments or other non-TTY use cases)
        #[arg(long)]
        fixed_table_width: bool,

        /// Issue renames in parallel (outcomes are still reported in order)
        #[arg(long)]
        parallel: bool,

        /// Append a timestamped line per rename attempt to this file
        #[arg(long, value_name = "PATH")]
        log_file: Option<PathBuf>,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Pick a folder and edit the rule line by line, previewing as you go
    Interactive {
        /// Folder to open right away
        folder: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,

        /// Directory to write the completion file into
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Show version information
    Version {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },
}

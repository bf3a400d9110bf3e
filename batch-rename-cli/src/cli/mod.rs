pub mod args;
pub mod types;

pub use args::{Cli, Commands, FilterArgs, RuleArgs};
pub use types::{ModeArg, OutputFormat, PreviewArg};

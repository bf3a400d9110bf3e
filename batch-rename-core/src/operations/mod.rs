//! High-level operations that correspond to CLI commands
//!
//! These modules contain the core logic for each batch-rename command,
//! separated from CLI concerns like argument parsing and output formatting.

pub mod apply;
pub mod list;
pub mod plan;

// Re-export the main operation functions for easy access
pub use apply::apply_operation;
pub use list::list_operation;
pub use plan::plan_operation;

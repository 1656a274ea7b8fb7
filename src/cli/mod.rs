//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting and the command handlers.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;
pub mod record_cmd;

// Re-export commonly used types
pub use app::{load_merged_config, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, ElementArg};
pub use presenter::Presenter;
pub use record_cmd::RecordOptions;

// coursecat-cli/src/lib.rs
//
// Library portion of the coursecat CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;

// Re-export items needed by the binary or integration tests
pub use cli::{CheckToolArgs, Cli, Commands, ProcessArgs};
pub use commands::check_tool::run_check_tool;
pub use commands::process::run_process;

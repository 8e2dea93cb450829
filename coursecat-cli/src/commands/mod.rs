//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// Module containing the implementation of the `process` command.
/// This command runs the whole course pipeline.
pub mod process;

/// Module containing the implementation of the `check-tool` command.
pub mod check_tool;

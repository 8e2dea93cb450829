//! Implementation of the 'check-tool' subcommand.

use coursecat_core::config::{DEFAULT_FFMPEG_PATH, MIN_TOOL_VERSION};
use coursecat_core::{FfmpegTool, ToolVersion, check_tool_version};

use crate::cli::CheckToolArgs;
use crate::error::CliResult;
use crate::output::print_tool;

/// Runs `ffmpeg -version` and checks it against the minimum supported version.
pub fn run_check_tool(args: CheckToolArgs) -> CliResult<ToolVersion> {
    let executable = args
        .ffmpeg
        .unwrap_or_else(|| DEFAULT_FFMPEG_PATH.into());
    let tool = FfmpegTool::new(executable.clone());

    let version = check_tool_version(&tool, MIN_TOOL_VERSION)?;
    print_tool(&executable, version);
    Ok(version)
}

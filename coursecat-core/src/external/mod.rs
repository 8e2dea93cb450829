// ============================================================================
// coursecat-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the ffmpeg Binary
//
// This module encapsulates every interaction with the external transcoding
// tool. The pipeline only sees the `MediaTool` trait: run an argument vector,
// get back the exit outcome and the combined stdout/stderr log. Everything
// ffmpeg-specific (argument layout, log parsing, version banner) lives in the
// submodules.
//
// KEY COMPONENTS:
// - MediaTool: trait for running one tool invocation
// - FfmpegTool: subprocess implementation with concurrent pipe draining
// - ffmpeg: argument builders and log parsers
// - version: banner parsing and minimum-version check

use std::ffi::OsString;

use crate::error::CoreResult;

// ============================================================================
// SUBMODULES
// ============================================================================

/// ffmpeg argument builders and log parsers
pub mod ffmpeg;

/// Subprocess-backed `MediaTool` implementation
pub mod ffmpeg_executor;

/// Version banner parsing and minimum version enforcement
pub mod version;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg::parse_duration;
pub use ffmpeg_executor::FfmpegTool;
pub use version::{ToolVersion, check_tool_version};

// ============================================================================
// MEDIA TOOL ABSTRACTION
// ============================================================================

/// Outcome of one tool invocation.
///
/// A non-zero exit is reported here as `success == false`; it is not an
/// error at this layer. Callers decide whether a failed invocation is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// True when the tool exited with status 0
    pub success: bool,
    /// Exit code, if the process exited normally
    pub exit_code: Option<i32>,
    /// stdout and stderr lines, interleaved in arrival order
    pub log: String,
}

impl ToolOutput {
    pub fn success(log: impl Into<String>) -> Self {
        Self {
            success: true,
            exit_code: Some(0),
            log: log.into(),
        }
    }

    pub fn failure(exit_code: i32, log: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code: Some(exit_code),
            log: log.into(),
        }
    }
}

/// Capability to run the external transcode/probe tool.
///
/// Implementations must be usable from several worker threads at once; the
/// clip preprocessing phase calls `run` concurrently for distinct clips.
///
/// # Examples
///
/// ```rust
/// use coursecat_core::CoreResult;
/// use coursecat_core::external::{MediaTool, ToolOutput};
/// use std::ffi::OsString;
///
/// struct AlwaysFails;
///
/// impl MediaTool for AlwaysFails {
///     fn run(&self, _args: &[OsString]) -> CoreResult<ToolOutput> {
///         Ok(ToolOutput::failure(1, "simulated failure"))
///     }
/// }
///
/// let output = AlwaysFails.run(&[OsString::from("-version")]).unwrap();
/// assert!(!output.success);
/// ```
pub trait MediaTool: Send + Sync {
    /// Runs the tool with the given argument vector and blocks until it exits.
    ///
    /// Returns `Err` only when the process could not be started or waited on.
    fn run(&self, args: &[OsString]) -> CoreResult<ToolOutput>;

    /// Short name used in log lines and error messages.
    fn name(&self) -> String {
        "ffmpeg".to_string()
    }
}


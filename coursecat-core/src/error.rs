// ============================================================================
// coursecat-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the Course Pipeline
//
// This module defines the error type shared by every stage of the course
// pipeline. Each variant names a failure class: tool invocation, log parsing,
// metadata records, and filesystem operations.
//
// Not every failure surfaces as an error value. A non-zero ffmpeg exit is an
// ordinary `ToolOutput` and only becomes `CommandFailed` where the caller
// decides it is fatal for the operation in progress.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by coursecat-core.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory traversal error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Required external tool '{0}' not found")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] std::io::Error),

    #[error("Failed waiting for command '{0}': {1}")]
    CommandWait(String, #[source] std::io::Error),

    #[error("Command '{command}' failed (exit code {exit_code:?})")]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
        log: String,
    },

    #[error("Could not determine ffmpeg version from its banner")]
    VersionParse,

    #[error("Unsupported ffmpeg version {found}; {required} or higher required")]
    UnsupportedToolVersion { found: String, required: String },

    #[error("Unable to retrieve duration of clip '{}': {reason}", clip.display())]
    DurationProbe { clip: PathBuf, reason: String },

    #[error("Failed to read metadata record '{}': {reason}", path.display())]
    MetadataRead { path: PathBuf, reason: String },

    #[error("Module '{}' has no clips to merge", .0.display())]
    EmptyModule(PathBuf),

    #[error("No clip files found in {}", .0.display())]
    NoClipsFound(PathBuf),

    #[error("Worker pool error: {0}")]
    WorkerPool(String),
}

/// Result type for coursecat-core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Builds a `CommandFailed` error from an exit code and the captured log.
pub fn command_failed_error(
    command: impl Into<String>,
    exit_code: Option<i32>,
    log: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        command: command.into(),
        exit_code,
        log: log.into(),
    }
}

/// Maps a spawn failure, distinguishing a missing executable.
pub fn command_start_error(command: impl Into<String>, error: std::io::Error) -> CoreError {
    let command = command.into();
    if error.kind() == std::io::ErrorKind::NotFound {
        CoreError::DependencyNotFound(command)
    } else {
        CoreError::CommandStart(command, error)
    }
}

/// Maps a failure while waiting on a spawned child.
pub fn command_wait_error(command: impl Into<String>, error: std::io::Error) -> CoreError {
    CoreError::CommandWait(command.into(), error)
}

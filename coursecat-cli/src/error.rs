// ============================================================================
// coursecat-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Result Type and Exit Codes
//
// Commands return `CliResult`, which reuses `CoreError` so core failures pass
// through unchanged. A run that completes but leaves failed modules behind is
// not an error value; main maps it to a non-zero exit code.

use coursecat_core::{CoreError, CoreResult};

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Exit code for a fatal error or a run with failed modules.
pub const EXIT_FAILURE: i32 = 1;

/// Short hint printed after certain errors.
pub fn error_hint(error: &CoreError) -> Option<&'static str> {
    match error {
        CoreError::DependencyNotFound(_) => {
            Some("Install ffmpeg or point --ffmpeg / COURSECAT_FFMPEG at the executable.")
        }
        CoreError::UnsupportedToolVersion { .. } => Some("Upgrade ffmpeg and try again."),
        CoreError::DurationProbe { .. } => {
            Some("The clip may be truncated or corrupt; no module was merged.")
        }
        _ => None,
    }
}

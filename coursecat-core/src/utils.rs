//! Utility functions for formatting and path display.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Formats a duration as HH:MM:SS (e.g., 3725 s -> "01:02:05").
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Returns `path` relative to `base` when it lies below it, otherwise `path`
/// unchanged. Used to keep progress output short.
#[must_use]
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Final component of `path` as a display string, or the whole path when it
/// has none (e.g. `..`).
#[must_use]
pub fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(0)), "00:00:00");
        assert_eq!(format_duration(Duration::from_millis(59_999)), "00:00:59");
        assert_eq!(format_duration(Duration::from_secs(3725)), "01:02:05");
        assert_eq!(format_duration(Duration::from_secs(100 * 3600)), "100:00:00");
    }

    #[test]
    fn test_relative_to() {
        let base = Path::new("/course");
        assert_eq!(
            relative_to(Path::new("/course/Module 1/01.mp4"), base),
            PathBuf::from("Module 1/01.mp4")
        );
        assert_eq!(
            relative_to(Path::new("/elsewhere/01.mp4"), base),
            PathBuf::from("/elsewhere/01.mp4")
        );
    }

    #[test]
    fn test_file_name_lossy() {
        assert_eq!(file_name_lossy(Path::new("/course/Module 1")), "Module 1");
        assert_eq!(file_name_lossy(Path::new("..")), "..");
    }
}

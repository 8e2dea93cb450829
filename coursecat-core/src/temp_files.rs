//! Temporary file management utilities.
//!
//! Concat lists and chapter documents only live for the duration of one
//! ffmpeg call. They are created as `tempfile::NamedTempFile` handles, so the
//! file is removed when the handle drops, on success and error paths alike.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{Builder as TempFileBuilder, NamedTempFile};

use crate::config::CoreConfig;
use crate::error::CoreResult;

/// Directory temporary files are created in: `config.temp_dir` or the system
/// temp directory.
pub fn temp_base_dir(config: &CoreConfig) -> PathBuf {
    config
        .temp_dir
        .clone()
        .unwrap_or_else(std::env::temp_dir)
}

/// Creates a temporary file with prefix and extension. Auto-deleted when dropped.
pub fn create_temp_file(dir: &Path, prefix: &str, extension: &str) -> CoreResult<NamedTempFile> {
    std::fs::create_dir_all(dir)?;
    let temp_file = TempFileBuilder::new()
        .prefix(&format!("{prefix}_"))
        .suffix(&format!(".{extension}"))
        .tempfile_in(dir)?;

    Ok(temp_file)
}

/// Creates a temporary file holding `contents`, flushed and ready to be read
/// by another process.
pub fn write_temp_file(
    dir: &Path,
    prefix: &str,
    extension: &str,
    contents: &str,
) -> CoreResult<NamedTempFile> {
    let mut temp_file = create_temp_file(dir, prefix, extension)?;
    temp_file.write_all(contents.as_bytes())?;
    temp_file.flush()?;
    Ok(temp_file)
}

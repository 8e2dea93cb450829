//! Configuration structures and constants for the coursecat-core library.
//!
//! This module provides the configuration for a course processing run: where
//! the course lives, which ffmpeg binary to drive, how many clips to
//! preprocess in parallel, and the file naming conventions of a course tree.

mod builder;

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};
use crate::external::ToolVersion;

pub use builder::CoreConfigBuilder;

// Default constants

/// Default ffmpeg executable, resolved through `PATH`.
pub const DEFAULT_FFMPEG_PATH: &str = "ffmpeg";

/// Extension of clip files and of the merged module outputs.
pub const DEFAULT_CLIP_EXTENSION: &str = "mp4";

/// Extension of subtitle sidecar files.
pub const DEFAULT_SUBTITLE_EXTENSION: &str = "srt";

/// Container format forced on muxed and merged outputs (`-f`).
pub const DEFAULT_CONTAINER_FORMAT: &str = "mp4";

/// Subtitle codec used when embedding a sidecar into an mp4 container.
pub const DEFAULT_SUBTITLE_CODEC: &str = "mov_text";

/// Course-level record, read from the course root.
pub const DEFAULT_COURSE_INFO_FILE: &str = "course-info.json";

/// Module-level record, read from each module directory.
pub const DEFAULT_MODULE_INFO_FILE: &str = "module-info.json";

/// Oldest ffmpeg release known to handle the concat + ffmetadata combination.
pub const MIN_TOOL_VERSION: ToolVersion = ToolVersion::new(4, 2, 0);

/// Main configuration structure for the coursecat-core library.
///
/// Built by the CLI (or any other consumer) and passed to
/// [`process_course`](crate::process_course). All fields have defaults except
/// the course directory, which must point at an existing course tree.
///
/// # Examples
///
/// ```rust,no_run
/// use coursecat_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .course_dir(PathBuf::from("/courses/rust-fundamentals"))
///     .jobs(4)
///     .build();
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Root of the course tree; each immediate subdirectory is a module
    pub course_dir: PathBuf,

    /// ffmpeg executable (name looked up in `PATH`, or an explicit path)
    pub ffmpeg_path: PathBuf,

    /// Number of clips preprocessed concurrently
    pub jobs: usize,

    /// Clip file extension, matched case-insensitively
    pub clip_extension: String,

    /// Subtitle sidecar extension
    pub subtitle_extension: String,

    /// Container format passed to `-f` for muxed and merged files
    pub container_format: String,

    /// Codec the subtitle stream is converted to when muxed
    pub subtitle_codec: String,

    /// File name of the course-level record in the course root
    pub course_info_file: String,

    /// File name of the module-level record in each module directory
    pub module_info_file: String,

    /// Directory for concat lists and metadata documents (system temp if unset)
    pub temp_dir: Option<PathBuf>,

    /// Upper bound for a single ffmpeg invocation; unlimited if unset
    pub tool_timeout: Option<Duration>,

    /// Minimum accepted ffmpeg version
    pub min_tool_version: ToolVersion,

    /// Keep module source directories after a successful merge
    pub keep_sources: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            course_dir: PathBuf::from("."),
            ffmpeg_path: PathBuf::from(DEFAULT_FFMPEG_PATH),
            jobs: num_cpus::get(),
            clip_extension: DEFAULT_CLIP_EXTENSION.to_string(),
            subtitle_extension: DEFAULT_SUBTITLE_EXTENSION.to_string(),
            container_format: DEFAULT_CONTAINER_FORMAT.to_string(),
            subtitle_codec: DEFAULT_SUBTITLE_CODEC.to_string(),
            course_info_file: DEFAULT_COURSE_INFO_FILE.to_string(),
            module_info_file: DEFAULT_MODULE_INFO_FILE.to_string(),
            temp_dir: None,
            tool_timeout: None,
            min_tool_version: MIN_TOOL_VERSION,
            keep_sources: false,
        }
    }
}

impl CoreConfig {
    /// Creates a configuration for the given course with default settings.
    pub fn new(course_dir: PathBuf) -> Self {
        Self {
            course_dir,
            ..Self::default()
        }
    }

    /// Checks the configuration for values the pipeline cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.course_dir.is_dir() {
            return Err(CoreError::Config(format!(
                "Course directory '{}' does not exist or is not a directory",
                self.course_dir.display()
            )));
        }

        if self.jobs == 0 {
            return Err(CoreError::Config(
                "Number of parallel jobs must be at least 1".to_string(),
            ));
        }

        for (name, value) in [
            ("clip extension", &self.clip_extension),
            ("subtitle extension", &self.subtitle_extension),
            ("container format", &self.container_format),
            ("course info file", &self.course_info_file),
            ("module info file", &self.module_info_file),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::Config(format!("The {name} must not be empty")));
            }
        }

        if self
            .clip_extension
            .eq_ignore_ascii_case(&self.subtitle_extension)
        {
            return Err(CoreError::Config(format!(
                "Clip and subtitle extensions must differ (both are '{}')",
                self.clip_extension
            )));
        }

        if self.tool_timeout.is_some_and(|t| t.is_zero()) {
            return Err(CoreError::Config(
                "Tool timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

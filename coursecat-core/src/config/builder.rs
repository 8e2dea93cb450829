// ============================================================================
// coursecat-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// Fluent construction of CoreConfig. Every setter is optional; unset values
// fall back to the defaults in config/mod.rs. Validation stays in
// CoreConfig::validate so that hand-built configs are checked the same way.

use std::path::PathBuf;
use std::time::Duration;

use super::CoreConfig;
use crate::external::ToolVersion;

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use coursecat_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
/// use std::time::Duration;
///
/// let config = CoreConfigBuilder::new()
///     .course_dir(PathBuf::from("/courses/intro"))
///     .ffmpeg_path(PathBuf::from("/opt/ffmpeg/bin/ffmpeg"))
///     .jobs(2)
///     .tool_timeout(Duration::from_secs(600))
///     .build();
///
/// assert_eq!(config.jobs, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    config: CoreConfig,
}

impl CoreConfigBuilder {
    /// Creates a new builder holding the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn course_dir(mut self, dir: PathBuf) -> Self {
        self.config.course_dir = dir;
        self
    }

    pub fn ffmpeg_path(mut self, path: PathBuf) -> Self {
        self.config.ffmpeg_path = path;
        self
    }

    pub fn jobs(mut self, jobs: usize) -> Self {
        self.config.jobs = jobs;
        self
    }

    pub fn clip_extension(mut self, extension: impl Into<String>) -> Self {
        self.config.clip_extension = extension.into();
        self
    }

    pub fn subtitle_extension(mut self, extension: impl Into<String>) -> Self {
        self.config.subtitle_extension = extension.into();
        self
    }

    pub fn container_format(mut self, format: impl Into<String>) -> Self {
        self.config.container_format = format.into();
        self
    }

    pub fn subtitle_codec(mut self, codec: impl Into<String>) -> Self {
        self.config.subtitle_codec = codec.into();
        self
    }

    pub fn course_info_file(mut self, name: impl Into<String>) -> Self {
        self.config.course_info_file = name.into();
        self
    }

    pub fn module_info_file(mut self, name: impl Into<String>) -> Self {
        self.config.module_info_file = name.into();
        self
    }

    /// Sets the directory for temporary concat lists and metadata documents.
    pub fn temp_dir(mut self, dir: PathBuf) -> Self {
        self.config.temp_dir = Some(dir);
        self
    }

    /// Bounds each ffmpeg invocation; a timed-out call counts as a failed call.
    pub fn tool_timeout(mut self, timeout: Duration) -> Self {
        self.config.tool_timeout = Some(timeout);
        self
    }

    pub fn min_tool_version(mut self, version: ToolVersion) -> Self {
        self.config.min_tool_version = version;
        self
    }

    pub fn keep_sources(mut self, keep: bool) -> Self {
        self.config.keep_sources = keep;
        self
    }

    pub fn build(self) -> CoreConfig {
        self.config
    }
}

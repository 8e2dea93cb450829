//! Core library for assembling video courses with ffmpeg.
//!
//! A course is a directory of module directories holding `.mp4` clips and
//! optional `.srt` subtitle sidecars. This crate embeds the subtitles into
//! their clips, probes every clip's duration, and merges each module into a
//! single file with one chapter per clip.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use coursecat_core::events::{EventDispatcher, LogEventHandler};
//! use coursecat_core::external::{FfmpegTool, check_tool_version};
//! use coursecat_core::metadata::JsonMetadataSource;
//! use coursecat_core::{CoreConfigBuilder, process_course};
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! let config = CoreConfigBuilder::new()
//!     .course_dir(PathBuf::from("/courses/rust-fundamentals"))
//!     .jobs(4)
//!     .build();
//! config.validate().unwrap();
//!
//! let tool = FfmpegTool::from_config(&config);
//! check_tool_version(&tool, config.min_tool_version).unwrap();
//!
//! let mut events = EventDispatcher::new();
//! events.add_handler(Arc::new(LogEventHandler));
//!
//! let metadata = JsonMetadataSource::from_config(&config);
//! let report = process_course(&tool, &metadata, &config, &events).unwrap();
//! assert!(!report.has_failures());
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod events;
pub mod external;
pub mod metadata;
pub mod processing;
pub mod temp_files;
pub mod utils;

// Re-exports for public API
pub use config::{CoreConfig, CoreConfigBuilder};
pub use error::{CoreError, CoreResult};
pub use events::{Event, EventDispatcher, EventHandler};
pub use external::{FfmpegTool, MediaTool, ToolOutput, ToolVersion, check_tool_version};
pub use metadata::{CourseInfo, CourseMetadataSource, JsonMetadataSource, ModuleInfo};
pub use processing::{
    ChapterEntry, ClipRecord, CourseReport, ModuleOutcome, ModuleReport, process_course,
};
pub use utils::format_duration;

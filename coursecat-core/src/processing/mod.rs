//! Course processing: clip preprocessing, chapter metadata, module merging
//! and the pipeline that drives them.

/// Subtitle embedding and duration probing for single clips
pub mod clip;

/// Chapter offsets and the FFMETADATA document
pub mod chapters;

/// Concatenation of a module's clips
pub mod merge;

/// Two-phase course run
pub mod pipeline;

pub use chapters::{ChapterEntry, build_metadata_document, chapter_entries};
pub use clip::{ClipPreprocessor, ClipRecord};
pub use merge::ModuleMerger;
pub use pipeline::{CourseReport, ModuleOutcome, ModuleReport, process_course};

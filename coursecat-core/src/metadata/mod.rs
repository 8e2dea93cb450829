//! Course and module description records.
//!
//! The chapter document embedded in each merged module needs the course
//! title, the author names and the module title. Those come from records that
//! sit next to the clips; `CourseMetadataSource` abstracts how they are read so
//! the merger can be exercised without real files.

use std::path::Path;

use serde::Deserialize;

use crate::error::CoreResult;

mod json_source;

pub use json_source::JsonMetadataSource;

/// Course-level record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInfo {
    #[serde(default, alias = "AuthorsFullnames")]
    pub authors_fullnames: String,
    #[serde(default, alias = "Title")]
    pub title: String,
}

/// Module-level record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleInfo {
    #[serde(default, alias = "Title")]
    pub title: String,
}

/// Read-only access to course and module records.
pub trait CourseMetadataSource: Send + Sync {
    /// Reads the record describing the course rooted at `course_dir`.
    fn read_course_info(&self, course_dir: &Path) -> CoreResult<CourseInfo>;

    /// Reads the record describing the module stored in `module_dir`.
    fn read_module_info(&self, module_dir: &Path) -> CoreResult<ModuleInfo>;
}

// ============================================================================
// coursecat-core/src/metadata/json_source.rs
// ============================================================================
//
// JSON METADATA SOURCE: course-info.json / module-info.json Readers
//
// Course downloaders store the course record as a one-element JSON array and
// the module record as a plain object. Both shapes (array or object) are
// accepted for the course record.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use super::{CourseInfo, CourseMetadataSource, ModuleInfo};
use crate::config::{CoreConfig, DEFAULT_COURSE_INFO_FILE, DEFAULT_MODULE_INFO_FILE};
use crate::error::{CoreError, CoreResult};

#[derive(Deserialize)]
#[serde(untagged)]
enum CourseRecord {
    List(Vec<CourseInfo>),
    Single(CourseInfo),
}

/// Reads course and module records from JSON files.
#[derive(Debug, Clone)]
pub struct JsonMetadataSource {
    course_info_file: String,
    module_info_file: String,
}

impl Default for JsonMetadataSource {
    fn default() -> Self {
        Self::new(DEFAULT_COURSE_INFO_FILE, DEFAULT_MODULE_INFO_FILE)
    }
}

impl JsonMetadataSource {
    pub fn new(course_info_file: impl Into<String>, module_info_file: impl Into<String>) -> Self {
        Self {
            course_info_file: course_info_file.into(),
            module_info_file: module_info_file.into(),
        }
    }

    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(&config.course_info_file, &config.module_info_file)
    }

    fn read_record(path: &Path) -> CoreResult<String> {
        debug!("Reading metadata record {}", path.display());
        fs::read_to_string(path).map_err(|e| CoreError::MetadataRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    fn parse_error(path: PathBuf, error: serde_json::Error) -> CoreError {
        CoreError::MetadataRead {
            path,
            reason: error.to_string(),
        }
    }
}

impl CourseMetadataSource for JsonMetadataSource {
    fn read_course_info(&self, course_dir: &Path) -> CoreResult<CourseInfo> {
        let path = course_dir.join(&self.course_info_file);
        let text = Self::read_record(&path)?;
        let record: CourseRecord =
            serde_json::from_str(&text).map_err(|e| Self::parse_error(path.clone(), e))?;

        match record {
            CourseRecord::Single(info) => Ok(info),
            CourseRecord::List(list) => {
                list.into_iter()
                    .next()
                    .ok_or_else(|| CoreError::MetadataRead {
                        path,
                        reason: "course record list is empty".to_string(),
                    })
            }
        }
    }

    fn read_module_info(&self, module_dir: &Path) -> CoreResult<ModuleInfo> {
        let path = module_dir.join(&self.module_info_file);
        let text = Self::read_record(&path)?;
        serde_json::from_str(&text).map_err(|e| Self::parse_error(path, e))
    }
}

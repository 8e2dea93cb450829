//! Module assembly.
//!
//! A module directory is merged into a single `<module dir>.<clip ext>` file
//! next to it, using ffmpeg's concat demuxer. The clips are stream-copied in
//! the order given and a chapter document built from the course and module
//! records is attached as global metadata.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use super::ClipRecord;
use super::chapters::build_metadata_document;
use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult, command_failed_error};
use crate::external::MediaTool;
use crate::external::ffmpeg::concat_args;
use crate::metadata::CourseMetadataSource;
use crate::temp_files::{temp_base_dir, write_temp_file};

/// Merges the clips of one module into a single file with chapters.
pub struct ModuleMerger<'a> {
    tool: &'a dyn MediaTool,
    metadata: &'a dyn CourseMetadataSource,
    config: &'a CoreConfig,
}

impl<'a> ModuleMerger<'a> {
    pub fn new(
        tool: &'a dyn MediaTool,
        metadata: &'a dyn CourseMetadataSource,
        config: &'a CoreConfig,
    ) -> Self {
        Self {
            tool,
            metadata,
            config,
        }
    }

    /// Path of the merged file for `module_dir`: the directory path with the
    /// clip extension appended.
    pub fn output_path(&self, module_dir: &Path) -> PathBuf {
        let mut output: OsString = module_dir.as_os_str().to_os_string();
        output.push(".");
        output.push(&self.config.clip_extension);
        PathBuf::from(output)
    }

    /// Concatenates `clips` (already in playback order) and returns the path
    /// of the merged file.
    ///
    /// The module's source directory is left alone; removing it is the
    /// caller's decision. On failure any partial output is removed.
    pub fn merge(&self, module_dir: &Path, clips: &[ClipRecord]) -> CoreResult<PathBuf> {
        if clips.is_empty() {
            return Err(CoreError::EmptyModule(module_dir.to_path_buf()));
        }

        let output = self.output_path(module_dir);
        remove_existing(&output)?;

        let temp_dir = temp_base_dir(self.config);
        let concat_list = write_temp_file(&temp_dir, "concat", "txt", &concat_list_contents(clips)?)?;

        let course_dir = module_dir.parent().ok_or_else(|| {
            CoreError::PathError(format!(
                "Module directory {} has no parent course directory",
                module_dir.display()
            ))
        })?;
        let course_info = self.metadata.read_course_info(course_dir)?;
        let module_info = self.metadata.read_module_info(module_dir)?;
        let document = build_metadata_document(
            &module_info.title,
            &course_info.title,
            &course_info.authors_fullnames,
            clips,
        );
        let chapters = write_temp_file(&temp_dir, "chapters", "txt", &document)?;

        let args = concat_args(
            concat_list.path(),
            chapters.path(),
            &output,
            &self.config.container_format,
        );
        debug!("Merging module: {} {:?}", self.tool.name(), args);

        let result = self.tool.run(&args).and_then(|tool_output| {
            if tool_output.success {
                Ok(())
            } else {
                Err(command_failed_error(
                    format!("{} (concat)", self.tool.name()),
                    tool_output.exit_code,
                    tool_output.log,
                ))
            }
        });

        if let Err(e) = result {
            if let Err(remove_err) = remove_existing(&output) {
                warn!(
                    "Failed to remove partial output {}: {}",
                    output.display(),
                    remove_err
                );
            }
            return Err(e);
        }

        info!("Merged {} clip(s) into {}", clips.len(), output.display());
        Ok(output)
    }
}

/// One `file '<path>'` line per clip, in order, with single quotes escaped
/// for the concat demuxer.
///
/// Paths are written absolute: the demuxer resolves relative entries against
/// the list file's directory, not the working directory.
pub fn concat_list_contents(clips: &[ClipRecord]) -> CoreResult<String> {
    clips
        .iter()
        .map(|clip| -> CoreResult<String> {
            let absolute = std::path::absolute(&clip.path)?;
            let path = absolute.to_string_lossy().replace('\'', "'\\''");
            Ok(format!("file '{path}'\n"))
        })
        .collect()
}

fn remove_existing(path: &Path) -> CoreResult<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed existing file {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

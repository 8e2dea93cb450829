//! Course tree discovery.
//!
//! A course root contains one directory per module; clips may sit anywhere
//! below it. This module finds the clips (recursively), the modules (one
//! level down), the subtitle sidecar of a clip, and decides which module a
//! clip belongs to.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{CoreError, CoreResult};

/// True when `path` has the given extension, compared case-insensitively.
#[must_use]
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Finds every clip file below `course_dir`, at any depth.
///
/// The result is sorted by path so that dispatch and progress output are
/// reproducible. Returns `CoreError::NoClipsFound` when nothing matches.
///
/// # Examples
///
/// ```rust,no_run
/// use coursecat_core::discovery::find_clip_files;
/// use std::path::Path;
///
/// let clips = find_clip_files(Path::new("/courses/intro"), "mp4").unwrap();
/// println!("Found {} clips", clips.len());
/// ```
pub fn find_clip_files(course_dir: &Path, clip_extension: &str) -> CoreResult<Vec<PathBuf>> {
    let mut clips = Vec::new();
    for entry in WalkDir::new(course_dir).min_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file() && has_extension(entry.path(), clip_extension) {
            clips.push(entry.into_path());
        }
    }

    if clips.is_empty() {
        return Err(CoreError::NoClipsFound(course_dir.to_path_buf()));
    }

    clips.sort();
    Ok(clips)
}

/// Lists the module directories of a course: its immediate subdirectories,
/// sorted by name.
pub fn find_module_dirs(course_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let read_dir = std::fs::read_dir(course_dir).map_err(|e| {
        CoreError::PathError(format!(
            "Cannot read course directory {}: {}",
            course_dir.display(),
            e
        ))
    })?;

    let mut modules = Vec::new();
    for entry in read_dir {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            modules.push(entry.path());
        }
    }

    modules.sort();
    Ok(modules)
}

/// Locates the subtitle sidecar of `clip`, if one exists.
///
/// Both `<stem>.<ext>` (`intro.srt`) and `<file name>.<ext>`
/// (`intro.mp4.srt`) are recognised; the first existing one wins.
pub fn find_subtitle_sidecar(clip: &Path, subtitle_extension: &str) -> Option<PathBuf> {
    let by_stem = clip.with_extension(subtitle_extension);

    let mut appended: OsString = clip.as_os_str().to_os_string();
    appended.push(".");
    appended.push(subtitle_extension);
    let by_name = PathBuf::from(appended);

    [by_stem, by_name].into_iter().find(|candidate| candidate.is_file())
}

/// True when `clip` lies inside `module_dir`.
///
/// Components are compared case-insensitively, one by one, so `Module 1`
/// does not claim the clips of `Module 10`.
#[must_use]
pub fn is_in_module(clip: &Path, module_dir: &Path) -> bool {
    let mut clip_components = clip.components().filter(|c| !matches!(c, Component::CurDir));
    for module_component in module_dir.components().filter(|c| !matches!(c, Component::CurDir)) {
        match clip_components.next() {
            Some(clip_component) if components_match(clip_component, module_component) => {}
            _ => return false,
        }
    }
    clip_components.next().is_some()
}

fn components_match(a: Component<'_>, b: Component<'_>) -> bool {
    let a = a.as_os_str().to_string_lossy();
    let b = b.as_os_str().to_string_lossy();
    a == b || a.to_lowercase() == b.to_lowercase()
}

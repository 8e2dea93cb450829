//! Chapter metadata for merged modules.
//!
//! Each clip of a module becomes one chapter. Offsets are cumulative integer
//! milliseconds, so the chapters of a module are contiguous from 0 and never
//! overlap. The rendered document follows the ffmpeg `FFMETADATA1` format and
//! is attached to the concat output with `-map_metadata`.

use std::fmt::Write as _;
use std::path::Path;

use super::ClipRecord;

/// One chapter of a merged module, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterEntry {
    pub start_ms: u64,
    pub end_ms: u64,
    pub title: String,
}

/// Computes the chapters of `clips`, in the order given.
///
/// Each duration is truncated to whole milliseconds before it is added to the
/// running offset. A clip shorter than one millisecond has no chapter of its
/// own, so starts stay strictly increasing.
pub fn chapter_entries(clips: &[ClipRecord]) -> Vec<ChapterEntry> {
    let mut offset_ms: u64 = 0;
    clips
        .iter()
        .filter_map(|clip| {
            let duration_ms = clip.duration.as_millis() as u64;
            if duration_ms == 0 {
                return None;
            }
            let start_ms = offset_ms;
            offset_ms += duration_ms;
            Some(ChapterEntry {
                start_ms,
                end_ms: offset_ms - 1,
                title: chapter_title(&clip.path),
            })
        })
        .collect()
}

/// Renders the `FFMETADATA1` document for a module.
///
/// # Examples
///
/// ```rust
/// use coursecat_core::processing::{ClipRecord, build_metadata_document};
/// use std::path::PathBuf;
/// use std::time::Duration;
///
/// let clips = vec![ClipRecord {
///     path: PathBuf::from("/course/Module 1/01 Intro.mp4"),
///     duration: Duration::from_millis(1500),
/// }];
/// let doc = build_metadata_document("Basics", "Rust", " Jane Doe ", &clips);
/// assert!(doc.starts_with(";FFMETADATA1\ntitle=Rust - Basics\nartist=Jane Doe\n"));
/// assert!(doc.contains("START=0\nEND=1499\ntitle=01 Intro\n"));
/// ```
pub fn build_metadata_document(
    module_title: &str,
    course_title: &str,
    authors: &str,
    clips: &[ClipRecord],
) -> String {
    let mut doc = String::from(";FFMETADATA1\n");
    let _ = writeln!(
        doc,
        "title={} - {}",
        escape_value(course_title),
        escape_value(module_title)
    );
    let _ = writeln!(doc, "artist={}", escape_value(authors.trim()));

    for chapter in chapter_entries(clips) {
        doc.push_str("[CHAPTER]\n");
        doc.push_str("TIMEBASE=1/1000\n");
        let _ = writeln!(doc, "START={}", chapter.start_ms);
        let _ = writeln!(doc, "END={}", chapter.end_ms);
        let _ = writeln!(doc, "title={}", escape_value(&chapter.title));
        doc.push('\n');
    }

    doc.push_str("[STREAM]\n");
    let _ = writeln!(doc, "title={}", escape_value(module_title));
    doc
}

fn chapter_title(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Backslash-escapes the characters that are special in ffmetadata values.
fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '=' | ';' | '#' | '\\' | '\n') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

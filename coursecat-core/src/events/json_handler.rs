//! JSON progress handler for structured progress output
//!
//! Writes one JSON object per line so that wrapper scripts can follow a
//! course run without scraping log text.

use super::{Event, EventHandler};
use serde_json::json;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Event handler that outputs progress events as JSON lines
pub struct JsonProgressHandler {
    output: Mutex<Box<dyn Write + Send>>,
}

impl JsonProgressHandler {
    /// Create a new JSON progress handler that writes to stdout
    pub fn new() -> Self {
        Self {
            output: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a new JSON progress handler with a custom writer
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            output: Mutex::new(writer),
        }
    }

    fn get_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    fn write_json(&self, value: serde_json::Value) {
        if let Ok(mut output) = self.output.lock() {
            if let Ok(json_str) = serde_json::to_string(&value) {
                let _ = writeln!(output, "{}", json_str);
                let _ = output.flush();
            }
        }
    }
}

impl Default for JsonProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for JsonProgressHandler {
    fn handle(&self, event: &Event) {
        let timestamp = Self::get_timestamp();

        let value = match event {
            Event::CourseStarted {
                course_dir,
                total_clips,
                jobs,
            } => json!({
                "type": "course_started",
                "course_dir": course_dir.display().to_string(),
                "total_clips": total_clips,
                "jobs": jobs,
                "timestamp": timestamp
            }),

            Event::ClipStarted { clip } => json!({
                "type": "clip_started",
                "clip": clip.display().to_string(),
                "timestamp": timestamp
            }),

            Event::SubtitleMerged { clip, subtitle } => json!({
                "type": "subtitle_merged",
                "clip": clip.display().to_string(),
                "subtitle": subtitle.display().to_string(),
                "timestamp": timestamp
            }),

            Event::SubtitleMergeFailed { clip, message } => json!({
                "type": "subtitle_merge_failed",
                "clip": clip.display().to_string(),
                "message": message,
                "timestamp": timestamp
            }),

            Event::ClipProcessed {
                clip,
                duration,
                completed,
                total,
            } => json!({
                "type": "clip_processed",
                "clip": clip.display().to_string(),
                "duration_ms": duration.as_millis() as u64,
                "completed": completed,
                "total": total,
                "percent": if *total > 0 {
                    (*completed as f64 / *total as f64 * 100.0).round()
                } else {
                    100.0
                },
                "timestamp": timestamp
            }),

            Event::PreprocessingComplete { clips, elapsed } => json!({
                "type": "preprocessing_complete",
                "clips": clips,
                "duration_seconds": elapsed.as_secs(),
                "timestamp": timestamp
            }),

            Event::ModuleStarted { module, clip_count } => json!({
                "type": "module_started",
                "module": module,
                "clip_count": clip_count,
                "timestamp": timestamp
            }),

            Event::ModuleMerged { module, output } => json!({
                "type": "module_merged",
                "module": module,
                "output": output.display().to_string(),
                "timestamp": timestamp
            }),

            Event::ModuleMergeFailed { module, message } => json!({
                "type": "module_merge_failed",
                "module": module,
                "message": message,
                "timestamp": timestamp
            }),

            Event::ModuleSkipped { module } => json!({
                "type": "module_skipped",
                "module": module,
                "timestamp": timestamp
            }),

            Event::SourceRemovalFailed { module, message } => json!({
                "type": "source_removal_failed",
                "module": module,
                "message": message,
                "timestamp": timestamp
            }),

            Event::CourseComplete {
                merged,
                failed,
                skipped,
                elapsed,
            } => json!({
                "type": "course_complete",
                "merged": merged,
                "failed": failed,
                "skipped": skipped,
                "duration_seconds": elapsed.as_secs(),
                "timestamp": timestamp
            }),
        };

        self.write_json(value);
    }
}

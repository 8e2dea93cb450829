//! Event handler that turns pipeline events into log records.

use log::{error, info, warn};

use super::{Event, EventHandler};
use crate::utils::format_duration;

/// Writes one log line per event through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventHandler;

impl EventHandler for LogEventHandler {
    fn handle(&self, event: &Event) {
        match event {
            Event::CourseStarted {
                course_dir,
                total_clips,
                jobs,
            } => info!(
                "Processing course '{}': {} clip(s), {} parallel job(s)",
                course_dir.display(),
                total_clips,
                jobs
            ),
            Event::ClipStarted { clip } => info!("Processing clip '{}'", clip.display()),
            Event::SubtitleMerged { clip, subtitle } => info!(
                "Embedded subtitles '{}' into '{}'",
                subtitle.display(),
                clip.display()
            ),
            Event::SubtitleMergeFailed { clip, message } => warn!(
                "Error when embedding subtitles into '{}', continuing without them: {}",
                clip.display(),
                message
            ),
            Event::ClipProcessed {
                clip,
                duration,
                completed,
                total,
            } => info!(
                "[{}/{}] '{}' duration {}",
                completed,
                total,
                clip.display(),
                format_duration(*duration)
            ),
            Event::PreprocessingComplete { clips, elapsed } => info!(
                "Preprocessed {} clip(s) in {}",
                clips,
                format_duration(*elapsed)
            ),
            Event::ModuleStarted { module, clip_count } => {
                info!("Merging {} clip(s) from '{}' module", clip_count, module)
            }
            Event::ModuleMerged { module, output } => {
                info!("Module '{}' merged into '{}'", module, output.display())
            }
            Event::ModuleMergeFailed { module, message } => {
                error!("Error when merging module '{}': {}", module, message)
            }
            Event::ModuleSkipped { module } => {
                warn!("Module '{}' has no clips, skipping", module)
            }
            Event::SourceRemovalFailed { module, message } => error!(
                "Module '{}' was merged but its source directory could not be removed: {}",
                module, message
            ),
            Event::CourseComplete {
                merged,
                failed,
                skipped,
                elapsed,
            } => info!(
                "Course finished in {}: {} merged, {} failed, {} skipped",
                format_duration(*elapsed),
                merged,
                failed,
                skipped
            ),
        }
    }
}

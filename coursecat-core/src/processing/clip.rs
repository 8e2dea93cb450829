// ============================================================================
// coursecat-core/src/processing/clip.rs
// ============================================================================
//
// CLIP PREPROCESSING: Subtitle Embedding and Duration Probing
//
// Every clip goes through two steps before any module is assembled:
//
// 1. If a subtitle sidecar sits next to the clip, it is muxed into the clip
//    as a text subtitle stream. The mux writes `<clip name>.tmp` and only
//    replaces the clip once ffmpeg reports success. A failed mux leaves the
//    clip and its sidecar untouched and is not an error.
// 2. The clip (in its final form) is read end to end and its duration is
//    taken from the ffmpeg log. This step has no fallback: a clip whose
//    duration cannot be determined aborts the course run.
//
// Every path touched here derives from the clip's own path, so distinct
// clips can be processed concurrently.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, warn};

use crate::config::CoreConfig;
use crate::discovery::find_subtitle_sidecar;
use crate::error::{CoreError, CoreResult, command_failed_error};
use crate::events::{Event, EventDispatcher};
use crate::external::ffmpeg::{duration_probe_args, subtitle_mux_args};
use crate::external::{MediaTool, parse_duration};
use crate::utils::relative_to;

/// A clip whose final duration is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipRecord {
    pub path: PathBuf,
    pub duration: Duration,
}

/// Prepares single clips for merging.
pub struct ClipPreprocessor<'a> {
    tool: &'a dyn MediaTool,
    config: &'a CoreConfig,
    events: &'a EventDispatcher,
}

impl<'a> ClipPreprocessor<'a> {
    pub fn new(tool: &'a dyn MediaTool, config: &'a CoreConfig, events: &'a EventDispatcher) -> Self {
        Self {
            tool,
            config,
            events,
        }
    }

    /// Embeds the clip's subtitle sidecar (if any) and probes its duration.
    pub fn preprocess(&self, clip: &Path) -> CoreResult<ClipRecord> {
        if let Some(subtitle) = find_subtitle_sidecar(clip, &self.config.subtitle_extension) {
            self.try_embed_subtitles(clip, &subtitle);
        }

        let duration = self.probe_duration(clip)?;
        Ok(ClipRecord {
            path: clip.to_path_buf(),
            duration,
        })
    }

    fn try_embed_subtitles(&self, clip: &Path, subtitle: &Path) {
        let display_clip = relative_to(clip, &self.config.course_dir);
        match self.embed_subtitles(clip, subtitle) {
            Ok(()) => {
                self.events.emit(Event::SubtitleMerged {
                    clip: display_clip,
                    subtitle: relative_to(subtitle, &self.config.course_dir),
                });
            }
            Err(e) => {
                warn!(
                    "Subtitles '{}' were not embedded into '{}': {}",
                    subtitle.display(),
                    clip.display(),
                    e
                );
                self.events.emit(Event::SubtitleMergeFailed {
                    clip: display_clip,
                    message: e.to_string(),
                });
            }
        }
    }

    fn embed_subtitles(&self, clip: &Path, subtitle: &Path) -> CoreResult<()> {
        let temp_output = mux_temp_path(clip);
        let args = subtitle_mux_args(
            clip,
            subtitle,
            &temp_output,
            &self.config.subtitle_codec,
            &self.config.container_format,
        );
        debug!("Embedding subtitles: {} {:?}", self.tool.name(), args);

        let result = self.tool.run(&args).and_then(|output| {
            if output.success {
                fs::rename(&temp_output, clip)?;
                Ok(())
            } else {
                Err(command_failed_error(
                    format!("{} (subtitle mux)", self.tool.name()),
                    output.exit_code,
                    output.log,
                ))
            }
        });

        if let Err(e) = result {
            remove_if_exists(&temp_output);
            return Err(e);
        }

        // The clip now carries the subtitles; a leftover sidecar is harmless.
        if let Err(e) = fs::remove_file(subtitle) {
            warn!(
                "Subtitles embedded but sidecar '{}' could not be removed: {}",
                subtitle.display(),
                e
            );
        }
        Ok(())
    }

    fn probe_duration(&self, clip: &Path) -> CoreResult<Duration> {
        let args = duration_probe_args(clip);
        debug!("Probing duration: {} {:?}", self.tool.name(), args);

        let output = self.tool.run(&args)?;
        if !output.success {
            return Err(CoreError::DurationProbe {
                clip: clip.to_path_buf(),
                reason: match output.exit_code {
                    Some(code) => format!("{} exited with code {}", self.tool.name(), code),
                    None => format!("{} did not exit normally", self.tool.name()),
                },
            });
        }

        parse_duration(&output.log).ok_or_else(|| CoreError::DurationProbe {
            clip: clip.to_path_buf(),
            reason: "no duration reported in tool output".to_string(),
        })
    }
}

/// `<clip file name>.tmp`, next to the clip.
fn mux_temp_path(clip: &Path) -> PathBuf {
    let mut name: OsString = clip.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

fn remove_if_exists(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!("Removed partial output {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove partial output {}: {}", path.display(), e),
    }
}

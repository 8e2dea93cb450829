// ============================================================================
// coursecat-core/src/processing/pipeline.rs
// ============================================================================
//
// COURSE PIPELINE: Parallel Clip Preprocessing, Sequential Module Assembly
//
// A course run moves through fixed phases with no way back:
//
//   discover clips -> preprocess clips (parallel) -> discover modules
//     -> merge each module (sequential) -> done
//
// Preprocessing runs on a dedicated rayon pool of `config.jobs` threads and
// `pool.install` returns only once every clip task has finished, so no merge
// starts while a clip is still being rewritten. The first clip whose duration
// cannot be determined aborts the run. A module that fails to merge is
// reported and the remaining modules are still processed.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use log::{info, warn};
use rayon::prelude::*;

use super::{ClipPreprocessor, ClipRecord, ModuleMerger};
use crate::config::CoreConfig;
use crate::discovery::{find_clip_files, find_module_dirs, is_in_module};
use crate::error::{CoreError, CoreResult};
use crate::events::{Event, EventDispatcher};
use crate::external::MediaTool;
use crate::metadata::CourseMetadataSource;
use crate::utils::{file_name_lossy, relative_to};

/// What happened to one module directory.
#[derive(Debug)]
pub enum ModuleOutcome {
    /// Merged, and the source directory was removed (or kept on request).
    Merged { output: PathBuf },
    /// Merged, but the source directory could not be removed.
    MergedSourceRetained { output: PathBuf, error: CoreError },
    /// Merge failed; the source directory is untouched.
    Failed { error: CoreError },
    /// No clips belong to the module.
    Skipped,
}

#[derive(Debug)]
pub struct ModuleReport {
    pub module_dir: PathBuf,
    pub outcome: ModuleOutcome,
}

/// Result of a course run.
#[derive(Debug, Default)]
pub struct CourseReport {
    /// Every preprocessed clip, sorted by path.
    pub clips: Vec<ClipRecord>,
    /// One entry per module directory, in processing order.
    pub modules: Vec<ModuleReport>,
}

impl CourseReport {
    pub fn merged_count(&self) -> usize {
        self.modules
            .iter()
            .filter(|m| {
                matches!(
                    m.outcome,
                    ModuleOutcome::Merged { .. } | ModuleOutcome::MergedSourceRetained { .. }
                )
            })
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.modules
            .iter()
            .filter(|m| matches!(m.outcome, ModuleOutcome::Failed { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.modules
            .iter()
            .filter(|m| matches!(m.outcome, ModuleOutcome::Skipped))
            .count()
    }

    /// True when at least one module failed to merge.
    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }
}

/// Runs the whole course: every clip is preprocessed, then every module is
/// merged.
///
/// # Errors
///
/// Returns an error for an invalid configuration, a traversal failure, or the
/// first clip whose duration could not be probed. Module failures are not
/// errors; they are recorded in the returned report.
///
/// # Examples
///
/// ```rust,no_run
/// use coursecat_core::events::{EventDispatcher, LogEventHandler};
/// use coursecat_core::external::FfmpegTool;
/// use coursecat_core::metadata::JsonMetadataSource;
/// use coursecat_core::{CoreConfig, process_course};
/// use std::path::PathBuf;
/// use std::sync::Arc;
///
/// let config = CoreConfig::new(PathBuf::from("/courses/rust-fundamentals"));
/// let tool = FfmpegTool::from_config(&config);
/// let metadata = JsonMetadataSource::from_config(&config);
/// let mut events = EventDispatcher::new();
/// events.add_handler(Arc::new(LogEventHandler));
///
/// let report = process_course(&tool, &metadata, &config, &events).unwrap();
/// println!("{} module(s) merged", report.merged_count());
/// ```
pub fn process_course(
    tool: &dyn MediaTool,
    metadata: &dyn CourseMetadataSource,
    config: &CoreConfig,
    events: &EventDispatcher,
) -> CoreResult<CourseReport> {
    config.validate()?;
    let config = &with_absolute_course_dir(config)?;
    let run_start = Instant::now();
    let course_dir = config.course_dir.as_path();

    let clips = match find_clip_files(course_dir, &config.clip_extension) {
        Ok(clips) => clips,
        Err(CoreError::NoClipsFound(dir)) => {
            warn!("No .{} clips found in {}", config.clip_extension, dir.display());
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    events.emit(Event::CourseStarted {
        course_dir: course_dir.to_path_buf(),
        total_clips: clips.len(),
        jobs: config.jobs,
    });

    let records = preprocess_clips(tool, config, events, &clips)?;
    events.emit(Event::PreprocessingComplete {
        clips: records.len(),
        elapsed: run_start.elapsed(),
    });

    let merger = ModuleMerger::new(tool, metadata, config);
    let mut report = CourseReport {
        clips: records,
        modules: Vec::new(),
    };

    for module_dir in find_module_dirs(course_dir)? {
        let group = module_clips(&report.clips, &module_dir);
        let outcome = assemble_module(&merger, config, events, &module_dir, &group);
        report.modules.push(ModuleReport { module_dir, outcome });
    }

    events.emit(Event::CourseComplete {
        merged: report.merged_count(),
        failed: report.failed_count(),
        skipped: report.skipped_count(),
        elapsed: run_start.elapsed(),
    });

    Ok(report)
}

/// Anchors the course directory to the current working directory.
///
/// Every clip, module and output path is derived from it, and ffmpeg resolves
/// relative concat list entries against the list file, which lives in the
/// temp directory.
fn with_absolute_course_dir(config: &CoreConfig) -> CoreResult<CoreConfig> {
    let mut config = config.clone();
    config.course_dir = std::path::absolute(&config.course_dir)?;
    Ok(config)
}

/// Preprocesses `clips` on a dedicated pool and returns their records sorted
/// by path.
fn preprocess_clips(
    tool: &dyn MediaTool,
    config: &CoreConfig,
    events: &EventDispatcher,
    clips: &[PathBuf],
) -> CoreResult<Vec<ClipRecord>> {
    if clips.is_empty() {
        return Ok(Vec::new());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs)
        .thread_name(|index| format!("coursecat-clip-{index}"))
        .build()
        .map_err(|e| CoreError::WorkerPool(format!("Failed to initialize thread pool: {e}")))?;

    info!(
        "Preprocessing {} clip(s) with {} parallel job(s)",
        clips.len(),
        config.jobs
    );

    let preprocessor = ClipPreprocessor::new(tool, config, events);
    let completed = AtomicUsize::new(0);
    let total = clips.len();

    let mut records = pool.install(|| {
        clips
            .par_iter()
            .map(|clip| {
                let display_clip = relative_to(clip, &config.course_dir);
                events.emit(Event::ClipStarted {
                    clip: display_clip.clone(),
                });

                let record = preprocessor.preprocess(clip)?;

                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                events.emit(Event::ClipProcessed {
                    clip: display_clip,
                    duration: record.duration,
                    completed: done,
                    total,
                });
                Ok(record)
            })
            .collect::<CoreResult<Vec<ClipRecord>>>()
    })?;

    records.sort_by(|a, b| a.path.as_os_str().cmp(b.path.as_os_str()));
    Ok(records)
}

/// The clips lying inside `module_dir`, in playback order (ascending path).
pub fn module_clips(records: &[ClipRecord], module_dir: &Path) -> Vec<ClipRecord> {
    let mut group: Vec<ClipRecord> = records
        .iter()
        .filter(|record| is_in_module(&record.path, module_dir))
        .cloned()
        .collect();
    group.sort_by(|a, b| a.path.as_os_str().cmp(b.path.as_os_str()));
    group
}

fn assemble_module(
    merger: &ModuleMerger<'_>,
    config: &CoreConfig,
    events: &EventDispatcher,
    module_dir: &Path,
    clips: &[ClipRecord],
) -> ModuleOutcome {
    let module = file_name_lossy(module_dir);

    if clips.is_empty() {
        events.emit(Event::ModuleSkipped { module });
        return ModuleOutcome::Skipped;
    }

    events.emit(Event::ModuleStarted {
        module: module.clone(),
        clip_count: clips.len(),
    });

    let output = match merger.merge(module_dir, clips) {
        Ok(output) => output,
        Err(error) => {
            events.emit(Event::ModuleMergeFailed {
                module,
                message: error.to_string(),
            });
            return ModuleOutcome::Failed { error };
        }
    };

    events.emit(Event::ModuleMerged {
        module: module.clone(),
        output: output.clone(),
    });

    if config.keep_sources {
        return ModuleOutcome::Merged { output };
    }

    match fs::remove_dir_all(module_dir) {
        Ok(()) => ModuleOutcome::Merged { output },
        Err(e) => {
            let error = CoreError::from(e);
            events.emit(Event::SourceRemovalFailed {
                module,
                message: error.to_string(),
            });
            ModuleOutcome::MergedSourceRetained { output, error }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn record(path: &str) -> ClipRecord {
        ClipRecord {
            path: PathBuf::from(path),
            duration: Duration::from_secs(1),
        }
    }

    #[test]
    fn test_module_clips_filters_and_orders() {
        let records = vec![
            record("/c/Module 10/01.mp4"),
            record("/c/Module 1/b/02.mp4"),
            record("/c/Module 1/10.mp4"),
            record("/c/module 1/02.mp4"),
            record("/c/root.mp4"),
        ];
        let group = module_clips(&records, Path::new("/c/Module 1"));
        let paths: Vec<_> = group.iter().map(|r| r.path.to_string_lossy().into_owned()).collect();
        assert_eq!(
            paths,
            vec!["/c/Module 1/10.mp4", "/c/Module 1/b/02.mp4", "/c/module 1/02.mp4"]
        );
    }

    #[test]
    fn test_report_counts() {
        let report = CourseReport {
            clips: Vec::new(),
            modules: vec![
                ModuleReport {
                    module_dir: PathBuf::from("/c/a"),
                    outcome: ModuleOutcome::Merged {
                        output: PathBuf::from("/c/a.mp4"),
                    },
                },
                ModuleReport {
                    module_dir: PathBuf::from("/c/b"),
                    outcome: ModuleOutcome::Failed {
                        error: CoreError::EmptyModule(PathBuf::from("/c/b")),
                    },
                },
                ModuleReport {
                    module_dir: PathBuf::from("/c/c"),
                    outcome: ModuleOutcome::Skipped,
                },
            ],
        };
        assert_eq!(report.merged_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.skipped_count(), 1);
        assert!(report.has_failures());
    }
}

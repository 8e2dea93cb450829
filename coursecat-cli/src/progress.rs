// ============================================================================
// coursecat-cli/src/progress.rs
// ============================================================================
//
// PROGRESS REPORTING: indicatif Bars Driven by Pipeline Events
//
// The preprocessing phase gets a bar with one tick per clip; the merge phase
// gets a spinner naming the module being assembled. Both draw on stderr and
// are hidden when stderr is not a terminal.

use std::io::IsTerminal;
use std::sync::Mutex;
use std::time::Duration;

use coursecat_core::events::{Event, EventHandler};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Event handler rendering course progress with indicatif.
pub struct ProgressBarHandler {
    current: Mutex<Option<ProgressBar>>,
}

impl ProgressBarHandler {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }

    fn clip_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("  ⧖ Clips: {pos}/{len} [{bar:30}] {elapsed_precise} {wide_msg}")
        {
            pb.set_style(style.progress_chars("##."));
        }
        Self::attach(pb)
    }

    fn merge_spinner(module: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner} Merging {msg}") {
            pb.set_style(style);
        }
        pb.set_message(module.to_string());
        let pb = Self::attach(pb);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    fn attach(pb: ProgressBar) -> ProgressBar {
        if !std::io::stderr().is_terminal() {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        pb
    }

    fn replace(&self, next: Option<ProgressBar>) {
        if let Ok(mut current) = self.current.lock() {
            if let Some(previous) = current.take() {
                previous.finish_and_clear();
            }
            *current = next;
        }
    }

    fn with_current(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(current) = self.current.lock() {
            if let Some(pb) = current.as_ref() {
                f(pb);
            }
        }
    }
}

impl Default for ProgressBarHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for ProgressBarHandler {
    fn handle(&self, event: &Event) {
        match event {
            Event::CourseStarted { total_clips, .. } => {
                self.replace(Some(Self::clip_bar(*total_clips as u64)));
            }
            Event::ClipProcessed { clip, .. } => {
                self.with_current(|pb| {
                    pb.set_message(clip.display().to_string());
                    pb.inc(1);
                });
            }
            Event::PreprocessingComplete { .. } => self.replace(None),
            Event::ModuleStarted { module, .. } => {
                self.replace(Some(Self::merge_spinner(module)));
            }
            Event::ModuleMerged { .. }
            | Event::ModuleMergeFailed { .. }
            | Event::CourseComplete { .. } => self.replace(None),
            _ => {}
        }
    }
}

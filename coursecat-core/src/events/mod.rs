//! Progress events emitted by the course pipeline.
//!
//! The pipeline never prints anything itself. It emits `Event`s through an
//! `EventDispatcher`, and the consumer decides how to present them (log
//! lines, a progress bar, JSON for another program).

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub mod json_handler;
pub mod log_handler;

pub use json_handler::JsonProgressHandler;
pub use log_handler::LogEventHandler;

#[derive(Debug, Clone)]
pub enum Event {
    // Course level
    CourseStarted {
        course_dir: PathBuf,
        total_clips: usize,
        jobs: usize,
    },

    // Clip preprocessing (clip paths are relative to the course root)
    ClipStarted {
        clip: PathBuf,
    },
    SubtitleMerged {
        clip: PathBuf,
        subtitle: PathBuf,
    },
    SubtitleMergeFailed {
        clip: PathBuf,
        message: String,
    },
    ClipProcessed {
        clip: PathBuf,
        duration: Duration,
        completed: usize,
        total: usize,
    },
    PreprocessingComplete {
        clips: usize,
        elapsed: Duration,
    },

    // Module assembly
    ModuleStarted {
        module: String,
        clip_count: usize,
    },
    ModuleMerged {
        module: String,
        output: PathBuf,
    },
    ModuleMergeFailed {
        module: String,
        message: String,
    },
    ModuleSkipped {
        module: String,
    },
    SourceRemovalFailed {
        module: String,
        message: String,
    },

    CourseComplete {
        merged: usize,
        failed: usize,
        skipped: usize,
        elapsed: Duration,
    },
}

pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &Event);
}

pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    pub fn emit(&self, event: Event) {
        for handler in &self.handlers {
            handler.handle(&event);
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

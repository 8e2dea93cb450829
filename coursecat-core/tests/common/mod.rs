// coursecat-core/tests/common/mod.rs
//
// Shared test fixtures: a scripted `MediaTool` that behaves like ffmpeg on
// small text "clips", and helpers that lay out course trees on disk.
//
// A fake clip is a text file whose first line is `duration=H:MM:SS.frac`.
// The probe reports that value in an ffmpeg-style log line, so any rewrite
// of the clip (subtitle mux) is visible to later probes.

#![allow(dead_code)]

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use coursecat_core::error::CoreResult;
use coursecat_core::external::{MediaTool, ToolOutput};

/// The kind of ffmpeg invocation recognised by the mock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Version,
    Mux,
    Probe,
    Concat,
}

/// One recorded invocation.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub kind: CallKind,
    pub args: Vec<String>,
}

/// Inputs seen by a concat call, captured while the temp files still exist.
#[derive(Debug, Clone)]
pub struct ConcatCall {
    pub list: String,
    pub metadata: String,
    pub output: PathBuf,
}

/// Scripted stand-in for ffmpeg.
#[derive(Default)]
pub struct MockMediaTool {
    banner: Option<String>,
    mux_duration: Option<String>,
    fail_mux: HashSet<String>,
    fail_probe: HashSet<String>,
    missing_duration: HashSet<String>,
    fail_concat: HashSet<String>,
    probe_delay: Option<Duration>,
    calls: Mutex<Vec<RecordedCall>>,
    concat_calls: Mutex<Vec<ConcatCall>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockMediaTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Banner printed for `-version`.
    pub fn with_banner(mut self, banner: &str) -> Self {
        self.banner = Some(banner.to_string());
        self
    }

    /// Duration written into clips rewritten by a successful mux.
    pub fn with_mux_duration(mut self, duration: &str) -> Self {
        self.mux_duration = Some(duration.to_string());
        self
    }

    /// Mux fails for the clip with this file name.
    pub fn fail_mux_for(mut self, clip_name: &str) -> Self {
        self.fail_mux.insert(clip_name.to_string());
        self
    }

    /// Probe exits non-zero for the clip with this file name.
    pub fn fail_probe_for(mut self, clip_name: &str) -> Self {
        self.fail_probe.insert(clip_name.to_string());
        self
    }

    /// Probe succeeds but prints no `Duration:` line for this clip.
    pub fn omit_duration_for(mut self, clip_name: &str) -> Self {
        self.missing_duration.insert(clip_name.to_string());
        self
    }

    /// Concat fails (after writing a partial file) for this output name.
    pub fn fail_concat_for(mut self, output_name: &str) -> Self {
        self.fail_concat.insert(output_name.to_string());
        self
    }

    /// Each probe sleeps this long, to make concurrency observable.
    pub fn with_probe_delay(mut self, delay: Duration) -> Self {
        self.probe_delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_of(&self, kind: CallKind) -> Vec<RecordedCall> {
        self.calls().into_iter().filter(|c| c.kind == kind).collect()
    }

    pub fn concat_calls(&self) -> Vec<ConcatCall> {
        self.concat_calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn classify(args: &[String]) -> CallKind {
        if args.iter().any(|a| a == "-version") {
            CallKind::Version
        } else if args.iter().any(|a| a == "concat") {
            CallKind::Concat
        } else if args.iter().any(|a| a == "null") {
            CallKind::Probe
        } else {
            CallKind::Mux
        }
    }

    fn run_version(&self) -> ToolOutput {
        match &self.banner {
            Some(banner) => ToolOutput::success(banner.clone()),
            None => ToolOutput::success(
                "ffmpeg version 6.1.1 Copyright (c) 2000-2023 the FFmpeg developers\n",
            ),
        }
    }

    fn run_mux(&self, args: &[String]) -> ToolOutput {
        let inputs = input_args(args);
        let clip = PathBuf::from(&inputs[0]);
        let subtitle = PathBuf::from(&inputs[1]);
        let output = PathBuf::from(args.last().unwrap());

        if self.fail_mux.contains(&file_name(&clip)) {
            fs::write(&output, "partial").unwrap();
            return ToolOutput::failure(
                1,
                format!("{}: Invalid data found when processing input\n", subtitle.display()),
            );
        }

        let original = fs::read_to_string(&clip).unwrap();
        let rewritten = match &self.mux_duration {
            Some(duration) => replace_duration(&original, duration),
            None => original,
        };
        fs::write(
            &output,
            format!("{}subs={}\n", rewritten, file_name(&subtitle)),
        )
        .unwrap();
        ToolOutput::success("Output #0, mp4\n  Stream #0:2: Subtitle: mov_text\n")
    }

    fn run_probe(&self, args: &[String]) -> ToolOutput {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);
        if let Some(delay) = self.probe_delay {
            thread::sleep(delay);
        }

        let clip = PathBuf::from(&input_args(args)[0]);
        let name = file_name(&clip);
        let output = if self.fail_probe.contains(&name) {
            ToolOutput::failure(1, format!("{}: moov atom not found\n", clip.display()))
        } else if self.missing_duration.contains(&name) {
            ToolOutput::success(format!("Input #0, mov,mp4, from '{}':\n", clip.display()))
        } else {
            let text = fs::read_to_string(&clip).unwrap_or_default();
            match read_duration(&text) {
                Some(duration) => ToolOutput::success(format!(
                    "Input #0, mov,mp4, from '{}':\n  Duration: {}, start: 0.000000, bitrate: 128 kb/s\n",
                    clip.display(),
                    duration
                )),
                None => ToolOutput::failure(1, "Invalid data found when processing input\n"),
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        output
    }

    fn run_concat(&self, args: &[String]) -> ToolOutput {
        let inputs = input_args(args);
        let list = fs::read_to_string(&inputs[0]).unwrap();
        let metadata = fs::read_to_string(&inputs[1]).unwrap();
        let output = PathBuf::from(args.last().unwrap());

        self.concat_calls.lock().unwrap().push(ConcatCall {
            list: list.clone(),
            metadata,
            output: output.clone(),
        });

        // The concat demuxer resolves relative entries against the list's directory.
        let list_dir = Path::new(&inputs[0]).parent().unwrap().to_path_buf();
        for entry in concat_entries(&list) {
            let resolved = list_dir.join(&entry);
            if !resolved.exists() {
                return ToolOutput::failure(
                    1,
                    format!("{}: No such file or directory\n", resolved.display()),
                );
            }
        }

        if self.fail_concat.contains(&file_name(&output)) {
            fs::write(&output, "partial").unwrap();
            return ToolOutput::failure(1, "Impossible to open clip\n");
        }

        fs::write(&output, list).unwrap();
        ToolOutput::success("")
    }
}

impl MediaTool for MockMediaTool {
    fn run(&self, args: &[OsString]) -> CoreResult<ToolOutput> {
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        let kind = Self::classify(&args);
        self.calls.lock().unwrap().push(RecordedCall {
            kind,
            args: args.clone(),
        });

        Ok(match kind {
            CallKind::Version => self.run_version(),
            CallKind::Mux => self.run_mux(&args),
            CallKind::Probe => self.run_probe(&args),
            CallKind::Concat => self.run_concat(&args),
        })
    }

    fn name(&self) -> String {
        "mock-ffmpeg".to_string()
    }
}

/// Values following each `-i` flag, in order.
pub fn input_args(args: &[String]) -> Vec<String> {
    args.windows(2)
        .filter(|pair| pair[0] == "-i")
        .map(|pair| pair[1].clone())
        .collect()
}

/// Paths of the `file '...'` lines of a concat list, unescaped.
pub fn concat_entries(list: &str) -> Vec<PathBuf> {
    list.lines()
        .filter_map(|line| line.strip_prefix("file '")?.strip_suffix('\''))
        .map(|quoted| PathBuf::from(quoted.replace("'\\''", "'")))
        .collect()
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}

fn read_duration(text: &str) -> Option<&str> {
    text.lines().find_map(|line| line.strip_prefix("duration="))
}

fn replace_duration(text: &str, duration: &str) -> String {
    text.lines()
        .map(|line| {
            if line.starts_with("duration=") {
                format!("duration={duration}\n")
            } else {
                format!("{line}\n")
            }
        })
        .collect()
}

// ============================================================================
// COURSE TREE HELPERS
// ============================================================================

/// Writes a fake clip reporting `duration` (`H:MM:SS.frac`).
pub fn write_clip(path: &Path, duration: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, format!("duration={duration}\n")).unwrap();
    path.to_path_buf()
}

pub fn write_subtitle(path: &Path) -> PathBuf {
    fs::write(path, "1\n00:00:00,000 --> 00:00:01,000\nHello\n").unwrap();
    path.to_path_buf()
}

pub fn write_course_info(course_dir: &Path, title: &str, authors: &str) {
    fs::create_dir_all(course_dir).unwrap();
    fs::write(
        course_dir.join("course-info.json"),
        format!(r#"[{{"Title": "{title}", "AuthorsFullnames": "{authors}"}}]"#),
    )
    .unwrap();
}

pub fn write_module_info(module_dir: &Path, title: &str) {
    fs::create_dir_all(module_dir).unwrap();
    fs::write(
        module_dir.join("module-info.json"),
        format!(r#"{{"Title": "{title}"}}"#),
    )
    .unwrap();
}

/// Parses `START=`/`END=` pairs out of a rendered chapter document.
pub fn chapter_bounds(metadata: &str) -> Vec<(u64, u64)> {
    let starts = metadata
        .lines()
        .filter_map(|l| l.strip_prefix("START="))
        .map(|v| v.parse::<u64>().unwrap());
    let ends = metadata
        .lines()
        .filter_map(|l| l.strip_prefix("END="))
        .map(|v| v.parse::<u64>().unwrap());
    starts.zip(ends).collect()
}

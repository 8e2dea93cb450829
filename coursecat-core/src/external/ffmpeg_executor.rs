// ============================================================================
// coursecat-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: Subprocess Management for the MediaTool Trait
//
// Runs the ffmpeg binary with an explicit argument vector and captures its
// output. stdout and stderr are each drained by a reader thread; both threads
// feed a single channel so the resulting log keeps the order in which lines
// arrived, and neither pipe can fill up and stall the child.
//
// An optional timeout kills the child once it elapses. A timed-out run is
// reported exactly like a failed one: `success == false` with an explanatory
// line at the end of the log.

use std::ffi::OsString;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, warn};

use super::{MediaTool, ToolOutput};
use crate::config::CoreConfig;
use crate::error::{CoreResult, command_start_error, command_wait_error};

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// `MediaTool` backed by an ffmpeg executable.
#[derive(Debug, Clone)]
pub struct FfmpegTool {
    executable: PathBuf,
    timeout: Option<Duration>,
}

impl Default for FfmpegTool {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_FFMPEG_PATH)
    }
}

impl FfmpegTool {
    /// Creates a tool for the given executable name or path, without timeout.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            timeout: None,
        }
    }

    /// Creates a tool using the executable and timeout from `config`.
    pub fn from_config(config: &CoreConfig) -> Self {
        Self {
            executable: config.ffmpeg_path.clone(),
            timeout: config.tool_timeout,
        }
    }

    /// Bounds every invocation by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn describe(&self, args: &[OsString]) -> String {
        let mut line = self.executable.display().to_string();
        for arg in args {
            line.push(' ');
            line.push_str(&format!("{:?}", arg.to_string_lossy()));
        }
        line
    }
}

impl MediaTool for FfmpegTool {
    fn run(&self, args: &[OsString]) -> CoreResult<ToolOutput> {
        debug!("Running: {}", self.describe(args));
        let command_name = self.name();

        let mut child = Command::new(&self.executable)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| command_start_error(command_name.clone(), e))?;

        let (tx, rx) = mpsc::channel::<String>();
        let mut readers: Vec<JoinHandle<()>> = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            readers.push(spawn_line_reader(stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(spawn_line_reader(stderr, tx.clone()));
        }
        // The channel disconnects once both readers hit end of stream.
        drop(tx);

        let deadline = self.timeout.map(|timeout| Instant::now() + timeout);
        let mut log = String::new();
        let mut timed_out = false;

        loop {
            let received = match deadline {
                Some(deadline) => {
                    rx.recv_timeout(deadline.saturating_duration_since(Instant::now()))
                }
                None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };

            match received {
                Ok(line) => {
                    log.push_str(&line);
                    log.push('\n');
                }
                Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {
                    timed_out = true;
                    if let Err(e) = child.kill() {
                        warn!("Failed to kill timed out {}: {}", command_name, e);
                    }
                    break;
                }
            }
        }

        // Closed pipes do not mean the child has exited.
        if let (Some(deadline), false) = (deadline, timed_out) {
            let exited = wait_until(&mut child, deadline)
                .map_err(|e| command_wait_error(command_name.clone(), e))?;
            if !exited {
                timed_out = true;
                if let Err(e) = child.kill() {
                    warn!("Failed to kill timed out {}: {}", command_name, e);
                }
            }
        }

        let status = child
            .wait()
            .map_err(|e| command_wait_error(command_name.clone(), e))?;

        // After a timeout a grandchild may still hold the pipes open, so the
        // readers are left to finish on their own.
        if !timed_out {
            for reader in readers {
                if reader.join().is_err() {
                    warn!("{} output reader thread panicked", command_name);
                }
            }
        }
        for line in rx.try_iter() {
            log.push_str(&line);
            log.push('\n');
        }

        if timed_out {
            let limit = self.timeout.unwrap_or_default();
            log.push_str(&format!(
                "{} was terminated after exceeding the {}s timeout\n",
                command_name,
                limit.as_secs()
            ));
            return Ok(ToolOutput {
                success: false,
                exit_code: status.code(),
                log,
            });
        }

        debug!("{} exited with {}", command_name, status);
        Ok(ToolOutput {
            success: status.success(),
            exit_code: status.code(),
            log,
        })
    }
}

/// Polls `child` until it exits or `deadline` passes. Returns whether it exited.
fn wait_until(child: &mut Child, deadline: Instant) -> std::io::Result<bool> {
    loop {
        if child.try_wait()?.is_some() {
            return Ok(true);
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Ok(false);
        }
        thread::sleep(remaining.min(EXIT_POLL_INTERVAL));
    }
}

/// Forwards every line of `source` to `tx` until end of stream.
///
/// Bytes are decoded lossily so a stray non-UTF-8 sequence cannot stop the
/// drain and leave the child blocked on a full pipe.
fn spawn_line_reader<R>(source: R, tx: Sender<String>) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut reader = BufReader::new(source);
        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            match reader.read_until(b'\n', &mut buffer) {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buffer);
                    let line = line.trim_end_matches(['\r', '\n']).to_string();
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Error reading tool output: {}", e);
                    break;
                }
            }
        }
    })
}

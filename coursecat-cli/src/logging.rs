// ============================================================================
// coursecat-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: Console and File Output for the `log` Facade
//
// coursecat-core only talks to the `log` facade. This module installs a fern
// dispatcher with two outputs:
// - the console (stderr), colored by level, at the level chosen on the
//   command line
// - an optional plain-text log file that always records debug detail
//
// stdout is left alone so `--json` progress lines stay machine-readable.

use std::path::Path;

use log::LevelFilter;
use owo_colors::OwoColorize;

use coursecat_core::{CoreError, CoreResult};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Name of the run log file for the current moment.
pub fn log_file_name() -> String {
    format!("coursecat_{}.log", get_timestamp())
}

fn colored_level(level: log::Level) -> String {
    match level {
        log::Level::Error => "ERROR".bright_red().bold().to_string(),
        log::Level::Warn => "WARN ".yellow().to_string(),
        log::Level::Info => "INFO ".green().to_string(),
        log::Level::Debug => "DEBUG".blue().to_string(),
        log::Level::Trace => "TRACE".magenta().to_string(),
    }
}

/// Installs the global logger.
///
/// Console records at `console_level` and above go to stderr. When
/// `log_file` is given, every record at debug level and above is also
/// appended to it.
pub fn setup_logging(console_level: LevelFilter, log_file: Option<&Path>) -> CoreResult<()> {
    let console = fern::Dispatch::new()
        .level(console_level)
        .format(|out, message, record| {
            out.finish(format_args!("{} {}", colored_level(record.level()), message))
        })
        .chain(std::io::stderr());

    let mut dispatch = fern::Dispatch::new()
        .level(LevelFilter::Debug)
        .chain(console);

    if let Some(path) = log_file {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = fern::log_file(path)?;
        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "{} [{}] {}",
                        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                        record.level(),
                        message
                    ))
                })
                .chain(file),
        );
    }

    dispatch
        .apply()
        .map_err(|e| CoreError::Config(format!("Failed to initialize logging: {e}")))
}

//! Implementation of the 'process' subcommand.
//!
//! Builds the core configuration from the command line, sets up logging,
//! checks the ffmpeg version and hands the course to the pipeline.

use std::io::IsTerminal;
use std::sync::Arc;
use std::time::{Duration, Instant};

use coursecat_core::events::{EventDispatcher, JsonProgressHandler, LogEventHandler};
use coursecat_core::{
    CoreConfig, CoreConfigBuilder, CourseReport, FfmpegTool, JsonMetadataSource,
    check_tool_version, process_course,
};
use log::{LevelFilter, info};

use crate::cli::ProcessArgs;
use crate::error::CliResult;
use crate::logging::{log_file_name, setup_logging};
use crate::output::{print_heading, print_info, print_summary, print_tool};
use crate::progress::ProgressBarHandler;

/// Translates command-line arguments into a core configuration.
pub fn build_config(args: &ProcessArgs) -> CoreConfig {
    let mut builder = CoreConfigBuilder::new()
        .course_dir(args.course_dir.clone())
        .keep_sources(args.keep_sources);

    if let Some(jobs) = args.jobs {
        builder = builder.jobs(jobs);
    }
    if let Some(ffmpeg) = &args.ffmpeg {
        builder = builder.ffmpeg_path(ffmpeg.clone());
    }
    if let Some(temp_dir) = &args.temp_dir {
        builder = builder.temp_dir(temp_dir.clone());
    }
    if let Some(seconds) = args.timeout {
        builder = builder.tool_timeout(Duration::from_secs(seconds));
    }

    builder.build()
}

/// Runs the pipeline for one course and prints a summary.
pub fn run_process(args: ProcessArgs, verbose: bool) -> CliResult<CourseReport> {
    let run_start = Instant::now();
    let config = build_config(&args);

    // An interactive run shows the progress bar instead of per-clip info lines.
    let show_bar = !args.json && !verbose && std::io::stderr().is_terminal();
    let console_level = if verbose {
        LevelFilter::Debug
    } else if show_bar {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    let log_path = args.log_dir.join(log_file_name());
    setup_logging(console_level, Some(&log_path))?;

    config.validate()?;

    if !args.json {
        print_heading("Coursecat");
        print_info("Course directory", config.course_dir.display());
        print_info("Parallel jobs", config.jobs);
        print_info("Log file", log_path.display());
    }

    let tool = FfmpegTool::from_config(&config);
    let version = check_tool_version(&tool, config.min_tool_version)?;
    info!("Using {} version {}", config.ffmpeg_path.display(), version);
    if !args.json {
        print_tool(&config.ffmpeg_path, version);
    }

    let mut events = EventDispatcher::new();
    events.add_handler(Arc::new(LogEventHandler));
    if args.json {
        events.add_handler(Arc::new(JsonProgressHandler::new()));
    } else if show_bar {
        events.add_handler(Arc::new(ProgressBarHandler::new()));
    }

    let metadata = JsonMetadataSource::from_config(&config);
    let report = process_course(&tool, &metadata, &config, &events)?;

    if !args.json {
        print_summary(&report, run_start.elapsed());
    }
    Ok(report)
}

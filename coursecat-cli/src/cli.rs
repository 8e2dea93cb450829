// coursecat-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Coursecat: course module assembly tool",
    long_about = "Embeds subtitles into course clips and merges each module into a single \
                  video with chapters, using ffmpeg via the coursecat-core library."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show debug output on the console
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Processes a course directory: embeds subtitles, then merges every module
    Process(ProcessArgs),
    /// Reports the ffmpeg version that would be used
    CheckTool(CheckToolArgs),
}

#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Course root directory (one subdirectory per module)
    #[arg(required = true, value_name = "COURSE_DIR")]
    pub course_dir: PathBuf,

    /// Number of clips preprocessed in parallel (defaults to the CPU count)
    #[arg(short, long, value_name = "N", env = "COURSECAT_JOBS")]
    pub jobs: Option<usize>,

    /// ffmpeg executable to run
    #[arg(long, value_name = "PATH", env = "COURSECAT_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// Directory for log files
    #[arg(short, long, value_name = "LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,

    /// Directory for temporary concat lists and chapter files
    #[arg(long, value_name = "DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Kill any single ffmpeg call running longer than this many seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Keep module directories after a successful merge
    #[arg(long, default_value_t = false)]
    pub keep_sources: bool,

    /// Print progress as JSON lines on stdout
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CheckToolArgs {
    /// ffmpeg executable to check
    #[arg(long, value_name = "PATH", env = "COURSECAT_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,
}

// coursecat-cli/src/main.rs
//
// Entry point for the coursecat binary: parses the command line, dispatches
// to the subcommand and maps the outcome to an exit code.
//
// Exit codes:
// - 0: the command succeeded and every module was merged or skipped
// - 1: a fatal error occurred, or at least one module failed to merge

use clap::Parser;
use coursecat_cli::error::{EXIT_FAILURE, error_hint};
use coursecat_cli::logging::setup_logging;
use coursecat_cli::{Cli, Commands, run_check_tool, run_process};
use log::LevelFilter;
use owo_colors::OwoColorize;
use std::process;

fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    let result = match cli.command {
        Commands::Process(args) => run_process(args, verbose).map(|report| {
            if report.has_failures() {
                eprintln!(
                    "{} {} module(s) could not be merged; their directories were left in place",
                    "Error:".red().bold(),
                    report.failed_count()
                );
                process::exit(EXIT_FAILURE);
            }
        }),
        Commands::CheckTool(args) => {
            let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
            setup_logging(level, None).and_then(|()| run_check_tool(args).map(|_| ()))
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(hint) = error_hint(&e) {
            eprintln!("{}", hint.dimmed());
        }
        process::exit(EXIT_FAILURE);
    }
}

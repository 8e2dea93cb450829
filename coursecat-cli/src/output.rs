//! Console presentation of run headers and the final course summary.

use std::fmt::Display;
use std::path::Path;
use std::time::Duration;

use coursecat_core::utils::file_name_lossy;
use coursecat_core::{CourseReport, ModuleOutcome, ToolVersion, format_duration};
use owo_colors::OwoColorize;

/// Print a heading with colored styling and clear separation
pub fn print_heading(text: &str) {
    let line = "=".repeat(50);
    println!("{}", line.bright_blue());
    println!("{}", format!(" {} ", text).bold());
    println!("{}", line.bright_blue());
}

/// Print an info line with label and value, with the label colored
pub fn print_info<T: Display>(label: &str, value: T) {
    println!("{}: {}", label.bright_cyan(), value);
}

pub fn print_tool(executable: &Path, version: ToolVersion) {
    println!(
        "{} {} ({})",
        "Found ffmpeg".green(),
        version.bold(),
        executable.display()
    );
}

/// Prints one line per module and the totals.
pub fn print_summary(report: &CourseReport, elapsed: Duration) {
    print_heading("Course Summary");

    let total: Duration = report.clips.iter().map(|clip| clip.duration).sum();
    print_info("Clips processed", report.clips.len());
    print_info("Total clip duration", format_duration(total));

    for module in &report.modules {
        let name = file_name_lossy(&module.module_dir);
        match &module.outcome {
            ModuleOutcome::Merged { output } => {
                println!("  {} {} -> {}", "[OK]".green(), name, output.display());
            }
            ModuleOutcome::MergedSourceRetained { output, error } => {
                println!("  {} {} -> {}", "[OK]".green(), name, output.display());
                println!("       {} source kept: {}", "[WARN]".yellow(), error);
            }
            ModuleOutcome::Failed { error } => {
                println!("  {} {}: {}", "[FAIL]".red().bold(), name, error);
            }
            ModuleOutcome::Skipped => {
                println!("  {} {} (no clips)", "[SKIP]".yellow(), name);
            }
        }
    }

    println!();
    let counts = format!(
        "{} merged, {} failed, {} skipped",
        report.merged_count(),
        report.failed_count(),
        report.skipped_count()
    );
    if report.has_failures() {
        println!("{}", counts.red().bold());
    } else {
        println!("{}", counts.green().bold());
    }
    print_info("Total execution time", format_duration(elapsed));
}

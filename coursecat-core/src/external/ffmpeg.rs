// ============================================================================
// coursecat-core/src/external/ffmpeg.rs
// ============================================================================
//
// FFMPEG ARGUMENTS: Command Layouts and Log Parsing
//
// Builds the argument vectors for the four ffmpeg invocations the pipeline
// needs (version query, subtitle mux, duration probe, concatenation) and
// parses the values the pipeline reads back out of ffmpeg's log.
//
// Arguments are always built as discrete OsString tokens, so paths containing
// spaces or quotes reach ffmpeg unchanged.

use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

/// First `Duration: <value>` token in an ffmpeg input summary, whatever the value.
static DURATION_TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Duration: ([^,\s]+)").expect("duration token regex is valid")
});

/// `H:MM:SS.fraction`, the only accepted shape of a duration value.
static DURATION_VALUE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+):(\d{2}):(\d{2})(?:\.(\d+))?$").expect("duration value regex is valid")
});

/// Options shared by every processing command.
const COMMON_ARGS: [&str; 3] = ["-hide_banner", "-nostdin", "-y"];

fn args_from<I, S>(items: I) -> Vec<OsString>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    items
        .into_iter()
        .map(|item| item.as_ref().to_os_string())
        .collect()
}

// ============================================================================
// ARGUMENT BUILDERS
// ============================================================================

/// `ffmpeg -version`, used to read the version banner.
pub fn version_args() -> Vec<OsString> {
    args_from(["-version"])
}

/// Re-muxes `clip` with the `subtitle` sidecar into `output`.
///
/// Video and audio are stream-copied; the subtitle stream is converted to
/// `subtitle_codec` so the container can carry it. The container format is
/// forced because `output` carries a temporary extension.
pub fn subtitle_mux_args(
    clip: &Path,
    subtitle: &Path,
    output: &Path,
    subtitle_codec: &str,
    container_format: &str,
) -> Vec<OsString> {
    let mut args = args_from(COMMON_ARGS);
    args.extend(args_from([OsStr::new("-i"), clip.as_os_str()]));
    args.extend(args_from([OsStr::new("-i"), subtitle.as_os_str()]));
    args.extend(args_from([
        "-c:a",
        "copy",
        "-c:v",
        "copy",
        "-c:s",
        subtitle_codec,
        "-f",
        container_format,
    ]));
    args.push(output.as_os_str().to_os_string());
    args
}

/// Reads `clip` end to end without writing anything, so the log reports its
/// duration.
pub fn duration_probe_args(clip: &Path) -> Vec<OsString> {
    let mut args = args_from(["-hide_banner", "-nostdin"]);
    args.extend(args_from([OsStr::new("-i"), clip.as_os_str()]));
    args.extend(args_from(["-c", "copy", "-f", "null", "-"]));
    args
}

/// Splices the clips listed in `concat_list` into `output`, attaching the
/// global tags and chapters from the `metadata` document.
pub fn concat_args(
    concat_list: &Path,
    metadata: &Path,
    output: &Path,
    container_format: &str,
) -> Vec<OsString> {
    let mut args = args_from(COMMON_ARGS);
    args.extend(args_from(["-f", "concat", "-safe", "0"]));
    args.extend(args_from([OsStr::new("-i"), concat_list.as_os_str()]));
    args.extend(args_from([OsStr::new("-i"), metadata.as_os_str()]));
    args.extend(args_from([
        "-map_metadata",
        "1",
        "-c:v",
        "copy",
        "-c:a",
        "copy",
        "-c:s",
        "copy",
        "-f",
        container_format,
    ]));
    args.push(output.as_os_str().to_os_string());
    args
}

// ============================================================================
// LOG PARSING
// ============================================================================

/// Extracts the first `Duration: H:MM:SS.fraction` value from an ffmpeg log.
///
/// The fraction is parsed as an exact decimal, so `00:00:10.03` yields exactly
/// 10030 ms. Returns `None` when no duration is present or when the first one
/// is not a timestamp (`N/A`); later `Duration:` lines are never consulted.
pub fn parse_duration(log: &str) -> Option<Duration> {
    let token = DURATION_TOKEN_REGEX.captures(log)?.get(1)?.as_str();
    let caps = DURATION_VALUE_REGEX.captures(token)?;

    let hours: u64 = caps.get(1)?.as_str().parse().ok()?;
    let minutes: u64 = caps.get(2)?.as_str().parse().ok()?;
    let seconds: u64 = caps.get(3)?.as_str().parse().ok()?;
    if minutes >= 60 || seconds >= 60 {
        return None;
    }

    let nanos = match caps.get(4) {
        Some(fraction) => fraction_to_nanos(fraction.as_str())?,
        None => 0,
    };

    Some(Duration::new(hours * 3600 + minutes * 60 + seconds, nanos))
}

/// Converts the digits after the decimal point into nanoseconds, ignoring
/// anything beyond nanosecond precision.
fn fraction_to_nanos(digits: &str) -> Option<u32> {
    let significant: String = digits.chars().take(9).collect();
    let padded = format!("{significant:0<9}");
    padded.parse().ok()
}

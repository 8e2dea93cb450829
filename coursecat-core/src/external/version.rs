//! ffmpeg version detection.
//!
//! Reads the `ffmpeg version X.Y.Z` banner printed by `ffmpeg -version` and
//! compares it against the configured minimum. Locating or installing ffmpeg
//! is left to the caller; this module only answers "is the tool we were given
//! new enough".

use std::fmt;

use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;

use super::MediaTool;
use super::ffmpeg::version_args;
use crate::error::{CoreError, CoreResult};

/// Banner line, first match wins. Git builds print an `n` prefix (`n6.1.1`).
static VERSION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^ffmpeg version n?(\d+)(?:\.(\d+))?(?:\.(\d+))?")
        .expect("version regex is valid")
});

/// A `major.minor.patch` tool version; missing components count as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToolVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ToolVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parses the version out of an ffmpeg `-version` banner.
    pub fn from_banner(log: &str) -> Option<Self> {
        let caps = VERSION_REGEX.captures(log)?;
        let component = |index: usize| -> Option<u32> {
            match caps.get(index) {
                Some(m) => m.as_str().parse().ok(),
                None => Some(0),
            }
        };
        Some(Self::new(component(1)?, component(2)?, component(3)?))
    }
}

impl fmt::Display for ToolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Runs `-version` through `tool` and checks the result against `minimum`.
///
/// # Errors
///
/// * `CoreError::DependencyNotFound` - the executable does not exist
/// * `CoreError::VersionParse` - the call failed or printed no banner
/// * `CoreError::UnsupportedToolVersion` - the version is below `minimum`
pub fn check_tool_version<T: MediaTool + ?Sized>(tool: &T, minimum: ToolVersion) -> CoreResult<ToolVersion> {
    info!("Searching for {} >= {}", tool.name(), minimum);

    let output = tool.run(&version_args())?;
    if !output.success {
        debug!("{} -version failed:\n{}", tool.name(), output.log);
        return Err(CoreError::VersionParse);
    }

    let version = ToolVersion::from_banner(&output.log).ok_or(CoreError::VersionParse)?;
    if version < minimum {
        return Err(CoreError::UnsupportedToolVersion {
            found: version.to_string(),
            required: minimum.to_string(),
        });
    }

    info!("{} {} found", tool.name(), version);
    Ok(version)
}

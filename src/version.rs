//! Package version constants and git revision derivation.
//!
//! Development builds carry a revision string extracted from
//! `git describe --always --dirty`; release builds ship the bare package
//! version. Revision extraction happens once, at startup, into an explicit
//! [`VersionInfo`] value that callers pass along — there is no ambient cache.
//!
//! Every extraction step is logged to `derived/version.log` so failed
//! detections can be diagnosed after the fact.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// Name used for packaging.
pub const PACKAGE_NAME: &str = "openmsx-debugger";

/// Version number.
pub const VERSION_NUMBER: &str = "0.10.0";

/// Empty, or with a leading dash, like "-rc1" or "-test1".
pub const VERSION_SUFFIX: &str = "";

/// True for a release build (no revision appended), false for development.
pub const RELEASE: bool = false;

/// The full package version, e.g. "0.10.0" or "0.11.0-rc1".
pub fn package_version() -> String {
    format!("{VERSION_NUMBER}{VERSION_SUFFIX}")
}

/// The dotted version number split into (major, minor, patch) for the Windows
/// resource script, which wants numeric components.
pub fn version_components() -> Result<(u32, u32, u32)> {
    let mut parts = VERSION_NUMBER.split('.');
    let mut component = || -> Result<u32> {
        parts
            .next()
            .context("version number has fewer than three components")?
            .parse::<u32>()
            .context("version number component is not numeric")
    };
    Ok((component()?, component()?, component()?))
}

/// Version metadata computed once at startup and passed down explicitly to
/// whatever needs it.
#[derive(Debug, Clone)]
pub struct VersionInfo {
    /// Revision string from `git describe`, when one could be extracted.
    pub revision: Option<String>,
}

impl VersionInfo {
    /// Extract revision info from the working copy rooted at the current
    /// directory.
    pub fn detect() -> Result<Self> {
        Self::detect_in(Path::new("."))
    }

    /// Extract revision info from the working copy rooted at `root`, logging
    /// each step to `<root>/derived/version.log`.
    pub fn detect_in(root: &Path) -> Result<Self> {
        if RELEASE {
            // Release builds never append a revision; skip the git probe.
            return Ok(Self { revision: None });
        }

        let derived = root.join("derived");
        fs::create_dir_all(&derived)
            .with_context(|| format!("failed to create {}", derived.display()))?;
        let log_path = derived.join("version.log");
        let mut log = fs::File::create(&log_path)
            .with_context(|| format!("failed to create {}", log_path.display()))?;

        writeln!(log, "Extracting version info...")?;
        writeln!(log, "Package version: {}", package_version())?;
        writeln!(log, "Extracting revision info...")?;
        let revision = extract_git_revision(root, &mut log)?;

        let info = Self { revision };
        writeln!(log, "Revision string: {}", info.revision_string())?;
        writeln!(log, "Revision number: {}", info.revision_number())?;
        Ok(info)
    }

    /// The revision string, or "unknown" when extraction found none.
    pub fn revision_string(&self) -> &str {
        self.revision.as_deref().unwrap_or("unknown")
    }

    /// The leading decimal component of the revision string (the
    /// commits-since-tag count from `git describe`), or 1 when absent.
    pub fn revision_number(&self) -> u32 {
        self.revision
            .as_deref()
            .and_then(leading_number)
            .unwrap_or(1)
    }

    /// "0.10.0" for releases, "0.10.0-<revision>" for development builds.
    pub fn detailed_version(&self) -> String {
        if RELEASE {
            package_version()
        } else {
            format!("{}-{}", package_version(), self.revision_string())
        }
    }

    /// Name used for packaged artifacts, e.g.
    /// "openmsx-debugger-0.10.0-123-g3f2c1ab".
    pub fn versioned_package_name(&self) -> String {
        if RELEASE {
            format!("{PACKAGE_NAME}-{}", package_version())
        } else {
            format!(
                "{PACKAGE_NAME}-{}-{}",
                package_version(),
                self.revision_string()
            )
        }
    }
}

/// Run `git describe --always --dirty` in `root` and parse the revision out
/// of its output. Failures are logged, never fatal: a missing revision just
/// means the build is labeled "unknown".
fn extract_git_revision(root: &Path, log: &mut dyn Write) -> Result<Option<String>> {
    const COMMAND: &str = "git describe --always --dirty";

    let output = Command::new("git")
        .arg("-C")
        .arg(root)
        .args(["describe", "--always", "--dirty"])
        .output();

    let text = match output {
        Ok(output) if output.status.success() => {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            writeln!(log, "\"{COMMAND}\" failed: {}", stderr.trim())?;
            return Ok(None);
        }
        Err(err) => {
            writeln!(log, "failed to execute \"{COMMAND}\": {err}")?;
            return Ok(None);
        }
    };

    match parse_describe_revision(&text) {
        Some(revision) => {
            writeln!(log, "Revision number found by \"{COMMAND}\": {revision}")?;
            Ok(Some(revision))
        }
        None => {
            writeln!(log, "Revision number not found in \"{COMMAND}\" output:")?;
            writeln!(log, "{text}")?;
            Ok(None)
        }
    }
}

/// Take the revision part of a `git describe` string: everything after the
/// first dash of "tag-count-hash". A bare hash (untagged repo) has no dash
/// and yields no revision.
pub fn parse_describe_revision(text: &str) -> Option<String> {
    let line = text.lines().next()?.trim();
    let (_tag, revision) = line.split_once('-')?;
    if revision.is_empty() {
        return None;
    }
    Some(revision.to_string())
}

/// Leading decimal digits of a revision string, e.g. "123-g3f2c1ab" -> 123.
fn leading_number(revision: &str) -> Option<u32> {
    let digits: String = revision.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_version_is_number_plus_suffix() {
        assert_eq!(package_version(), "0.10.0");
    }

    #[test]
    fn version_components_parse() {
        let (major, minor, patch) = version_components().unwrap();
        assert_eq!(
            format!("{major}.{minor}.{patch}"),
            VERSION_NUMBER,
            "components must round-trip to the version number"
        );
    }

    #[test]
    fn parse_describe_with_tag() {
        assert_eq!(
            parse_describe_revision("v0.9.0-123-g3f2c1ab"),
            Some("123-g3f2c1ab".to_string())
        );
    }

    #[test]
    fn parse_describe_bare_hash() {
        // No tag in history: describe prints just the abbreviated hash.
        assert_eq!(parse_describe_revision("3f2c1ab"), None);
    }

    #[test]
    fn parse_describe_empty() {
        assert_eq!(parse_describe_revision(""), None);
        assert_eq!(parse_describe_revision("v1-"), None);
    }

    #[test]
    fn revision_string_defaults_to_unknown() {
        let info = VersionInfo { revision: None };
        assert_eq!(info.revision_string(), "unknown");
        assert_eq!(info.revision_number(), 1);
    }

    #[test]
    fn revision_number_takes_leading_digits() {
        let info = VersionInfo {
            revision: Some("123-g3f2c1ab".to_string()),
        };
        assert_eq!(info.revision_number(), 123);

        let info = VersionInfo {
            revision: Some("g3f2c1ab".to_string()),
        };
        assert_eq!(info.revision_number(), 1);
    }

    #[test]
    fn detailed_version_appends_revision() {
        let info = VersionInfo {
            revision: Some("42-gabc1234".to_string()),
        };
        assert_eq!(
            info.detailed_version(),
            format!("{}-42-gabc1234", package_version())
        );
    }

    #[test]
    fn versioned_package_name_includes_name_version_revision() {
        let info = VersionInfo { revision: None };
        assert_eq!(
            info.versioned_package_name(),
            format!("{PACKAGE_NAME}-{}-unknown", package_version())
        );
    }
}

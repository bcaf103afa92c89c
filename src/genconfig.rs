//! MSVC config header generation.
//!
//! Generates the two headers the VC++ project files expect:
//!
//! - `resource-info.h`: `#define` lines feeding the Windows `.rc` resource
//!   script (numeric file version, version string, copyright).
//! - `version.ii`: the C++ include defining the `Version` constants.
//!
//! Both files go through [`rewrite_if_changed`], so an unchanged header keeps
//! its timestamp and does not trigger a rebuild of everything that includes
//! it.

use anyhow::{bail, Context, Result};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::output;
use crate::version::{self, VersionInfo};

/// MSVC build platform, as named by the solution configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsvcPlatform {
    Win32,
    X64,
}

impl fmt::Display for MsvcPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Win32 => "Win32",
            Self::X64 => "x64",
        })
    }
}

impl FromStr for MsvcPlatform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "win32" => Ok(Self::Win32),
            "x64" => Ok(Self::X64),
            _ => bail!("unknown platform '{s}' (expected Win32 or x64)"),
        }
    }
}

/// MSVC build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Configuration {
    Debug,
    Developer,
    Release,
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Debug => "Debug",
            Self::Developer => "Developer",
            Self::Release => "Release",
        })
    }
}

impl FromStr for Configuration {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "developer" => Ok(Self::Developer),
            "release" => Ok(Self::Release),
            _ => bail!("unknown configuration '{s}' (expected Debug, Developer or Release)"),
        }
    }
}

/// Write `content` to `path` only when it differs from what is on disk.
/// Returns true when the file was (re)written.
pub fn rewrite_if_changed(path: &Path, content: &str) -> Result<bool> {
    if let Ok(existing) = fs::read_to_string(path) {
        if existing == content {
            return Ok(false);
        }
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}

/// The `resource-info.h` content feeding the `.rc` resource script.
pub fn resource_info_header(info: &VersionInfo) -> Result<String> {
    let (major, minor, patch) = version::version_components()?;
    let revision = info.revision_number();
    let version = info.detailed_version();
    Ok(format!(
        "// Automatically generated by the build process. Do not edit.\n\
         #define OPENMSX_DEBUGGER_VERSION_INT {major},{minor},{patch},{revision}\n\
         #define OPENMSX_DEBUGGER_VERSION \"{version}\"\n\
         #define OPENMSX_DEBUGGER_COPYRIGHT \"Copyright (C) 2003-2026 The openMSX Team\"\n"
    ))
}

/// The `version.ii` content included by the C++ `Version` definitions.
pub fn version_include(info: &VersionInfo) -> String {
    format!(
        "// Automatically generated by the build process. Do not edit.\n\
         const bool Version::RELEASE = {};\n\
         const char* const Version::VERSION = \"{}\";\n\
         const char* const Version::REVISION = \"{}\";\n",
        version::RELEASE,
        version::package_version(),
        info.revision_string()
    )
}

/// Generate both config headers into `output_path`, creating it if needed.
pub fn gen_config(
    platform: MsvcPlatform,
    configuration: Configuration,
    output_path: &Path,
    info: &VersionInfo,
) -> Result<()> {
    output::detail(&format!(
        "Generating {platform} {configuration} config headers"
    ));
    fs::create_dir_all(output_path)
        .with_context(|| format!("failed to create {}", output_path.display()))?;

    let targets = [
        (output_path.join("resource-info.h"), resource_info_header(info)?),
        (output_path.join("version.ii"), version_include(info)),
    ];

    for (path, content) in &targets {
        if rewrite_if_changed(path, content)? {
            output::detail(&format!("Updated {}", path.display()));
        } else {
            output::detail(&format!("Up to date: {}", path.display()));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

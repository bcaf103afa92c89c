//! Command-line entry point for the openMSX debugger build-support tool.
//!
//! One binary wraps the auxiliary build steps: host platform detection for
//! the make-based build, MSVC config header generation, Windows zip
//! packaging, and version-string derivation from git metadata.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;

use openmsx_buildtool::genconfig::{self, Configuration, MsvcPlatform};
use openmsx_buildtool::package::{self, PackageInfo};
use openmsx_buildtool::version::VersionInfo;
use openmsx_buildtool::{host, output, platform};

/// Build-support commands for the openMSX debugger.
#[derive(Parser, Debug)]
#[command(
    name = "openmsx-buildtool",
    version,
    about,
    after_help = "Examples:\n  openmsx-buildtool detect-sys\n  openmsx-buildtool gen-config x64 Release derived/win32/x64-VC-Release/config\n  openmsx-buildtool package-zip x64 Release 0.10.0\n  openmsx-buildtool version"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Detect the host CPU and OS; print make variables on stdout.
    DetectSys,

    /// Generate the MSVC config headers (resource-info.h, version.ii).
    GenConfig {
        /// MSVC build platform: Win32 or x64.
        platform: MsvcPlatform,
        /// Build configuration: Debug, Developer or Release.
        configuration: Configuration,
        /// Directory in which to generate the config files.
        output_path: PathBuf,
    },

    /// Package the installed Windows build into zip archives.
    PackageZip {
        /// MSVC build platform: Win32 or x64.
        platform: MsvcPlatform,
        /// Build configuration: Debug, Developer or Release.
        configuration: Configuration,
        /// Package version, e.g. "0.10.0".
        version: String,
    },

    /// Print the detailed version string (package version plus revision).
    Version,
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

/// Print `OPENMSX_TARGET_CPU` / `OPENMSX_TARGET_OS` make variables on stdout.
///
/// Diagnostics go to stderr so a Makefile can consume stdout directly.
fn run_detect_sys() -> Result<()> {
    output::detail(&format!(
        "Using native system detection ({} build)...",
        env!("TARGET")
    ));

    let raw_cpu = host::raw_cpu();
    let raw_os = host::raw_os();
    let cpu = platform::detect_cpu(&raw_cpu, &raw_os)?;
    let os = platform::detect_os(&raw_os)?;

    output::detail(&format!("Detected system: {cpu}-{os}"));
    println!("OPENMSX_TARGET_CPU={cpu}");
    println!("OPENMSX_TARGET_OS={os}");
    Ok(())
}

fn run_gen_config(
    platform: MsvcPlatform,
    configuration: Configuration,
    output_path: &Path,
) -> Result<()> {
    let info = VersionInfo::detect()?;
    genconfig::gen_config(platform, configuration, output_path, &info)
}

fn run_package_zip(
    platform: MsvcPlatform,
    configuration: Configuration,
    version: &str,
) -> Result<()> {
    let info = PackageInfo::new(platform, configuration, version);
    package::package_zip(&info)
}

fn run_version() -> Result<()> {
    let info = VersionInfo::detect()?;
    println!("{}", info.detailed_version());
    Ok(())
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::DetectSys => run_detect_sys(),
        Command::GenConfig {
            platform,
            configuration,
            output_path,
        } => run_gen_config(platform, configuration, &output_path),
        Command::PackageZip {
            platform,
            configuration,
            version,
        } => run_package_zip(platform, configuration, &version),
        Command::Version => run_version(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

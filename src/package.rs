//! Windows zip packaging.
//!
//! Packs the installed Windows build into two archives: one with the
//! debugger executable, one with its PDB debug symbols. Archive layout and
//! naming follow the conventions the release upload scripts expect.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::genconfig::{Configuration, MsvcPlatform};
use crate::output;
use crate::version;

/// Derived paths and names for one Windows package build.
#[derive(Debug, Clone)]
pub struct PackageInfo {
    /// Where the build installed its artifacts (exe, pdb).
    pub install_path: PathBuf,
    /// Where the generated archives go.
    pub package_path: PathBuf,
    /// Archive base name, e.g. "openmsx-debugger-0.10.0-windows-x64".
    pub installer_base_name: String,
}

impl PackageInfo {
    /// Standard layout under the `derived/` build output directory.
    pub fn new(platform: MsvcPlatform, configuration: Configuration, version: &str) -> Self {
        Self::with_root(Path::new("derived"), platform, configuration, version)
    }

    /// Anchor all derived paths under `root` instead of `derived/`.
    pub fn with_root(
        root: &Path,
        platform: MsvcPlatform,
        configuration: Configuration,
        version: &str,
    ) -> Self {
        let build_dir = root
            .join("win32")
            .join(format!("{platform}-VC-{configuration}"));
        Self {
            install_path: build_dir.join("install"),
            package_path: root.join("win32").join("package"),
            installer_base_name: format!(
                "{}-{version}-windows-{platform}",
                version::PACKAGE_NAME
            ),
        }
    }
}

/// Package the installed binary and its PDB into two zip archives.
///
/// Existing archives of the same name are replaced.
pub fn package_zip(info: &PackageInfo) -> Result<()> {
    fs::create_dir_all(&info.package_path)
        .with_context(|| format!("failed to create {}", info.package_path.display()))?;

    let exe = info
        .install_path
        .join(format!("{}.exe", version::PACKAGE_NAME));
    let bin_zip = info
        .package_path
        .join(format!("{}.zip", info.installer_base_name));
    write_archive(&bin_zip, &exe)?;

    let pdb = info
        .install_path
        .join(format!("{}.pdb", version::PACKAGE_NAME));
    let pdb_zip = info
        .package_path
        .join(format!("{}-pdb.zip", info.installer_base_name));
    write_archive(&pdb_zip, &pdb)?;

    output::success("Packaged", &info.installer_base_name);
    Ok(())
}

/// Create a fresh archive at `zip_path` containing the single file `file`
/// at the archive root.
fn write_archive(zip_path: &Path, file: &Path) -> Result<()> {
    if zip_path.exists() {
        fs::remove_file(zip_path)
            .with_context(|| format!("failed to remove stale {}", zip_path.display()))?;
    }

    output::action("Generating", &zip_path.display().to_string());

    let out = File::create(zip_path)
        .with_context(|| format!("failed to create {}", zip_path.display()))?;
    let mut zip = ZipWriter::new(out);

    let entry_name = file
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("artifact has no usable file name: {}", file.display()))?
        .to_string();
    add_file(&mut zip, file, &entry_name)?;

    zip.finish().context("failed to finalize zip archive")?;
    Ok(())
}

/// Add a single file to the archive as `entry_name` (deflate compression).
pub fn add_file(zip: &mut ZipWriter<File>, path: &Path, entry_name: &str) -> Result<()> {
    output::detail(&format!("Adding {}", path.display()));

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    zip.start_file(entry_name, options)
        .with_context(|| format!("failed to start zip entry '{entry_name}'"))?;

    let mut input =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    io::copy(&mut input, zip)
        .with_context(|| format!("failed to write zip entry '{entry_name}'"))?;
    Ok(())
}

/// Recursively add a directory tree to the archive under `zip_prefix`,
/// skipping VCS metadata directories.
pub fn add_directory(zip: &mut ZipWriter<File>, root: &Path, zip_prefix: &str) -> Result<()> {
    let entries =
        fs::read_dir(root).with_context(|| format!("failed to read {}", root.display()))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read entry in {}", root.display()))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        let entry_name = if zip_prefix.is_empty() {
            name.clone()
        } else {
            format!("{zip_prefix}/{name}")
        };

        if path.is_dir() {
            if name == ".svn" || name == ".git" {
                continue;
            }
            add_directory(zip, &path, &entry_name)?;
        } else {
            add_file(zip, &path, &entry_name)?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

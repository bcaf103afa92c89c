//! Revision extraction against real git repositories.
//!
//! Each test builds a throwaway repo with the exact history shape it needs
//! and checks what `VersionInfo` derives from `git describe` output.

use openmsx_buildtool::version::{package_version, VersionInfo, PACKAGE_NAME};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Run a git command inside the given directory, panicking on failure.
fn run_git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(["-C", dir.to_str().unwrap()])
        .args(args)
        .output()
        .expect("failed to run git");
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("git {args:?} failed: {stderr}");
    }
}

/// Create a temporary git repo with one commit.
fn init_temp_repo() -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path();

    run_git(path, &["init"]);
    run_git(path, &["config", "user.email", "test@test.com"]);
    run_git(path, &["config", "user.name", "Test User"]);
    std::fs::write(path.join("README.md"), "hello").unwrap();
    run_git(path, &["add", "README.md"]);
    run_git(path, &["commit", "-m", "initial commit"]);

    dir
}

#[test]
fn untagged_repo_has_no_revision() {
    let dir = init_temp_repo();
    let info = VersionInfo::detect_in(dir.path()).unwrap();

    // `git describe --always` prints a bare hash here; no dash, no revision.
    assert_eq!(info.revision, None);
    assert_eq!(info.revision_string(), "unknown");
    assert_eq!(info.revision_number(), 1);
}

#[test]
fn tagged_repo_yields_commit_count_and_hash() {
    let dir = init_temp_repo();
    let path = dir.path();
    run_git(path, &["tag", "-a", "v0.9.0", "-m", "release 0.9.0"]);
    std::fs::write(path.join("next.txt"), "work").unwrap();
    run_git(path, &["add", "next.txt"]);
    run_git(path, &["commit", "-m", "one commit past the tag"]);

    let info = VersionInfo::detect_in(path).unwrap();
    let revision = info.revision.clone().expect("describe output has a dash");

    // "v0.9.0-1-g<hash>" minus the tag part.
    assert!(
        revision.starts_with("1-g"),
        "unexpected revision: {revision}"
    );
    assert_eq!(info.revision_number(), 1);
    assert_eq!(
        info.detailed_version(),
        format!("{}-{revision}", package_version())
    );
    assert_eq!(
        info.versioned_package_name(),
        format!("{PACKAGE_NAME}-{}-{revision}", package_version())
    );
}

#[test]
fn exactly_tagged_commit_has_no_revision() {
    let dir = init_temp_repo();
    let path = dir.path();
    run_git(path, &["tag", "-a", "v0.10.0", "-m", "release 0.10.0"]);

    // Describe prints just the tag name; "v0.10.0" has no dash to split on.
    let info = VersionInfo::detect_in(path).unwrap();
    assert_eq!(info.revision, None);
}

#[test]
fn dirty_untagged_worktree_reports_dirty() {
    let dir = init_temp_repo();
    let path = dir.path();
    std::fs::write(path.join("README.md"), "modified").unwrap();

    // Describe prints "<hash>-dirty"; everything past the first dash is the
    // revision, so a dirty untagged tree is labeled just "dirty".
    let info = VersionInfo::detect_in(path).unwrap();
    assert_eq!(info.revision.as_deref(), Some("dirty"));
}

#[test]
fn outside_a_repo_extraction_degrades_to_unknown() {
    let dir = TempDir::new().unwrap();
    let info = VersionInfo::detect_in(dir.path()).unwrap();
    assert_eq!(info.revision, None);
    assert_eq!(info.detailed_version(), format!("{}-unknown", package_version()));
}

#[test]
fn extraction_log_records_each_step() {
    let dir = init_temp_repo();
    VersionInfo::detect_in(dir.path()).unwrap();

    let log = std::fs::read_to_string(dir.path().join("derived/version.log")).unwrap();
    assert!(log.contains("Extracting version info..."));
    assert!(log.contains(&format!("Package version: {}", package_version())));
    assert!(log.contains("Revision string:"));
    assert!(log.contains("Revision number:"));
}

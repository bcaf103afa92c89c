//! Raw host platform queries.
//!
//! Reports the machine and OS identifier strings exactly as the host does,
//! before any normalization by [`crate::platform`]. Query failures collapse
//! to an empty string so the normalizer's empty-input handling (fallback or
//! `UnknownPlatform`) applies uniformly.

#[cfg(unix)]
fn uname(flag: &str) -> String {
    use std::process::Command;

    Command::new("uname")
        .arg(flag)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// The raw CPU identifier, e.g. `x86_64` or `armv7l` (from `uname -m`).
#[cfg(unix)]
pub fn raw_cpu() -> String {
    uname("-m")
}

/// The raw OS name, e.g. `Linux` or `Darwin` (from `uname -s`).
#[cfg(unix)]
pub fn raw_os() -> String {
    uname("-s")
}

/// The raw CPU identifier as Windows reports it, e.g. `AMD64`.
#[cfg(windows)]
pub fn raw_cpu() -> String {
    std::env::var("PROCESSOR_ARCHITECTURE").unwrap_or_default()
}

#[cfg(windows)]
pub fn raw_os() -> String {
    "windows".to_string()
}

#[cfg(not(any(unix, windows)))]
pub fn raw_cpu() -> String {
    std::env::consts::ARCH.to_string()
}

#[cfg(not(any(unix, windows)))]
pub fn raw_os() -> String {
    std::env::consts::OS.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn uname_reports_an_os_name() {
        let os = raw_os();
        assert!(!os.is_empty());
        // Trimmed: no trailing newline from the subprocess.
        assert_eq!(os, os.trim());
    }

    #[test]
    fn raw_strings_normalize_without_panicking() {
        let raw_os = raw_os();
        let raw_cpu = raw_cpu();
        // Whatever this host reports must go through the normalizer cleanly
        // (pass-through covers identifiers we don't recognize).
        if !raw_cpu.is_empty() {
            crate::platform::detect_cpu(&raw_cpu, &raw_os).unwrap();
        }
        if !raw_os.is_empty() {
            crate::platform::detect_os(&raw_os).unwrap();
        }
    }
}

//! Host platform normalization.
//!
//! Maps raw, OS-reported CPU and OS identifier strings onto the small fixed
//! vocabulary of canonical tokens the build system understands (`x86_64`,
//! `mingw32`, ...). The build system uses these tokens to select compiler
//! flags and platform-specific source subsets.
//!
//! Both functions are pure: all host queries live in [`crate::host`].
//!
//! Policy notes:
//! - Matching is case-insensitive; first matching rule wins.
//! - Unrecognized *non-empty* identifiers pass through verbatim, so new
//!   platforms work without a tool update (downstream make logic relies on
//!   this).
//! - An *empty* identifier is an error, unless an OS-specific fallback
//!   applies. This asymmetry is deliberate.

use thiserror::Error;

/// The only failure mode of platform detection: the host reported an empty
/// identifier and no fallback could resolve it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unable to detect host {0}: the platform reported an empty identifier")]
pub struct UnknownPlatform(pub &'static str);

/// True when the raw OS name is a Windows flavor (native or MinGW).
fn is_windows_variant(raw_os: &str) -> bool {
    let os = raw_os.to_lowercase();
    os == "windows" || os.starts_with("mingw")
}

/// Normalize a raw CPU identifier to the canonical CPU family token.
///
/// Detects the CPU family, not the CPU model: `armv7l` is just `arm` here.
/// `raw_os` is consulted only for the empty-CPU fallback (Windows hosts that
/// do not report an architecture are assumed to be x86).
pub fn detect_cpu(raw_cpu: &str, raw_os: &str) -> Result<String, UnknownPlatform> {
    let mut cpu = raw_cpu.to_lowercase();
    // Hurd reports "cputype-cpusubtype" instead of just "cputype".
    if let Some((family, _subtype)) = cpu.split_once('-') {
        cpu = family.to_string();
    }

    let token = if matches!(cpu.as_str(), "x86_64" | "amd64") {
        "x86_64"
    } else if matches!(cpu.as_str(), "x86" | "i386" | "i486" | "i586" | "i686") {
        "x86"
    } else if cpu.starts_with("ppc") || cpu.ends_with("ppc") || cpu.starts_with("power") {
        if cpu.ends_with("64") {
            "ppc64"
        } else {
            "ppc"
        }
    } else if cpu.starts_with("arm") {
        "arm"
    } else if cpu.starts_with("mips") || cpu == "sgi" {
        if cpu.ends_with("el") {
            "mipsel"
        } else {
            "mips"
        }
    } else if cpu.starts_with("alpha") {
        "alpha"
    } else if cpu.starts_with("hppa") || cpu.starts_with("parisc") {
        "hppa"
    } else if cpu.starts_with("s390") {
        "s390"
    } else if cpu.starts_with("sparc") || cpu.starts_with("sun4u") {
        "sparc"
    } else if cpu.starts_with("sh") {
        if cpu.ends_with("eb") {
            "sheb"
        } else {
            "sh"
        }
    } else if cpu.is_empty() {
        if is_windows_variant(raw_os) {
            // The host couldn't say. On Windows, x86 is a relatively safe bet.
            "x86"
        } else {
            return Err(UnknownPlatform("CPU"));
        }
    } else {
        // Assume an unrecognized name is already canonical.
        return Ok(cpu);
    };

    Ok(token.to_string())
}

/// Normalize a raw OS name to the canonical OS family token.
pub fn detect_os(raw_os: &str) -> Result<String, UnknownPlatform> {
    let os = raw_os.to_lowercase();

    let token = match os.as_str() {
        "linux" | "darwin" | "freebsd" | "netbsd" | "openbsd" | "gnu" => return Ok(os),
        // GNU userland on a non-Hurd kernel, for example Debian GNU/kFreeBSD.
        // The kernel is not relevant to the build, so treat it as generic GNU.
        _ if os.starts_with("gnu/") => "gnu",
        _ if os.starts_with("mingw") => "mingw32",
        "windows" => "mingw32",
        "sunos" => "solaris",
        "" => return Err(UnknownPlatform("OS")),
        // Assume an unrecognized name is already canonical.
        _ => return Ok(os),
    };

    Ok(token.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

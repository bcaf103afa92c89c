//! Styled diagnostic output on stderr.
//!
//! All build progress goes to stderr so stdout stays clean for the
//! machine-readable make variables emitted by `detect-sys`. Styling is
//! applied only when stderr is a terminal, so captured build logs stay free
//! of escape codes.

use console::{style, Color, Term};
use std::io::{self, Write};

fn stderr_is_tty() -> bool {
    Term::stderr().is_term()
}

fn write_labeled(
    w: &mut dyn Write,
    label: &str,
    color: Color,
    msg: &str,
    is_tty: bool,
) -> io::Result<()> {
    let label = if is_tty {
        style(label).bold().fg(color).to_string()
    } else {
        label.to_string()
    };
    if msg.is_empty() {
        writeln!(w, "{label}")
    } else {
        writeln!(w, "{label} {msg}")
    }
}

/// A cyan progress line, e.g. `Generating derived/win32/package/foo.zip`.
pub fn action(label: &str, msg: &str) {
    let _ = write_labeled(&mut io::stderr(), label, Color::Cyan, msg, stderr_is_tty());
}

/// A green completion line.
pub fn success(label: &str, msg: &str) {
    let _ = write_labeled(&mut io::stderr(), label, Color::Green, msg, stderr_is_tty());
}

/// A dimmed, two-space-indented detail line.
pub fn detail(msg: &str) {
    let line = if stderr_is_tty() {
        style(format!("  {msg}")).dim().to_string()
    } else {
        format!("  {msg}")
    };
    let _ = writeln!(io::stderr(), "{line}");
}

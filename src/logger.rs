//! Logging utilities with colored module prefixes.
//!
//! Provides the `log!` macro for formatted terminal output:
//!
//! ```ignore
//! log!("metadata"; "promoted {} keys", count);
//! log!("warn"; "{}: header is not valid YAML", path);
//! ```

use colored::{ColoredString, Colorize};
use crossterm::terminal::size;
use std::{
    io::{Write, stdout},
    sync::OnceLock,
};

/// Cached terminal width (fetched once on first use)
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Fallback width when the terminal size cannot be detected.
const FALLBACK_WIDTH: u16 = 120;

/// Length of brackets around module name plus the trailing space.
const PREFIX_DECORATION: usize = 3;

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a message with a colored module prefix.
///
/// Single-line messages are truncated to the terminal width; multiline
/// messages (error details) are printed in full.
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let width = terminal_width();

    let mut stdout = stdout().lock();

    if message.contains('\n') {
        writeln!(stdout, "{prefix} {message}").ok();
    } else {
        let max_msg_len = width.saturating_sub(module.len() + PREFIX_DECORATION);
        let message = truncate_str(message, max_msg_len);
        writeln!(stdout, "{prefix} {message}").ok();
    }

    stdout.flush().ok();
}

/// Get terminal width, cached after first call.
fn terminal_width() -> usize {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(FALLBACK_WIDTH)) as usize
}

/// Apply color to a module prefix based on module type.
#[inline]
fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "check" => prefix.bright_blue().bold(),
        "warn" => prefix.bright_magenta().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Truncate a string to fit within `max_len` bytes.
///
/// Ensures the result is valid UTF-8 by finding the nearest character boundary.
#[inline]
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

//! External command execution utilities.
//!
//! Wraps `std::process::Command` with output filtering and error reporting
//! for the renderer invocations this tool makes.

use crate::log;
use anyhow::{Context, Result};
use std::{
    ffi::OsString,
    path::Path,
    process::{Command, Output},
};

// ============================================================================
// Macro
// ============================================================================

/// Run an external command with arguments.
///
/// Supports an optional `filter` argument for stderr noise suppression.
///
/// # Examples
/// ```ignore
/// // Plain invocation
/// exec!(&config.notebook.command; "--to", "html")?;
///
/// // With custom filter
/// const MY_FILTER: FilterRule = FilterRule::new(&["[NbConvertApp]"]);
/// exec!(filter=&MY_FILTER; &config.notebook.command; "--to", "html")?;
/// ```
#[macro_export]
macro_rules! exec {
    (filter=$filter:expr; $cmd:expr; $($arg:expr),* $(,)?) => {
        $crate::utils::exec::exec(
            &$crate::utils::exec::to_cmd_vec($cmd),
            &[$($crate::utils::exec::to_os($arg)),*],
            $filter,
        )
    };
    ($cmd:expr; $($arg:expr),* $(,)?) => {
        $crate::exec!(filter=&$crate::utils::exec::EMPTY_FILTER; $cmd; $($arg),*)
    };
}

// ============================================================================
// Argument Conversion
// ============================================================================

/// Convert to `OsString`.
#[inline]
pub fn to_os<S: Into<OsString>>(s: S) -> OsString {
    s.into()
}

/// Trait for converting a command specifier to an argv vector.
pub trait ToCmd {
    fn to_cmd(self) -> Vec<OsString>;
}

impl<const N: usize> ToCmd for [&str; N] {
    #[inline]
    fn to_cmd(self) -> Vec<OsString> {
        self.into_iter().map(OsString::from).collect()
    }
}

impl ToCmd for &[String] {
    #[inline]
    fn to_cmd(self) -> Vec<OsString> {
        self.iter().map(OsString::from).collect()
    }
}

impl ToCmd for &Vec<String> {
    #[inline]
    fn to_cmd(self) -> Vec<OsString> {
        self.iter().map(OsString::from).collect()
    }
}

/// Convert command to `Vec<OsString>`.
#[inline]
pub fn to_cmd_vec<C: ToCmd>(cmd: C) -> Vec<OsString> {
    cmd.to_cmd()
}

// ============================================================================
// Command Execution
// ============================================================================

/// Execute a command and capture its output.
///
/// Empty arguments are dropped so optional config values can be passed
/// directly.
///
/// # Errors
/// Returns error if the command fails to execute or exits non-zero.
pub fn exec(cmd: &[OsString], args: &[OsString], filter: &'static FilterRule) -> Result<Output> {
    let (name, mut command) = prepare(cmd, args)?;

    let output = command
        .output()
        .with_context(|| format!("Failed to execute `{name}`"))?;

    if !output.status.success() {
        anyhow::bail!(format_error(&name, &output, filter));
    }

    // On success, only log stderr (warnings) to reduce noise
    let stderr = String::from_utf8_lossy(&output.stderr);
    filter.log(&name, stderr.trim());

    Ok(output)
}

/// Prepare a `Command` from components, dropping empty arguments.
fn prepare(cmd: &[OsString], args: &[OsString]) -> Result<(String, Command)> {
    let name = cmd
        .first()
        .and_then(|s| s.to_str())
        .context("Empty command")?
        .to_owned();

    let mut command = Command::new(&cmd[0]);
    command
        .args(&cmd[1..])
        .args(args.iter().filter(|a| !a.is_empty()));

    Ok((name, command))
}

/// Check that a command's executable exists on `PATH`.
pub fn lookup(cmd: &[String]) -> Result<()> {
    let name = cmd.first().context("Empty command")?;
    which::which(name).with_context(|| format!("`{name}` not found on PATH"))?;
    Ok(())
}

/// Whether a file exists and is readable (renderer output check).
pub fn output_exists(path: &Path) -> bool {
    path.is_file()
}

// ============================================================================
// Output Filtering
// ============================================================================

/// Filter rule for skipping known-noise output lines by prefix.
pub struct FilterRule {
    /// Prefixes to match at the start of output lines.
    pub skip_prefixes: &'static [&'static str],
}

impl FilterRule {
    /// Create a new filter rule with the given prefixes.
    pub const fn new(skip_prefixes: &'static [&'static str]) -> Self {
        Self { skip_prefixes }
    }

    /// Check if a line should be skipped entirely.
    fn should_skip(&self, line: &str) -> bool {
        line.is_empty() || self.skip_prefixes.iter().any(|p| line.starts_with(p))
    }

    /// Log output lines that survive the filter.
    fn log(&self, name: &str, output: &str) {
        let valid_lines: Vec<_> = output
            .lines()
            .map(str::trim)
            .filter(|line| !self.should_skip(line))
            .collect();

        if !valid_lines.is_empty() {
            log!(name; "{}", valid_lines.join("\n"));
        }
    }
}

/// Empty filter (no skipping).
pub const EMPTY_FILTER: FilterRule = FilterRule::new(&[]);

/// Silent filter: skip all output.
pub const SILENT_FILTER: FilterRule = FilterRule::new(&[""]);

/// Format a command failure message with filtering.
fn format_error(name: &str, output: &Output, filter: &'static FilterRule) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);

    let error_msg = filter
        .skip_prefixes
        .iter()
        .fold(stderr.trim(), |s, p| s.trim_start_matches(p).trim_start());

    let mut msg = format!("Command `{name}` failed with {}\n", output.status);
    if !error_msg.is_empty() {
        msg.push_str(error_msg);
    }

    let stdout_trimmed = stdout.trim();
    if !stdout_trimmed.is_empty() {
        msg.push_str("\nStdout:\n");
        msg.push_str(stdout_trimmed);
    }
    msg
}

// ============================================================================
// Tests
// ============================================================================

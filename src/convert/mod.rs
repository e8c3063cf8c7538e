//! Notebook-to-HTML conversion via the external renderer.
//!
//! `NotebookConverter` is the adapter between this tool and the configured
//! renderer engine. It matches file extensions, verifies the renderer binary
//! once per process (memoized), and performs full document conversion
//! through a scoped temporary directory.
//!
//! # Conversion Flow
//!
//! ```text
//! convert(content)
//!     │
//!     ├── parse Notebook, strip the header cell
//!     ├── write <tmp>/input.<ext>
//!     ├── <renderer> --to html --template basic --output-dir <tmp> <tmp>/input.<ext>
//!     └── read <tmp>/input.html      (tmp released on every exit path)
//! ```

pub mod error;

pub use error::ConvertError;

use crate::{
    config::{NotebookEngine, SiteConfig},
    notebook::Notebook,
    utils::exec::{self, FilterRule, SILENT_FILTER, to_cmd_vec},
};
use anyhow::Result;
use std::{ffi::OsString, fs, sync::OnceLock};
use tempfile::TempDir;

/// Skip nbconvert's progress chatter on stderr.
const NBCONVERT_FILTER: FilterRule = FilterRule::new(&["[NbConvertApp]"]);

/// Remediation hint shown when the renderer binary is unreachable.
const NBCONVERT_HINT: &str =
    "Check virtual environments are active or run:\n  $ pip install jupyter";

/// Adapter around the external notebook renderer.
///
/// Constructed once at startup from the immutable site configuration. The
/// availability check result is memoized internally, so every collaborator
/// can call [`ensure_ready`](Self::ensure_ready) freely.
pub struct NotebookConverter {
    config: &'static SiteConfig,
    ready: OnceLock<Result<(), String>>,
}

impl NotebookConverter {
    pub const fn new(config: &'static SiteConfig) -> Self {
        Self {
            config,
            ready: OnceLock::new(),
        }
    }

    /// Whether an extension names a notebook document.
    ///
    /// Case-insensitive; a leading dot is ignored. Reflects the configured
    /// extension set exactly.
    pub fn matches(&self, ext: &str) -> bool {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        self.config.notebook.extensions().contains(&ext)
    }

    /// Output extension for converted documents.
    pub const fn output_ext(&self) -> &'static str {
        ".html"
    }

    /// Verify the renderer is reachable, once per process lifetime.
    ///
    /// The first call probes the binary; later calls return the cached
    /// result without re-probing.
    pub fn ensure_ready(&self) -> Result<(), ConvertError> {
        let engine = self.config.notebook.engine;
        let command = &self.config.notebook.command;
        self.ensure_ready_with(|| probe(engine, command))
    }

    fn ensure_ready_with(
        &self,
        check: impl FnOnce() -> Result<(), String>,
    ) -> Result<(), ConvertError> {
        self.ready
            .get_or_init(check)
            .clone()
            .map_err(|name| ConvertError::MissingDependency {
                name,
                hint: NBCONVERT_HINT.into(),
            })
    }

    /// Convert raw notebook content to an HTML string.
    ///
    /// Empty content is returned unchanged without touching the renderer.
    /// The reserved header cell is removed before rendering. Renderer
    /// failure (non-zero exit, missing output file) is fatal for this
    /// conversion and not retried.
    pub fn convert(&self, content: &str) -> Result<String> {
        if content.is_empty() {
            return Ok(String::new());
        }
        self.ensure_ready()?;

        match self.config.notebook.engine {
            NotebookEngine::Nbconvert => self.convert_nbconvert(content),
        }
    }

    fn convert_nbconvert(&self, content: &str) -> Result<String> {
        self.convert_nbconvert_in(TempDir::new()?, content)
    }

    // Owns the work dir so it is released on every exit path, renderer
    // failure and panics included.
    fn convert_nbconvert_in(&self, dir: TempDir, content: &str) -> Result<String> {
        let nb = &self.config.notebook;

        let mut notebook = Notebook::from_str(content)?;
        notebook.strip_header();
        let body = notebook.to_json()?;
        let input = dir.path().join(format!("input.{}", nb.primary_extension()));
        fs::write(&input, body)?;

        let mut args: Vec<OsString> = vec![
            "--to".into(),
            "html".into(),
            "--template".into(),
            nb.template.as_str().into(),
            "--output-dir".into(),
            dir.path().into(),
        ];
        args.extend(nb.attributes.iter().map(OsString::from));
        if let Some(safe) = &nb.safe {
            args.push(safe.into());
        }
        args.push(input.as_path().into());

        exec::exec(&to_cmd_vec(&nb.command), &args, &NBCONVERT_FILTER)
            .map_err(|err| ConvertError::Render(format!("{err:#}")))?;

        let rendered = dir.path().join("input.html");
        if !exec::output_exists(&rendered) {
            return Err(ConvertError::Render("renderer produced no output file".into()).into());
        }

        Ok(fs::read_to_string(&rendered)?)
    }
}

/// Probe the renderer binary. The `Err` value is the binary name, used in
/// the `MissingDependency` message.
fn probe(engine: NotebookEngine, command: &[String]) -> Result<(), String> {
    let name = command.first().cloned().unwrap_or_default();
    match engine {
        NotebookEngine::Nbconvert => {
            exec::lookup(command).map_err(|_| name.clone())?;
            crate::exec!(filter=&SILENT_FILTER; command; "--help").map_err(|_| name)?;
            Ok(())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

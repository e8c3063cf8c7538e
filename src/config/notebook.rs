//! `[notebook]` section configuration.
//!
//! Controls how notebook documents are recognized and handed to the external
//! renderer.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

// ============================================================================
// Enums
// ============================================================================

/// Converter engine used for notebook-to-HTML rendering.
///
/// A closed set: unknown values fail configuration parsing immediately
/// instead of surfacing at first conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotebookEngine {
    /// The `jupyter nbconvert` CLI (default).
    #[default]
    Nbconvert,
}

impl std::fmt::Display for NotebookEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nbconvert => write!(f, "nbconvert"),
        }
    }
}

// ============================================================================
// NotebookConfig
// ============================================================================

/// `[notebook]` section in nbsite.toml.
///
/// # Example
/// ```toml
/// [notebook]
/// engine = "nbconvert"
/// ext = "ipynb"                  # comma-separated list
/// page_attribute_prefix = ""     # empty disables prefixing
/// command = ["jupyter", "nbconvert"]
/// template = "basic"
/// attributes = []                # forwarded verbatim to the renderer
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct NotebookConfig {
    /// Renderer engine selection.
    #[serde(default = "defaults::notebook::engine")]
    #[educe(Default = defaults::notebook::engine())]
    pub engine: NotebookEngine,

    /// Extensions recognized as notebook documents (comma-separated).
    #[serde(default = "defaults::notebook::ext")]
    #[educe(Default = defaults::notebook::ext())]
    pub ext: String,

    /// Prefix applied to promoted attribute names; empty disables prefixing.
    #[serde(default = "defaults::notebook::page_attribute_prefix")]
    #[educe(Default = defaults::notebook::page_attribute_prefix())]
    pub page_attribute_prefix: String,

    /// Renderer command and leading arguments.
    #[serde(default = "defaults::notebook::command")]
    #[educe(Default = defaults::notebook::command())]
    pub command: Vec<String>,

    /// Renderer template name.
    #[serde(default = "defaults::notebook::template")]
    #[educe(Default = defaults::notebook::template())]
    pub template: String,

    /// Extra arguments forwarded verbatim to the renderer invocation.
    #[serde(default)]
    pub attributes: Vec<String>,

    /// Safety mode forwarded verbatim to the renderer when set.
    #[serde(default = "defaults::notebook::safe")]
    #[educe(Default = defaults::notebook::safe())]
    pub safe: Option<String>,
}

impl NotebookConfig {
    /// The configured extension set, lowercased and trimmed.
    pub fn extensions(&self) -> Vec<String> {
        self.ext
            .split(',')
            .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect()
    }

    /// Primary extension, used to name the renderer input file.
    pub fn primary_extension(&self) -> String {
        self.extensions()
            .into_iter()
            .next()
            .unwrap_or_else(defaults::notebook::ext)
    }
}

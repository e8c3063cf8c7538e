//! `[base]` section configuration.
//!
//! Contains basic site information like title, author, description, etc.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in nbsite.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "My Notebooks"
/// description = "Published lab notebooks"
/// author = "Alice"
/// url = "https://example.com"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title displayed in headers and listings.
    #[serde(default)]
    pub title: String,

    /// Author name for meta tags.
    #[serde(default = "defaults::base::author")]
    #[educe(Default = defaults::base::author())]
    pub author: String,

    /// Site description for SEO meta tags.
    #[serde(default)]
    pub description: String,

    /// Base URL for absolute links.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// BCP 47 language code (e.g., "en-US").
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,
}

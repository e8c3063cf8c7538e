//! Site model and the metadata-promotion pass.
//!
//! `Page` is the **primary metadata structure** for content documents,
//! holding path information, raw content, the metadata record, and the
//! per-page templating flag.
//!
//! # Architecture
//!
//! ```text
//! collect_site()
//!     │
//!     └── Site { pages, posts }
//!             │
//!             ▼
//! promote_metadata()            (one sequential pass per build)
//!     │
//!     ├── converter.matches(ext)?
//!     ├── load_header() ──► decode_header() ──► merge()
//!     └── liquid = should_template()
//! ```
//!
//! Pages with no parseable header are left untouched: a page may rely
//! solely on site-wide defaults, so that is a warning, not an error.

use crate::{
    config::SiteConfig,
    convert::NotebookConverter,
    log,
    notebook::{
        MetadataRecord,
        meta::{decode_header, load_header, merge, should_template},
    },
};
use anyhow::{Context, Result, anyhow};
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Files to ignore during directory traversal
const IGNORED_FILES: &[&str] = &[".DS_Store"];

// ============================================================================
// Page
// ============================================================================

/// One content document, borrowed by the build passes.
///
/// The metadata pass mutates only `data` and `liquid`; everything else is
/// fixed at collection time.
#[derive(Debug, Clone)]
pub struct Page {
    /// Path information
    pub paths: PagePaths,
    /// File extension without the dot (lowercased)
    pub ext: String,
    /// Raw document content
    pub content: String,
    /// Metadata record, mutated in place by promotion
    pub data: MetadataRecord,
    /// Whether a later templating stage processes this page (default true)
    pub liquid: bool,
}

/// Path information for a page.
#[derive(Debug, Clone)]
pub struct PagePaths {
    /// Source file path
    pub source: PathBuf,
    /// Generated HTML file path
    pub html: PathBuf,
    /// Relative path without extension (for logging)
    pub relative: String,
}

impl Page {
    /// Create a `Page` from a source file path, reading its content.
    ///
    /// Output layout follows pretty URLs: `a/b.ipynb` → `<output>/a/b/index.html`,
    /// with the content-root `index` document mapping to `<output>/index.html`.
    ///
    /// # Errors
    ///
    /// Returns error if the file is not in the content directory or cannot
    /// be read.
    pub fn from_source(source: PathBuf, config: &SiteConfig) -> Result<Self> {
        let content_dir = &config.build.content;
        let output_dir = &config.build.output;

        let ext = source
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let relative = source
            .strip_prefix(content_dir)
            .map_err(|_| anyhow!("File is not in content directory: {}", source.display()))?
            .with_extension("")
            .to_str()
            .ok_or_else(|| anyhow!("Invalid path encoding"))?
            .to_owned();

        let html = if relative == "index" {
            output_dir.clone()
        } else {
            output_dir.join(&relative)
        }
        .join("index.html");

        let content = fs::read_to_string(&source)
            .with_context(|| format!("Failed to read {}", source.display()))?;

        Ok(Self {
            paths: PagePaths {
                source,
                html,
                relative,
            },
            ext,
            content,
            data: MetadataRecord::new(),
            liquid: true,
        })
    }
}

// ============================================================================
// Site
// ============================================================================

/// All pages and posts collected for one build.
#[derive(Debug, Default)]
pub struct Site {
    pub pages: Vec<Page>,
    pub posts: Vec<Page>,
}

impl Site {
    /// Iterate pages then posts (promotion order is significant only in
    /// that it is stable).
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Page> {
        self.pages.iter_mut().chain(self.posts.iter_mut())
    }

    /// Total number of documents.
    pub fn len(&self) -> usize {
        self.pages.len() + self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.posts.is_empty()
    }
}

/// Collect all documents from the content directory.
///
/// Documents under `[build.posts_dir]` are posts; everything else is a page.
/// Files that cannot be read as text (a stray image, a permission problem)
/// are skipped with a warning; one bad file never aborts the collection.
pub fn collect_site(config: &SiteConfig) -> Site {
    let posts_dir = config.build.content.join(&config.build.posts_dir);
    let mut site = Site::default();

    for path in collect_all_files(&config.build.content) {
        let page = match Page::from_source(path, config) {
            Ok(page) => page,
            Err(err) => {
                log!("warn"; "Skipping document: {err:#}");
                continue;
            }
        };
        if page.paths.source.starts_with(&posts_dir) {
            site.posts.push(page);
        } else {
            site.pages.push(page);
        }
    }

    site
}

/// Collect all files from a directory recursively.
fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}

// ============================================================================
// Metadata promotion pass
// ============================================================================

/// Promote header metadata into every matching page's record and set its
/// templating flag.
///
/// Runs once per build, sequentially over pages then posts. A page whose
/// header cannot be parsed is left untouched (warned, not fatal); renderer
/// availability failure aborts the pass before any page work.
pub fn promote_metadata(site: &mut Site, converter: &NotebookConverter, config: &SiteConfig) {
    let prefix = &config.notebook.page_attribute_prefix;

    for page in site.iter_mut() {
        if !converter.matches(&page.ext) {
            continue;
        }

        let Some(header) = load_header(&page.content) else {
            log!("warn"; "{}: no parseable header, skipping metadata", page.paths.relative);
            continue;
        };

        let Some(mapping) = decode_header(&header) else {
            log!("warn"; "{}: header is not a metadata mapping", page.paths.relative);
            continue;
        };

        merge(&mut page.data, mapping, prefix);
        page.liquid = should_template(&page.data);
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Site configuration management for `nbsite.toml`.
//!
//! # Sections
//!
//! | Section      | Purpose                                        |
//! |--------------|------------------------------------------------|
//! | `[base]`     | Site metadata (title, author, url)             |
//! | `[build]`    | Build paths, output handling                   |
//! | `[notebook]` | Notebook recognition and renderer invocation   |
//! | `[extra]`    | User-defined custom fields                     |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "My Notebooks"
//! url = "https://example.com"
//!
//! [build]
//! content = "content"
//! output = "public"
//!
//! [notebook]
//! ext = "ipynb"
//! page_attribute_prefix = ""
//!
//! [extra]
//! analytics_id = "UA-12345"
//! ```
//!
//! The configuration is built once at startup, merged with CLI arguments,
//! and passed by reference everywhere; no component mutates it afterwards.

mod base;
mod build;
pub mod defaults;
mod error;
mod notebook;

// Re-export public types used by other modules
pub use notebook::{NotebookConfig, NotebookEngine};

// Internal imports used in this module
use base::BaseConfig;
use build::BuildConfig;
use error::ConfigError;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing nbsite.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Notebook recognition and renderer settings
    #[serde(default)]
    pub notebook: NotebookConfig,

    /// User-defined extra fields
    #[serde(default)]
    pub extra: HashMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf());
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let root = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());

        // Apply CLI overrides first
        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        if let Commands::Build { clear } = &cli.command
            && *clear
        {
            self.build.clear = true;
        }

        // Normalize all paths relative to root
        let root = Self::normalize_path(&root);
        self.set_root(&root);
        self.config_path = Self::normalize_path(&root.join(&cli.config));
        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self) -> Result<()> {
        if !self.config_path.exists() {
            bail!("Config file not found");
        }

        if self.notebook.command.is_empty() {
            bail!(ConfigError::Validation(
                "[notebook.command] must have at least one element".into()
            ));
        }

        if self.notebook.extensions().is_empty() {
            bail!(ConfigError::Validation(
                "[notebook.ext] must name at least one extension".into()
            ));
        }

        if let Some(base_url) = &self.base.url
            && !base_url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        if !self.build.content.exists() {
            bail!(ConfigError::Validation(format!(
                "[build.content] not found: {}",
                self.build.content.display()
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        let config_str = r#"
            [base]
            title = "My Notebooks"
            author = "Test Author"
        "#;
        let config = SiteConfig::from_str(config_str).unwrap();

        assert_eq!(config.base.title, "My Notebooks");
        assert_eq!(config.base.author, "Test Author");
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let invalid_config = r#"
            [base
            title = "My Notebooks"
        "#;
        assert!(SiteConfig::from_str(invalid_config).is_err());
    }

    #[test]
    fn test_get_root_default() {
        let config = SiteConfig::default();
        assert_eq!(config.get_root(), Path::new("./"));
    }

    #[test]
    fn test_set_root() {
        let mut config = SiteConfig::default();
        config.set_root(Path::new("/custom/path"));
        assert_eq!(config.get_root(), Path::new("/custom/path"));
    }

    #[test]
    fn test_validate_empty_command() {
        let mut config = SiteConfig::default();
        config.config_path = std::env::temp_dir();
        config.notebook.command = Vec::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("[notebook.command]"));
    }

    #[test]
    fn test_validate_empty_extension_set() {
        let mut config = SiteConfig::default();
        config.config_path = std::env::temp_dir();
        config.notebook.ext = " , ".into();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("[notebook.ext]"));
    }

    #[test]
    fn test_validate_bad_base_url() {
        let mut config = SiteConfig::default();
        config.config_path = std::env::temp_dir();
        config.base.url = Some("example.com".into());

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("[base.url]"));
    }

    #[test]
    fn test_extra_fields() {
        let config = r#"
            [base]
            title = "Test"

            [extra]
            custom_field = "custom_value"
            number_field = 42
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(
            config.extra.get("custom_field").and_then(|v| v.as_str()),
            Some("custom_value")
        );
        assert_eq!(
            config.extra.get("number_field").and_then(|v| v.as_integer()),
            Some(42)
        );
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();

        assert!(config.cli.is_none());
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.base.title, "");
        assert!(!config.build.clear);
        assert_eq!(config.notebook.ext, "ipynb");
    }

    #[test]
    fn test_full_config_all_sections() {
        let config = r#"
            [base]
            title = "Lab Notes"
            description = "Published lab notebooks"
            author = "Alice"
            url = "https://example.com"

            [build]
            content = "notebooks"
            output = "dist"
            clear = true

            [notebook]
            engine = "nbconvert"
            ext = "ipynb,nb"
            page_attribute_prefix = "page"
            command = ["jupyter", "nbconvert"]
            template = "basic"
            attributes = ["--no-input"]

            [extra]
            analytics_id = "UA-12345"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.title, "Lab Notes");
        assert_eq!(config.build.content, PathBuf::from("notebooks"));
        assert_eq!(config.notebook.extensions(), vec!["ipynb", "nb"]);
        assert_eq!(config.notebook.page_attribute_prefix, "page");
        assert_eq!(config.notebook.attributes, vec!["--no-input"]);
        assert!(config.extra.contains_key("analytics_id"));
    }

    #[test]
    fn test_unknown_top_level_field_rejection() {
        let config = r#"
            [base]
            title = "Test"

            [unknown_section]
            field = "value"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }
}

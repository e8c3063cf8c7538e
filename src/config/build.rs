//! `[build]` section configuration.
//!
//! Contains build paths and output handling options.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in nbsite.toml - build pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// content = "content"      # Source directory
/// output = "public"        # Output directory
/// clear = false            # Keep previous output between builds
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Content source directory (notebook files).
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Subdirectory of `content` whose documents are treated as posts.
    #[serde(default = "defaults::build::posts_dir")]
    #[educe(Default = defaults::build::posts_dir())]
    pub posts_dir: PathBuf,

    /// Clear output directory before each build.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clear: bool,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_build_config_defaults() {
        let config: SiteConfig = toml::from_str("[base]\ntitle = \"t\"").unwrap();

        assert_eq!(config.build.content, PathBuf::from("content"));
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert_eq!(config.build.posts_dir, PathBuf::from("posts"));
        assert!(!config.build.clear);
        assert!(config.build.root.is_none());
    }

    #[test]
    fn test_build_config_overrides() {
        let config = r#"
            [build]
            content = "notebooks"
            output = "dist"
            clear = true
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.build.content, PathBuf::from("notebooks"));
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(config.build.clear);
    }
}

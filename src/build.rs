//! Build orchestration: collect, promote metadata, convert, write.
//!
//! The renderer availability check runs before any page work so a missing
//! binary fails the build immediately instead of after a partial output
//! tree.

use crate::{
    config::SiteConfig,
    convert::NotebookConverter,
    log,
    site::{self, Page, Site},
};
use anyhow::{Context, Result};
use std::{fs, time::Instant};

/// Build the whole site.
pub fn build_site(config: &'static SiteConfig) -> Result<()> {
    let start = Instant::now();
    let converter = NotebookConverter::new(config);

    converter.ensure_ready()?;
    prepare_output_dir(config)?;

    let mut site = site::collect_site(config);
    if site.is_empty() {
        log!("warn"; "No documents found in {}", config.build.content.display());
        return Ok(());
    }
    log!(
        "build";
        "Found {} pages and {} posts in {}",
        site.pages.len(),
        site.posts.len(),
        config.build.content.display()
    );

    site::promote_metadata(&mut site, &converter, config);
    let rendered = render_site(&site, &converter)?;

    log!(
        "build";
        "Rendered {rendered}/{} documents in {:.2}s",
        site.len(),
        start.elapsed().as_secs_f32()
    );
    Ok(())
}

/// Convert every matching document and write it under the output dir.
///
/// Returns the number of documents rendered. Non-notebook files are left
/// alone; other build stages own them.
fn render_site(site: &Site, converter: &NotebookConverter) -> Result<usize> {
    let mut rendered = 0;

    for page in site.pages.iter().chain(site.posts.iter()) {
        if !converter.matches(&page.ext) {
            continue;
        }
        render_page(page, converter)
            .with_context(|| format!("Failed to render {}", page.paths.relative))?;
        rendered += 1;
    }

    Ok(rendered)
}

fn render_page(page: &Page, converter: &NotebookConverter) -> Result<()> {
    let html = converter.convert(&page.content)?;

    if let Some(parent) = page.paths.html.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&page.paths.html, html)?;

    log!("page"; "{} ({} metadata keys)", page.paths.relative, page.data.len());
    Ok(())
}

/// Create the output dir, emptying it first when `clear` is set.
fn prepare_output_dir(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;

    if config.build.clear && output.exists() {
        log!("build"; "Clearing {}", output.display());
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear {}", output.display()))?;
    }

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn leak_config(dir: &TempDir) -> &'static SiteConfig {
        let mut config = SiteConfig::default();
        config.build.content = dir.path().join("content");
        config.build.output = dir.path().join("public");
        fs::create_dir_all(&config.build.content).unwrap();
        Box::leak(Box::new(config))
    }

    #[test]
    fn test_prepare_output_dir_creates() {
        let dir = TempDir::new().unwrap();
        let config = leak_config(&dir);

        prepare_output_dir(config).unwrap();
        assert!(config.build.output.is_dir());
    }

    #[test]
    fn test_prepare_output_dir_clear_empties() {
        let dir = TempDir::new().unwrap();
        let config = {
            let mut config = SiteConfig::default();
            config.build.content = dir.path().join("content");
            config.build.output = dir.path().join("public");
            config.build.clear = true;
            fs::create_dir_all(&config.build.content).unwrap();
            &*Box::leak(Box::new(config))
        };

        let stale = config.build.output.join("stale.html");
        fs::create_dir_all(&config.build.output).unwrap();
        fs::write(&stale, "old").unwrap();

        prepare_output_dir(config).unwrap();
        assert!(config.build.output.is_dir());
        assert!(!stale.exists());
    }

    #[test]
    fn test_prepare_output_dir_without_clear_keeps_files() {
        let dir = TempDir::new().unwrap();
        let config = leak_config(&dir);

        let kept = config.build.output.join("kept.html");
        fs::create_dir_all(&config.build.output).unwrap();
        fs::write(&kept, "old").unwrap();

        prepare_output_dir(config).unwrap();
        assert!(kept.exists());
    }

    #[test]
    fn test_build_site_fails_fast_without_renderer() {
        let dir = TempDir::new().unwrap();
        let config = {
            let mut config = SiteConfig::default();
            config.build.content = dir.path().join("content");
            config.build.output = dir.path().join("public");
            config.notebook.command = vec!["definitely-not-a-real-binary-4921".into()];
            fs::create_dir_all(&config.build.content).unwrap();
            fs::write(
                config.build.content.join("a.ipynb"),
                r#"{"cells":[{"source":["title: Hi\n"]}]}"#,
            )
            .unwrap();
            &*Box::leak(Box::new(config))
        };

        assert!(build_site(config).is_err());
        // No page work happened.
        assert!(!config.build.output.join("a").exists());
    }

    #[test]
    fn test_build_site_empty_content_is_ok() {
        let dir = TempDir::new().unwrap();
        let config = {
            let mut config = SiteConfig::default();
            config.build.content = dir.path().join("content");
            config.build.output = dir.path().join("public");
            // `true` passes the availability probe without jupyter.
            config.notebook.command = vec!["true".into()];
            fs::create_dir_all(&config.build.content).unwrap();
            &*Box::leak(Box::new(config))
        };
        if which::which("true").is_err() {
            return;
        }

        build_site(config).unwrap();
        assert!(config.build.output.is_dir());
    }

    #[test]
    fn test_build_site_end_to_end() {
        if std::process::Command::new("jupyter")
            .args(["nbconvert", "--help"])
            .output()
            .is_err()
        {
            eprintln!("Skipping test_build_site_end_to_end: jupyter not found");
            return;
        }

        let doc = r##"{
            "cells": [
                {"cell_type": "markdown", "metadata": {}, "source": ["title: Hello\n"]},
                {"cell_type": "markdown", "metadata": {}, "source": ["# Body"]}
            ],
            "metadata": {},
            "nbformat": 4,
            "nbformat_minor": 5
        }"##;

        let dir = TempDir::new().unwrap();
        let config = leak_config(&dir);
        fs::write(config.build.content.join("hello.ipynb"), doc).unwrap();
        fs::write(config.build.content.join("notes.txt"), "plain").unwrap();

        build_site(config).unwrap();

        let html_path: &Path = &config.build.output.join("hello/index.html");
        let html = fs::read_to_string(html_path).unwrap();
        assert!(html.contains("Body"));
        // Non-notebook files are not rendered.
        assert!(!config.build.output.join("notes/index.html").exists());
    }
}

//! nbsite - notebook metadata promotion and static-site conversion.

mod build;
mod cli;
mod config;
mod convert;
mod logger;
mod notebook;
mod site;
mod utils;

use anyhow::Result;
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use convert::NotebookConverter;
use std::path::Path;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static SiteConfig = Box::leak(Box::new(load_config(cli)?));

    match &cli.command {
        Commands::Build { .. } => build_site(config),
        Commands::Check => check_site(config),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}

/// Verify the configuration and the renderer without building anything.
fn check_site(config: &'static SiteConfig) -> Result<()> {
    log!("check"; "Config OK: {}", config.config_path.display());

    let converter = NotebookConverter::new(config);
    converter.ensure_ready()?;
    log!(
        "check";
        "Renderer OK: {} ({})",
        config.notebook.command.join(" "),
        config.notebook.engine
    );

    Ok(())
}

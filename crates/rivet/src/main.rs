//! Rivet - Entry Point
//!
//! Inspection commands for a Rivet deployment's configuration and the
//! remote factory providers linked into the binary.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `rivet check` | Load config, assemble the default container, print a summary |
//! | `rivet protocols` | List linked remote factory providers and their protocols |
//! | `rivet config` | Print the effective configuration as TOML |

// Force-link rivet-providers so linkme registrations are included
extern crate rivet_providers;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rivet_application::ports::registry::{
    list_remote_factory_providers, resolve_remote_factory_providers,
};
use rivet_infrastructure::config::AppConfig;
use rivet_infrastructure::logging::init_logging;
use rivet_infrastructure::{Bootstrap, ConfigLoader};
use std::path::{Path, PathBuf};

/// Command line interface for Rivet
#[derive(Parser, Debug)]
#[command(name = "rivet")]
#[command(about = "Rivet - IoC container inspection")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Validate configuration and assemble the default container
    Check,
    /// List remote factory providers and the protocols they serve
    Protocols,
    /// Print the effective configuration
    Config,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = path {
        loader = loader.with_config_path(path);
    }
    loader.load().context("Failed to load configuration")
}

fn check(config: AppConfig) -> anyhow::Result<()> {
    init_logging(&config.logging).context("Failed to initialize logging")?;
    let context = Bootstrap::new(config)?
        .build()
        .context("Container assembly failed")?;
    let container = context.container();

    println!("bindings:       {}", container.injector().bindings().count());
    println!("singletons:     {}", container.injector().singleton_count());
    for protocol in container.remote_factories().protocols() {
        let provider = container
            .remote_factories()
            .provider_of(protocol.as_str())
            .unwrap_or("?");
        println!("protocol:       {protocol} ({provider})");
    }
    println!("rmi endpoints:  {}", context.rmi_endpoints().len());
    println!("rest resources: {}", context.rest_resources().len());
    println!("ok");
    Ok(())
}

fn protocols(config: &AppConfig) -> anyhow::Result<()> {
    let providers = resolve_remote_factory_providers(&config.remote.provider_config())
        .map_err(anyhow::Error::msg)?;
    let descriptions = list_remote_factory_providers();
    for provider in providers {
        let description = descriptions
            .iter()
            .find(|(name, _)| *name == provider.name())
            .map_or("", |(_, description)| *description);
        println!(
            "{:<12} {:<24} {}",
            provider.name(),
            provider.protocols().join(","),
            description
        );
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Check => check(config),
        Command::Protocols => protocols(&config),
        Command::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

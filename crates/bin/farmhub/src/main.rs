//! # farmhub: smart farm console
//!
//! Composition root that wires configuration, logging and the registry
//! together and hands the terminal to the menu shell.
//!
//! ## Responsibilities
//! - Parse command-line flags
//! - Load `farmhub.toml` with environment overrides
//! - Install the `tracing` subscriber (stderr, so logs never mix with the menu)
//! - Construct the registry with the configured device defaults
//! - Run the interactive shell on stdin/stdout
//!
//! ## Dependency rule
//! This is the **only** crate that touches the terminal.
//! It is the wiring layer: no domain logic belongs here.

mod config;
mod shell;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use farmhub_app::registry::Registry;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::Config;
use crate::shell::Shell;

/// Manage farm stations and devices from an interactive menu.
#[derive(Debug, Parser)]
#[command(name = "farmhub", version, about)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, env = "FARMHUB_CONFIG", default_value = "farmhub.toml")]
    config: PathBuf,

    /// Logging filter (`RUST_LOG` syntax), overriding the configuration.
    #[arg(long)]
    log: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(filter) = args.log {
        config.logging.filter = filter;
    }

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::new(&config.logging.filter))
        .try_init()
        .context("installing the log subscriber")?;
    tracing::debug!(config = %args.config.display(), "configuration loaded");

    let registry = Registry::with_defaults(config.device_defaults());
    tracing::debug!(defaults = ?registry.defaults(), "registry ready");
    let mut shell = Shell::new(io::stdin().lock(), io::stdout().lock(), registry);
    shell.run().context("running the menu shell")?;
    Ok(())
}

//! diocles - operator diagnostics for the deathboard collector
//!
//! A thin, read-only surface over `diocles-core`'s public accessors:
//! - `diocles config` shows the resolved collector configuration
//! - `diocles ping` probes the collector's health endpoints
//!
//! The live deathboard state belongs to the running game server; this tool
//! only inspects configuration and collector reachability from the outside.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use diocles_core::{probe, CollectorConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "diocles")]
#[command(about = "Deathboard collector diagnostics")]
#[command(version)]
struct Args {
    /// Server install root (where config/diocles.json lives)
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the resolved collector configuration
    Config,

    /// Probe the collector's health endpoints
    Ping,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        diocles_core::logging::init_stderr("debug");
    }

    let config = CollectorConfig::resolve(&args.root);
    tracing::debug!(root = %args.root.display(), online = config.is_online(), "Resolved collector configuration");

    match args.command {
        Command::Config => show_config(&args.root, &config),
        Command::Ping => ping(&config),
    }
}

fn show_config(root: &PathBuf, config: &CollectorConfig) -> Result<()> {
    match &config.base_url {
        Some(base_url) => println!("collector: {}", base_url),
        None => println!("collector: offline (not configured)"),
    }
    println!(
        "authkey:   {}",
        if config.auth_key.is_some() { "set" } else { "not set" }
    );
    println!(
        "fallback:  {}",
        CollectorConfig::config_path(root).display()
    );
    Ok(())
}

fn ping(config: &CollectorConfig) -> Result<()> {
    let report = probe(config);
    if report.ok {
        println!("collector reachable: {}", report.detail);
        Ok(())
    } else {
        bail!("collector unreachable: {}", report.detail)
    }
}

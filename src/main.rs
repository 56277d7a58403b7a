//! Roadside assistance - head-unit navigation flow driven from the console
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::Parser;
use roadside_app::config::{self, Settings};
use roadside_core::prelude::*;
use roadside_core::Operation;

/// Roadside assistance - head-unit navigation flow driven from the console
#[derive(Parser, Debug)]
#[command(name = "roadside")]
#[command(about = "Roadside assistance head-unit flow with a line-oriented console", long_about = None)]
struct Args {
    /// Directory holding `.roadside/` (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Simulated latency of every data source query in milliseconds
    #[arg(long, value_name = "MS")]
    latency_ms: Option<u64>,

    /// Make a query fail (advisory, issues, cars, tow-destinations); repeatable
    #[arg(long = "fail", value_name = "OPERATION")]
    fail: Vec<Operation>,

    /// Start logged in when no login flag has been stored yet
    #[arg(long)]
    logged_in: bool,

    /// Write a default `.roadside/config.toml` and exit
    #[arg(long)]
    init: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_dir = args
        .config_dir
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    if args.init {
        config::init_config_dir(&config_dir)?;
        eprintln!("Initialized {}", config_dir.join(".roadside").display());
        return Ok(());
    }

    color_eyre::install().map_err(|e| Error::startup(e.to_string()))?;
    roadside_core::logging::init()?;

    let settings = apply_overrides(config::load_settings(&config_dir), &args);
    roadside::run_headless(&config_dir, settings).await
}

/// Command line flags win over `config.toml`
fn apply_overrides(mut settings: Settings, args: &Args) -> Settings {
    if let Some(latency_ms) = args.latency_ms {
        settings.data.latency_ms = latency_ms;
    }
    for operation in &args.fail {
        if !settings.data.fail.contains(operation) {
            settings.data.fail.push(*operation);
        }
    }
    if args.logged_in {
        settings.session.logged_in = true;
    }
    settings
}

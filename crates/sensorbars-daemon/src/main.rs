//! SensorBars Daemon - Main entry point
//!
//! Serves the sensor dataset as JSON and hosts the web frontend.

mod api;
mod config;
mod server;
mod state;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "sensorbars")]
#[command(about = "Sensor threshold visualization server")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "sensorbars.toml")]
    config: PathBuf,

    /// Bind address for web server
    #[arg(short, long)]
    bind: Option<String>,

    /// Directory holding config.json, sensors.json and readings.json
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Validate the dataset and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("SensorBars v{}", env!("CARGO_PKG_VERSION"));

    let mut config = config::load_config(&args.config)?;

    if let Some(bind) = args.bind {
        config.daemon.bind = bind;
    }
    if let Some(data) = args.data {
        config.data.path = data;
    }

    info!(
        bind = %config.daemon.bind,
        data = %config.data.path.display(),
        "Configuration loaded"
    );

    let state = state::AppState::new(config.clone()).await?;

    if args.check {
        let dataset = &state.dataset;
        println!(
            "{} threshold rules, {} sensors, {} readings",
            dataset.config.len(),
            dataset.sensors.len(),
            dataset.readings.len()
        );
        let issues = dataset.integrity_issues();
        for issue in &issues {
            println!("  - {}", issue);
        }
        if !issues.is_empty() {
            anyhow::bail!("dataset has {} integrity issue(s)", issues.len());
        }
        println!("Dataset OK");
        return Ok(());
    }

    server::run(state, &config.daemon.bind, config.daemon.tls.as_ref()).await
}

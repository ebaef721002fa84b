mod commands;
mod progress;
mod summary;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fleetcheck_core::inspection::InspectionConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fleetcheck", about = "Vehicle damage inspection by image comparison")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Inspection config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for references, annotations, reports and history
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show video source metadata
    Info(commands::info::InfoArgs),
    /// Compare a new image against a reference image
    Compare(commands::compare::CompareArgs),
    /// Scan a candidate video against a reference video
    Scan(commands::scan::ScanArgs),
    /// Run a full photo inspection of a vehicle
    Inspect(commands::inspect::InspectArgs),
    /// Run a video inspection of a vehicle
    InspectVideo(commands::inspect_video::InspectVideoArgs),
    /// Show inspection history
    History(commands::history::HistoryArgs),
    /// Print or save the effective configuration as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_config(cli.config.as_deref(), cli.data_dir.as_deref())?;

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Compare(args) => commands::compare::run(args, &config),
        Commands::Scan(args) => commands::scan::run(args, &config),
        Commands::Inspect(args) => commands::inspect::run(args, config),
        Commands::InspectVideo(args) => commands::inspect_video::run(args, config),
        Commands::History(args) => commands::history::run(args, &config),
        Commands::Config(args) => commands::config::run(args, &config),
    }
}

/// Defaults, overlaid by the config file, overlaid by `--data-dir`.
fn load_config(path: Option<&Path>, data_dir: Option<&Path>) -> Result<InspectionConfig> {
    let mut config = match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str(&contents).context("Invalid inspection config")?
        }
        None => InspectionConfig::default(),
    };
    if let Some(dir) = data_dir {
        config.data_dir = dir.to_path_buf();
    }
    config.validate().context("Invalid inspection config")?;
    Ok(config)
}

// SPDX-License-Identifier: GPL-3.0-only

use camloc::backends::PermissionPolicy;
use camloc::config::Config;
use camloc::constants::LocationAccuracy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "camloc")]
#[command(about = "Access your camera and location")]
#[command(version = env!("GIT_VERSION"))]
#[command(subcommand_required = false)]
struct Cli {
    /// Config file (default: ~/.config/camloc/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override how camera permission requests are answered
    #[arg(long, global = true, value_enum)]
    camera_permission: Option<PermissionPolicy>,

    /// Override how location permission requests are answered
    #[arg(long, global = true, value_enum)]
    location_permission: Option<PermissionPolicy>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive terminal UI (default)
    Terminal,

    /// Request camera access and take a photo
    Photo {
        /// Output directory (default: ~/Pictures/camloc)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Request location access and print the current position as JSON
    Locate {
        /// Requested accuracy (lowest, low, balanced, high, highest, best-for-navigation)
        #[arg(short, long)]
        accuracy: Option<LocationAccuracy>,
    },

    /// Show the effective configuration
    Config {
        /// Write the default configuration file if none exists
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=camloc=debug, RUST_LOG=info
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    if matches!(cli.command, None | Some(Commands::Terminal)) {
        // Log to a file; stderr output would tear the alternate screen
        let log_dir = camloc::storage::log_directory();
        std::fs::create_dir_all(&log_dir)?;
        let log_file = std::fs::File::create(log_dir.join("camloc.log"))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(log_file))
            .with_ansi(false)
            .with_target(true)
            .with_level(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .init();
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(policy) = cli.camera_permission {
        config.camera_permission = policy;
    }
    if let Some(policy) = cli.location_permission {
        config.location_permission = policy;
    }

    match cli.command {
        None | Some(Commands::Terminal) => camloc::terminal::run(config),
        Some(Commands::Photo { output }) => Ok(cli::take_photo(config, output)?),
        Some(Commands::Locate { accuracy }) => Ok(cli::locate(config, accuracy)?),
        Some(Commands::Config { init }) => {
            let path = cli.config.or_else(Config::default_path);
            Ok(cli::show_config(&config, path, init)?)
        }
    }
}

//! # Fairway CLI
//!
//! The command-line interface for the Fairway round tracker: runs the
//! API server and manages its configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;

mod commands;
mod config;
mod telemetry;

#[derive(Parser)]
#[command(name = "fairway")]
#[command(version)]
#[command(about = "Golf round tracking and handicap service", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to (defaults to the configured host)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,

        /// JSON file holding the round history
        #[arg(short, long)]
        data_file: Option<PathBuf>,
    },

    /// Display version and build info
    Version,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set the round store data file
    SetDataFile {
        /// Path of the JSON data file
        path: PathBuf,
    },

    /// Clear the data file, keeping rounds in memory only
    ClearDataFile,

    /// Show config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // Initialize logging
    let telemetry_config =
        telemetry::TelemetryConfig::new("fairway").with_log_level(&cli.log_level);

    let telemetry_config = if cli.json_logs {
        telemetry_config.with_json_logs()
    } else {
        telemetry_config
    };

    telemetry::init_logging(&telemetry_config);

    // Load configuration for default values
    let cfg = config::Config::load();

    match cli.command {
        Commands::Serve {
            host,
            port,
            data_file,
        } => {
            // Fall back to config for anything not given on the command line
            let host = host.unwrap_or_else(|| cfg.server_host.clone());
            let port = port.unwrap_or(cfg.server_port);
            let data_file = data_file.or_else(|| cfg.data_file.clone());
            commands::serve(host, port, cfg.allowed_origin(), data_file).await?;
        }

        Commands::Version => {
            commands::version();
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                config::show_config();
            }
            ConfigAction::SetDataFile { path } => {
                let mut cfg = config::Config::load();
                match cfg.set_data_file(path.clone()) {
                    Ok(()) => {
                        println!("Data file set to: {}", path.display());
                        println!(
                            "Config saved to: {}",
                            config::Config::config_path().display()
                        );
                    }
                    Err(e) => {
                        eprintln!("Failed to save config: {}", e);
                    }
                }
            }
            ConfigAction::ClearDataFile => {
                let mut cfg = config::Config::load();
                match cfg.clear_data_file() {
                    Ok(()) => {
                        println!("Data file cleared, rounds will be kept in memory.");
                    }
                    Err(e) => {
                        eprintln!("Failed to save config: {}", e);
                    }
                }
            }
            ConfigAction::Path => {
                println!("{}", config::Config::config_path().display());
            }
        },
    }

    Ok(())
}

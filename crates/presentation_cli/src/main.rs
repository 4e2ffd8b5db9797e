//! GeoView CLI
//!
//! One-shot geocoding against a running server and configuration helpers.

#![allow(clippy::print_stdout)]

mod client;

use std::{path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};
use infrastructure::{AppConfig, LogFormat, TelemetryConfig, init_telemetry};

use crate::client::{ServerClient, format_place};

const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// GeoView CLI
#[derive(Parser)]
#[command(name = "geoview-cli")]
#[command(author, version, about = "GeoView map viewer CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Server URL
    #[arg(short, long, global = true, env = "GEOVIEW_URL", default_value = DEFAULT_SERVER_URL)]
    url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 10)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find places matching a name
    ///
    /// Example: geoview-cli search "Eiffel Tower"
    Search {
        /// Place name
        query: String,

        /// Print at most this many results
        #[arg(short, long, default_value_t = 5)]
        limit: usize,

        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Name the place at a coordinate
    ///
    /// Example: geoview-cli reverse 48.8584 2.2945
    Reverse {
        /// Latitude in degrees
        #[arg(allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(allow_negative_numbers = true)]
        lon: f64,

        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Check server health (exit code 1 when unhealthy)
    Health,

    /// Print configuration as TOML
    ///
    /// Without --file, prints the built-in defaults as a starting config.toml.
    Config {
        /// Print the effective configuration loaded from this file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_telemetry(&TelemetryConfig {
        log_filter: log_filter_from_verbosity(cli.verbose).to_string(),
        format: LogFormat::Text,
    })?;

    let client = || ServerClient::new(&cli.url, Duration::from_secs(cli.timeout));

    match cli.command {
        Commands::Search { query, limit, json } => {
            let places = client()?.search(&query).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&places)?);
            } else if places.is_empty() {
                println!("No results found for the search query.");
            } else {
                for (index, place) in places.iter().take(limit).enumerate() {
                    println!("{}. {}", index + 1, format_place(place));
                }
            }
        },

        Commands::Reverse { lat, lon, json } => {
            let place = client()?.reverse(lat, lon).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&place)?);
            } else {
                println!("{}", format_place(&place));
            }
        },

        Commands::Health => match client()?.health().await {
            Ok(health) => {
                println!(
                    "Healthy: {} v{} ({} sessions)",
                    health.status, health.version, health.sessions
                );
            },
            Err(e) => {
                println!("Unhealthy: {e:#}");
                std::process::exit(1);
            },
        },

        Commands::Config { file } => {
            let config = match file {
                Some(path) => AppConfig::load_from(&path)?,
                None => AppConfig::default(),
            };
            print!("{}", render_config(&config)?);
        },
    }

    Ok(())
}

/// Render configuration as TOML
fn render_config(config: &AppConfig) -> anyhow::Result<String> {
    Ok(toml::to_string_pretty(config)?)
}

//! CLI command definitions and parsing
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "invnorm",
    version,
    about = "Normalize raw network inventory into a canonical schema",
    long_about = "invnorm validates and normalizes IP addresses, hostnames, FQDNs, MAC addresses, \
                  owners, device types and sites from a raw inventory CSV. Deterministic rules run \
                  first; an optional text-generation assistant resolves only the ambiguous fields. \
                  Data problems are reported as anomalies for human review."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/invnorm/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize an inventory CSV
    Run {
        /// Raw inventory CSV
        #[arg(default_value = "inventory_raw.csv", value_name = "INPUT")]
        input: PathBuf,

        /// Cleaned CSV output (defaults to output.clean_csv from config)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Anomaly report output (defaults to output.anomalies_json from config)
        #[arg(short, long, value_name = "FILE")]
        anomalies: Option<PathBuf>,

        /// Use deterministic rules only, never contact the assistant
        #[arg(long)]
        offline: bool,

        /// Sampling temperature for assistant requests
        #[arg(long, value_name = "T")]
        temperature: Option<f32>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::filter::AirportFilter;

/// Serve command arguments.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Address to serve the page on (overrides `server.bind`)
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<SocketAddr>,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Only flights departing from or arriving at this airport ("all" for every flight)
    #[arg(short, long, default_value = "all", value_name = "CODE")]
    pub airport: AirportFilter,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration (the client secret is masked)
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for the flight table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table
    Table,
    /// JSON array of rows
    Json,
}

//! `fidsboard` - CLI for the flight board
//!
//! This binary serves the flight board page, prints the flight table in the
//! terminal, and inspects configuration.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use fidsboard::cli::{Cli, Command, ConfigCommand, OutputFormat, ServeCommand, ShowCommand};
use fidsboard::lookup::AIRPORTS;
use fidsboard::render::{render_table, visible_rows};
use fidsboard::{init_logging, server, Config, Dashboard, FlightSource, TdxClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    let config_path = cli.config.clone();
    let load = || Config::load_from(config_path.clone()).context("loading configuration");

    match cli.command {
        Command::Serve(cmd) => handle_serve(&load()?, &cmd).await,
        Command::Show(cmd) => handle_show(&load()?, &cmd).await,
        Command::Airports => {
            handle_airports();
            Ok(())
        }
        // Validation reports a broken file instead of failing to load it
        Command::Config(ConfigCommand::Validate { file }) => {
            handle_validate(file.or_else(|| config_path.clone()));
            Ok(())
        }
        Command::Config(cmd) => handle_config(&load()?, &cmd),
    }
}

async fn handle_serve(config: &Config, cmd: &ServeCommand) -> anyhow::Result<()> {
    let client = TdxClient::from_config(config)?;
    let dashboard = Dashboard::new(
        Arc::new(client),
        config.display.default_theme,
        config.utc_offset(),
    );
    let addr = cmd.bind.unwrap_or(config.server.bind);
    server::serve(dashboard, addr).await?;
    Ok(())
}

async fn handle_show(config: &Config, cmd: &ShowCommand) -> anyhow::Result<()> {
    let client = TdxClient::from_config(config)?;
    let flights = client.fetch_all().await.context("fetching flights from TDX")?;
    let rows = visible_rows(&flights, &cmd.airport, config.utc_offset());

    match cmd.format {
        OutputFormat::Table => print!("{}", render_table(&rows)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }
    Ok(())
}

fn handle_airports() {
    for (code, name) in AIRPORTS {
        println!("{code}  {name}");
    }
}

fn handle_config(config: &Config, cmd: &ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = config.redacted();
            if *json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Auth]");
                println!("  Token URL:          {}", config.auth.token_url);
                println!(
                    "  Client ID:          {}",
                    config.auth.client_id.as_deref().unwrap_or("(not set)")
                );
                println!(
                    "  Client secret:      {}",
                    config.auth.client_secret.as_deref().unwrap_or("(not set)")
                );
                println!();
                println!("[API]");
                println!("  Flights URL:        {}", config.api.flights_url);
                println!("  Top:                {}", config.api.top);
                println!("  Timeout (secs):     {}", config.api.timeout_secs);
                println!();
                println!("[Server]");
                println!("  Bind:               {}", config.server.bind);
                println!();
                println!("[Display]");
                println!("  UTC offset (hours): {}", config.display.utc_offset_hours);
                println!("  Default theme:      {}", config.display.default_theme);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => handle_validate(file.clone()),
    }
    Ok(())
}

fn handle_validate(file: Option<std::path::PathBuf>) {
    let path = file.unwrap_or_else(Config::default_config_path);
    println!("Validating configuration: {}", path.display());
    match Config::load_from(Some(path)) {
        Ok(config) => {
            println!("Configuration is valid.");
            match config.credentials() {
                Ok(credentials) => println!("TDX client id: {}", credentials.client_id()),
                Err(_) => {
                    println!("Note: TDX credentials are not set; `serve` and `show` will fail.");
                }
            }
        }
        Err(e) => println!("Configuration error: {e}"),
    }
}

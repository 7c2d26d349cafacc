//! Farewatch CLI Application
//!
//! Command-line interface for recording and querying flight fares.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use farewatch_core::FareStoreBuilder;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        config,
        no_color,
        command,
    } = Args::parse();

    let store = FareStoreBuilder::new()
        .with_config_file(config)
        .with_database_path(database_file)
        .build()
        .context("Failed to open fare store")?;

    let cli = Cli::new(store, TerminalRenderer::new(!no_color));

    info!("Farewatch started");

    match command {
        Some(Init) => cli.init(),
        Some(Tables) => cli.list_tables(),
        Some(Carrier { command }) => cli.handle_carrier_command(command),
        Some(Airport { command }) => cli.handle_airport_command(command),
        Some(Route { command }) => cli.handle_route_command(command),
        Some(Quote { command }) => cli.handle_quote_command(command),
        Some(Import(args)) => cli.import(args),
        None => cli.list_tables(),
    }
}

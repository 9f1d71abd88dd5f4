//! trek CLI application
//!
//! Command-line front end for planning walking trips day by day.

mod args;
mod cli;
mod handlers;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use handlers::Cli;
use log::info;
use renderer::{OutputFormat, TerminalRenderer};
use trek_core::{ItineraryBuilder, StaticIdentity};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        json,
        user,
        command,
    } = Args::parse();

    let identity = match user {
        Some(user) => StaticIdentity::new(user),
        None => StaticIdentity::anonymous(),
    };
    let itinerary = ItineraryBuilder::new()
        .with_database_path(database_file)
        .with_identity(identity)
        .build()
        .await
        .context("Failed to initialize itinerary")?;

    let cli = Cli::new(
        itinerary,
        TerminalRenderer::new(OutputFormat::select(json, no_color)),
    );

    info!("trek started");

    match command {
        Some(Trip { command }) => cli.handle_trip_command(command).await,
        Some(Step { command }) => cli.handle_step_command(command).await,
        Some(Activity { command }) => cli.handle_activity_command(command).await,
        Some(Lodging { command }) => cli.handle_lodging_command(command).await,
        Some(Review { command }) => cli.handle_review_command(command).await,
        None => cli.list_trips().await,
    }
}

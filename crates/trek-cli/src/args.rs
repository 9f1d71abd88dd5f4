use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{ActivityCommands, LodgingCommands, ReviewCommands, StepCommands, TripCommands};

/// Plan walking trips day by day
///
/// A trip is an ordered sequence of day steps. Steps can be inserted or
/// deleted anywhere in the sequence, carry activities, transport legs and
/// lodging, and can be reviewed once walked.
#[derive(Parser)]
#[command(version, about, name = "trek")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/trek/trek.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print results as JSON instead of markdown
    #[arg(long, global = true)]
    pub json: bool,

    /// User acting on the trips
    #[arg(long, global = true, env = "TREK_USER")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the trek CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage trips
    #[command(alias = "t")]
    Trip {
        #[command(subcommand)]
        command: TripCommands,
    },
    /// Manage the day steps of a trip
    #[command(alias = "s")]
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
    /// Manage leisure activities and transport legs
    #[command(alias = "a")]
    Activity {
        #[command(subcommand)]
        command: ActivityCommands,
    },
    /// Manage accommodations
    #[command(alias = "l")]
    Lodging {
        #[command(subcommand)]
        command: LodgingCommands,
    },
    /// Review walked steps
    #[command(alias = "r")]
    Review {
        #[command(subcommand)]
        command: ReviewCommands,
    },
}

//! Command-line argument wrappers around the core parameter types.
//!
//! Core parameter types carry no clap attributes. Each wrapper here adds
//! flags and help text, then converts into its core counterpart:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Itinerary
//! ```

use clap::{Args, Subcommand};
use jiff::civil::{Date, DateTime};
use trek_core::{
    models::{ActivityKind, LeisureCategory, TransportMode, TripCategory},
    params::*,
};

/// Create a new trip
#[derive(Args)]
pub struct CreateTripArgs {
    /// Title of the trip, unique among your trips
    pub title: String,
    /// Country the trip takes place in
    #[arg(short, long)]
    pub country: String,
    /// Date of the first day, e.g. 2024-06-01
    #[arg(short, long)]
    pub start_date: Date,
    /// Landscape of the trip (coastal, mountainous, forest, desert, cultural,
    /// unclassifiable)
    #[arg(short = 'k', long, default_value = "unclassifiable")]
    pub category: TripCategory,
    #[arg(short, long)]
    pub notes: Option<String>,
}

impl From<CreateTripArgs> for CreateTrip {
    fn from(val: CreateTripArgs) -> Self {
        CreateTrip {
            title: val.title,
            country: val.country,
            category: val.category,
            start_date: val.start_date,
            notes: val.notes,
        }
    }
}

/// Identifies a single record by its ID
#[derive(Args)]
pub struct IdArgs {
    #[arg(help = "Unique identifier of the record")]
    pub id: u64,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Delete a trip with everything attached to it
#[derive(Args)]
pub struct DeleteTripArgs {
    #[arg(help = "Unique identifier of the trip to permanently delete")]
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

/// Edit the details of a trip
///
/// Moving the start date moves every step; it is refused while booked
/// accommodations would no longer match their steps.
#[derive(Args)]
pub struct EditTripArgs {
    #[arg(help = "Unique identifier of the trip to edit")]
    pub id: u64,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub country: Option<String>,
    #[arg(short, long)]
    pub start_date: Option<Date>,
    #[arg(short = 'k', long)]
    pub category: Option<TripCategory>,
    /// New notes; an empty value clears them
    #[arg(short, long)]
    pub notes: Option<String>,
}

impl From<EditTripArgs> for UpdateTrip {
    fn from(val: EditTripArgs) -> Self {
        UpdateTrip {
            id: val.id,
            title: val.title,
            country: val.country,
            category: val.category,
            start_date: val.start_date,
            notes: val.notes,
        }
    }
}

#[derive(Subcommand)]
pub enum TripCommands {
    /// Create a new trip
    #[command(alias = "c")]
    Create(CreateTripArgs),
    /// List your trips
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a trip and its steps
    #[command(alias = "s")]
    Show(IdArgs),
    /// Edit the details of a trip
    #[command(alias = "e")]
    Edit(EditTripArgs),
    /// Delete a trip permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteTripArgs),
}

/// Fields shared by every step description
#[derive(Args)]
pub struct StepDataArgs {
    /// Starting point of the day
    pub origin: String,
    /// Arrival point of the day
    pub destination: String,
    /// Whole hours of walking
    #[arg(long, default_value_t = 0)]
    pub hours: u32,
    /// Extra minutes of walking
    #[arg(long, default_value_t = 0)]
    pub minutes: u32,
    /// Walking distance in kilometres
    #[arg(long, default_value_t = 0.0)]
    pub distance: f64,
    /// Ascent in metres
    #[arg(long, default_value_t = 0)]
    pub ascent: i32,
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(short, long)]
    pub notes: Option<String>,
}

impl From<StepDataArgs> for StepData {
    fn from(val: StepDataArgs) -> Self {
        StepData {
            origin: val.origin,
            destination: val.destination,
            walking_hours: val.hours,
            walking_minutes: val.minutes,
            walking_distance: val.distance,
            ascent: val.ascent,
            description: val.description,
            notes: val.notes,
        }
    }
}

/// Insert a step at a position of a trip
///
/// Positions are 1-based. Steps at or after the position move one day later;
/// lodging stays with the day it was booked for.
#[derive(Args)]
pub struct InsertStepArgs {
    #[arg(help = "Unique identifier of the trip")]
    pub trip_id: u64,
    #[arg(help = "1-based position of the new step (one past the last step appends)")]
    pub position: u32,
    #[command(flatten)]
    pub step: StepDataArgs,
}

impl From<InsertStepArgs> for InsertStep {
    fn from(val: InsertStepArgs) -> Self {
        InsertStep {
            trip_id: val.trip_id,
            position: val.position,
            step: val.step.into(),
        }
    }
}

/// Edit the details of a step
///
/// The position of a step and its lodging cannot be edited; delete and
/// insert the step instead.
#[derive(Args)]
pub struct EditStepArgs {
    #[arg(help = "Unique identifier of the step to edit")]
    pub id: u64,
    #[arg(long)]
    pub origin: Option<String>,
    #[arg(long)]
    pub destination: Option<String>,
    #[arg(long)]
    pub hours: Option<u32>,
    #[arg(long)]
    pub minutes: Option<u32>,
    #[arg(long)]
    pub distance: Option<f64>,
    #[arg(long)]
    pub ascent: Option<i32>,
    /// New description; an empty value clears it
    #[arg(short, long)]
    pub description: Option<String>,
    /// New notes; an empty value clears them
    #[arg(short, long)]
    pub notes: Option<String>,
    /// Refuse the edit unless the step is still at this version
    #[arg(long)]
    pub expected_version: Option<u32>,
}

impl From<EditStepArgs> for EditStep {
    fn from(val: EditStepArgs) -> Self {
        EditStep {
            id: val.id,
            origin: val.origin,
            destination: val.destination,
            walking_hours: val.hours,
            walking_minutes: val.minutes,
            walking_distance: val.distance,
            ascent: val.ascent,
            description: val.description,
            notes: val.notes,
            expected_version: val.expected_version,
        }
    }
}

#[derive(Subcommand)]
pub enum StepCommands {
    /// Insert a step at a position of a trip
    #[command(alias = "i")]
    Insert(InsertStepArgs),
    /// Edit the details of a step
    #[command(alias = "e")]
    Edit(EditStepArgs),
    /// Delete a step and close the gap in the numbering
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
    /// Show a step with its day thread and review
    #[command(alias = "s")]
    Show(IdArgs),
    /// List the steps of a trip
    #[command(aliases = ["l", "ls"])]
    List(IdArgs),
    /// Show the time-ordered events of a step's day
    #[command(alias = "t")]
    Thread(IdArgs),
}

/// Fields shared by leisure activities and transport legs
#[derive(Args)]
pub struct ActivityDetailsArgs {
    /// Name of the activity
    pub name: String,
    /// Start, e.g. 2024-06-02T09:30
    #[arg(short, long)]
    pub start: DateTime,
    #[arg(short, long, default_value_t = 0.0)]
    pub price: f64,
    #[arg(short, long)]
    pub notes: Option<String>,
}

#[derive(Args)]
pub struct LeisureKindArgs {
    /// Kind of activity (aquatic, sports, musical, cultural, nature,
    /// gastronomy, other)
    #[arg(short = 'k', long, default_value = "other")]
    pub category: LeisureCategory,
    #[arg(short, long)]
    pub address: Option<String>,
}

impl From<LeisureKindArgs> for ActivityKind {
    fn from(val: LeisureKindArgs) -> Self {
        ActivityKind::Leisure {
            category: val.category,
            address: val.address,
        }
    }
}

#[derive(Args)]
pub struct TransportKindArgs {
    /// Means of transport (boat, plane, train, tram, metro, bus, car,
    /// hitchhiking, bike, foot)
    #[arg(short, long)]
    pub mode: TransportMode,
    /// Duration of the leg in minutes
    #[arg(short, long)]
    pub duration: u32,
    #[arg(short, long)]
    pub company: Option<String>,
    #[arg(long)]
    pub to: Option<String>,
}

impl From<TransportKindArgs> for ActivityKind {
    fn from(val: TransportKindArgs) -> Self {
        ActivityKind::Transport {
            mode: val.mode,
            company: val.company,
            destination: val.to,
            duration_minutes: val.duration,
        }
    }
}

fn new_activity(step_id: u64, details: ActivityDetailsArgs, kind: ActivityKind) -> CreateActivity {
    CreateActivity {
        step_id,
        name: details.name,
        start_time: details.start,
        price: details.price,
        notes: details.notes,
        kind,
    }
}

fn activity_update(id: u64, details: ActivityDetailsArgs, kind: ActivityKind) -> UpdateActivity {
    UpdateActivity {
        id,
        name: details.name,
        start_time: details.start,
        price: details.price,
        notes: details.notes,
        kind,
    }
}

/// Add a leisure activity to a step
#[derive(Args)]
pub struct LeisureArgs {
    #[arg(help = "Unique identifier of the step")]
    pub step_id: u64,
    #[command(flatten)]
    pub details: ActivityDetailsArgs,
    #[command(flatten)]
    pub kind: LeisureKindArgs,
}

impl From<LeisureArgs> for CreateActivity {
    fn from(val: LeisureArgs) -> Self {
        new_activity(val.step_id, val.details, val.kind.into())
    }
}

/// Add a transport leg to a step
#[derive(Args)]
pub struct TransportArgs {
    #[arg(help = "Unique identifier of the step")]
    pub step_id: u64,
    #[command(flatten)]
    pub details: ActivityDetailsArgs,
    #[command(flatten)]
    pub kind: TransportKindArgs,
}

impl From<TransportArgs> for CreateActivity {
    fn from(val: TransportArgs) -> Self {
        new_activity(val.step_id, val.details, val.kind.into())
    }
}

/// Replace the details of a leisure activity
#[derive(Args)]
pub struct EditLeisureArgs {
    #[arg(help = "Unique identifier of the activity")]
    pub id: u64,
    #[command(flatten)]
    pub details: ActivityDetailsArgs,
    #[command(flatten)]
    pub kind: LeisureKindArgs,
}

impl From<EditLeisureArgs> for UpdateActivity {
    fn from(val: EditLeisureArgs) -> Self {
        activity_update(val.id, val.details, val.kind.into())
    }
}

/// Replace the details of a transport leg
#[derive(Args)]
pub struct EditTransportArgs {
    #[arg(help = "Unique identifier of the activity")]
    pub id: u64,
    #[command(flatten)]
    pub details: ActivityDetailsArgs,
    #[command(flatten)]
    pub kind: TransportKindArgs,
}

impl From<EditTransportArgs> for UpdateActivity {
    fn from(val: EditTransportArgs) -> Self {
        activity_update(val.id, val.details, val.kind.into())
    }
}

#[derive(Subcommand)]
pub enum ActivityCommands {
    /// Add a leisure activity to a step
    Leisure(LeisureArgs),
    /// Add a transport leg to a step
    Transport(TransportArgs),
    /// Replace the details of a leisure activity
    EditLeisure(EditLeisureArgs),
    /// Replace the details of a transport leg
    EditTransport(EditTransportArgs),
    /// Remove an activity
    #[command(aliases = ["d", "rm"])]
    Remove(IdArgs),
}

/// Book an accommodation for one or more nights of a trip
#[derive(Args)]
pub struct AddLodgingArgs {
    #[arg(help = "Unique identifier of the trip")]
    pub trip_id: u64,
    pub name: String,
    /// Check-in, e.g. 2024-06-02T17:00
    #[arg(long)]
    pub check_in: DateTime,
    /// Check-out, e.g. 2024-06-03T09:00
    #[arg(long)]
    pub check_out: DateTime,
    #[arg(short, long, default_value_t = 0.0)]
    pub price: f64,
}

impl From<AddLodgingArgs> for CreateAccommodation {
    fn from(val: AddLodgingArgs) -> Self {
        CreateAccommodation {
            trip_id: val.trip_id,
            name: val.name,
            check_in: val.check_in,
            check_out: val.check_out,
            price: val.price,
        }
    }
}

#[derive(Subcommand)]
pub enum LodgingCommands {
    /// Book an accommodation
    #[command(alias = "a")]
    Add(AddLodgingArgs),
    /// Cancel an accommodation
    #[command(aliases = ["d", "rm"])]
    Remove(IdArgs),
    /// List the accommodations of a trip
    #[command(aliases = ["l", "ls"])]
    List(IdArgs),
}

/// Rating and notes of a review
#[derive(Args)]
pub struct ReviewArgs {
    #[arg(help = "Unique identifier of the reviewed step")]
    pub step_id: u64,
    /// Rating between 1 and 5
    #[arg(short, long)]
    pub rating: u8,
    /// Notes only you can see
    #[arg(long)]
    pub private_notes: Option<String>,
    /// Notes shown to visitors
    #[arg(long)]
    pub public_notes: Option<String>,
}

impl From<ReviewArgs> for ReviewDraft {
    fn from(val: ReviewArgs) -> Self {
        ReviewDraft {
            step_id: val.step_id,
            rating: val.rating,
            private_notes: val.private_notes,
            public_notes: val.public_notes,
        }
    }
}

/// Attach an uploaded image to a review
#[derive(Args)]
pub struct AddImageArgs {
    #[arg(help = "Unique identifier of the reviewed step")]
    pub review_id: u64,
    pub url: String,
}

impl From<AddImageArgs> for AddImage {
    fn from(val: AddImageArgs) -> Self {
        AddImage {
            review_id: val.review_id,
            url: val.url,
        }
    }
}

#[derive(Subcommand)]
pub enum ReviewCommands {
    /// Write the review of a step
    #[command(alias = "w")]
    Write(ReviewArgs),
    /// Replace the rating and notes of a review
    #[command(alias = "e")]
    Edit(ReviewArgs),
    /// Show the review of a step
    #[command(alias = "s")]
    Show(IdArgs),
    /// Attach an image to a review
    AddImage(AddImageArgs),
    /// Detach an image from its review
    RemoveImage(IdArgs),
}

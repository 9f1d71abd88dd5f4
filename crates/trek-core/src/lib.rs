//! Core library for the TrekStories itinerary engine.
//!
//! A trip is an ordered sequence of day steps. This crate keeps that sequence
//! contiguous while steps are inserted and deleted, carries lodging over to
//! the step that occupies each position, merges a step's activities and
//! lodging events into a chronological day thread, and refuses operations
//! that would orphan dependent records or act on somebody else's trip.
//!
//! - [`itinerary`]: async facade used by front ends
//! - [`db`]: SQLite persistence, one transaction per mutation
//! - [`sequencer`], [`thread`], [`guard`]: the pure rules the store applies
//! - [`display`]: markdown and JSON output
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use jiff::civil::date;
//! use trek_core::{
//!     ItineraryBuilder, StaticIdentity,
//!     models::TripCategory,
//!     params::{CreateTrip, Id},
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let itinerary = ItineraryBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .with_identity(StaticIdentity::new("alice"))
//!     .build()
//!     .await?;
//!
//! let trip = itinerary
//!     .create_trip(&CreateTrip {
//!         title: "West Highland Way".to_string(),
//!         country: "Scotland".to_string(),
//!         category: TripCategory::Mountainous,
//!         start_date: date(2024, 9, 7),
//!         notes: None,
//!     })
//!     .await?;
//! println!("{trip}");
//!
//! for step in &itinerary.get_steps(&Id { id: trip.id }).await? {
//!     println!("Day {}: {}", step.sequence_no, step.destination);
//! }
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod guard;
pub mod identity;
pub mod itinerary;
pub mod models;
pub mod params;
pub mod sequencer;
pub mod thread;

// Re-export commonly used types
pub use db::Database;
pub use display::{ActivityThread, CreateResult, DeleteResult, Steps, Trips, UpdateResult};
pub use error::{ConflictReason, Entity, ErrorKind, Result, TrekError};
pub use identity::{Identity, StaticIdentity};
pub use itinerary::{Itinerary, ItineraryBuilder};
pub use models::{Accommodation, Activity, ActivityKind, Review, Step, StepOverview, Trip};
pub use thread::{build_day_thread, ThreadEntry, ThreadSource};

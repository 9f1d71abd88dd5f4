//! High-level async API over the itinerary store.
//!
//! [`Itinerary`] is the entry point for front ends. Every operation opens its
//! own connection on tokio's blocking pool, resolves the acting user through
//! the configured [`Identity`], and delegates to [`Database`], which performs
//! the ownership checks and writes in a single transaction.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Itinerary    │    │    Database     │    │  guard /        │
//! │ (trip_ops,      │───▶│ (*_queries,     │───▶│  sequencer /    │
//! │  step_ops, ...) │    │  one tx each)   │    │  thread         │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use jiff::civil::date;
//! use trek_core::{
//!     ItineraryBuilder, StaticIdentity,
//!     models::TripCategory,
//!     params::{CreateTrip, InsertStep, StepData},
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let itinerary = ItineraryBuilder::new()
//!     .with_database_path(Some("trek.db"))
//!     .with_identity(StaticIdentity::new("alice"))
//!     .build()
//!     .await?;
//!
//! let trip = itinerary
//!     .create_trip(&CreateTrip {
//!         title: "Kerry Way".to_string(),
//!         country: "Ireland".to_string(),
//!         category: TripCategory::Coastal,
//!         start_date: date(2024, 5, 4),
//!         notes: None,
//!     })
//!     .await?;
//!
//! let step = itinerary
//!     .insert_step(&InsertStep {
//!         trip_id: trip.id,
//!         position: 1,
//!         step: StepData {
//!             origin: "Killarney".to_string(),
//!             destination: "Black Valley".to_string(),
//!             ..Default::default()
//!         },
//!     })
//!     .await?;
//! assert_eq!(step.sequence_no, 1);
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, sync::Arc};

use tokio::task;

use crate::{
    db::Database,
    error::{Result, TrekError},
    identity::Identity,
};

pub mod builder;
pub mod journal_ops;
pub mod step_ops;
pub mod trip_ops;

#[cfg(test)]
mod tests;

pub use builder::ItineraryBuilder;

/// Main interface for managing trips and everything attached to them.
pub struct Itinerary {
    pub(crate) db_path: PathBuf,
    pub(crate) identity: Arc<dyn Identity>,
}

impl Itinerary {
    pub(crate) fn new(db_path: PathBuf, identity: Arc<dyn Identity>) -> Self {
        Self { db_path, identity }
    }

    /// The acting user, required by every mutation.
    fn actor(&self) -> Result<String> {
        self.identity
            .acting_user()
            .ok_or(TrekError::Unauthenticated)
    }

    /// Runs `operation` against a fresh connection on the blocking pool.
    async fn with_database<T, F>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            operation(&mut db)
        })
        .await
        .map_err(|e| TrekError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}

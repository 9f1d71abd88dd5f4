//! Trip model definition and related functionality.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{Step, TripCategory};

/// A multi-day itinerary owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    /// Unique identifier for the trip
    pub id: u64,

    /// Title of the trip, unique per owner
    pub title: String,

    /// Country the trip takes place in
    pub country: String,

    /// Landscape category
    pub category: TripCategory,

    /// Calendar date of the first step
    pub start_date: Date,

    /// Free-text notes
    pub notes: Option<String>,

    /// Identifier of the owning user
    pub owner: String,

    /// Sum of activity and accommodation prices
    pub total_cost: f64,

    /// Sum of the walking distance of every step
    pub total_walking_distance: f64,

    /// Timestamp when the trip was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the trip was last modified (UTC)
    pub updated_at: Timestamp,

    /// Steps ordered by sequence number (empty unless loaded)
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Trip {
    /// Number of days of the trip, one per step.
    pub fn duration(&self) -> usize {
        self.steps.len()
    }
}

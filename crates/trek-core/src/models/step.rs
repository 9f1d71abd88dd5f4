//! Step model definition and related functionality.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// One ordered leg of a trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    /// Unique identifier for the step
    pub id: u64,

    /// ID of the parent trip
    pub trip_id: u64,

    /// Position of the step within the trip (1-based)
    pub sequence_no: u32,

    /// Starting point of the leg
    pub origin: String,

    /// Arrival point of the leg
    pub destination: String,

    /// Walking time in hours
    pub walking_time: f64,

    /// Walking distance in kilometres
    pub walking_distance: f64,

    /// Ascent in metres
    pub ascent: i32,

    pub description: Option<String>,

    pub notes: Option<String>,

    /// Lodging occupied after completing this step
    pub accommodation_id: Option<u64>,

    /// Calendar date the step takes place on
    pub date: Date,

    /// Row version, bumped on every edit
    pub version: u32,
}

impl Step {
    /// Splits the walking time into whole hours and minutes.
    pub fn walking_hours_minutes(&self) -> (u32, u32) {
        let total_minutes = (self.walking_time * 60.0).round().max(0.0) as u32;
        (total_minutes / 60, total_minutes % 60)
    }
}

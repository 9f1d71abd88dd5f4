//! Accommodation model definition.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

/// A stay spanning one or more consecutive steps of a trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Accommodation {
    pub id: u64,

    /// ID of the trip the stay belongs to
    pub trip_id: u64,

    pub name: String,

    pub check_in: DateTime,

    pub check_out: DateTime,

    pub price: f64,
}

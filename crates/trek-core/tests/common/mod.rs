#![allow(dead_code)]

use jiff::civil::{date, Date};
use tempfile::NamedTempFile;
use trek_core::{
    models::{Step, TripCategory},
    params::{CreateAccommodation, CreateTrip, InsertStep, StepData},
    Database,
};

pub const OWNER: &str = "alice";

/// First day of every test trip.
pub fn start_date() -> Date {
    date(2024, 6, 1)
}

/// Helper function to create a temporary database for testing
pub fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

pub fn trip_params(title: &str) -> CreateTrip {
    CreateTrip {
        title: title.to_string(),
        country: "France".to_string(),
        category: TripCategory::Mountainous,
        start_date: start_date(),
        notes: None,
    }
}

pub fn step_data(origin: &str) -> StepData {
    StepData {
        origin: origin.to_string(),
        destination: format!("{origin} Refuge"),
        walking_hours: 6,
        walking_minutes: 30,
        walking_distance: 15.0,
        ascent: 950,
        description: None,
        notes: None,
    }
}

/// Inserts a step named `origin` at `position`.
pub fn insert_at(db: &mut Database, trip_id: u64, position: u32, origin: &str) -> Step {
    db.insert_step(
        OWNER,
        &InsertStep {
            trip_id,
            position,
            step: step_data(origin),
        },
    )
    .expect("Failed to insert step")
}

/// Creates a trip owned by [`OWNER`] with steps named `Day 1` to `Day N`.
pub fn trip_with_steps(db: &mut Database, count: u32) -> u64 {
    let trip = db
        .create_trip(OWNER, &trip_params("Tour du Mont Blanc"))
        .expect("Failed to create trip");
    for position in 1..=count {
        insert_at(db, trip.id, position, &format!("Day {position}"));
    }
    trip.id
}

/// An accommodation with check-in on trip day `day` and check-out the
/// morning after.
pub fn one_night(trip_id: u64, day: i8, price: f64) -> CreateAccommodation {
    let night = date(2024, 6, day);
    CreateAccommodation {
        trip_id,
        name: format!("Gîte {day}"),
        check_in: night.at(17, 0, 0, 0),
        check_out: date(2024, 6, day + 1).at(8, 0, 0, 0),
        price,
    }
}

/// Origins of a trip's steps in sequence order.
pub fn origins(db: &Database, trip_id: u64) -> Vec<String> {
    db.get_steps(trip_id)
        .expect("Failed to get steps")
        .into_iter()
        .map(|s| s.origin)
        .collect()
}

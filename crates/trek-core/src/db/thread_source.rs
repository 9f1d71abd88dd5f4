//! [`ThreadSource`] backed by the database.

use jiff::civil::Date;

use crate::{
    error::Result,
    models::{Accommodation, Activity},
    thread::ThreadSource,
};

impl ThreadSource for super::Database {
    fn activities_for_step(&self, step_id: u64) -> Result<Vec<Activity>> {
        self.get_step_activities(step_id)
    }

    fn transports_for_trip(&self, trip_id: u64) -> Result<Vec<Activity>> {
        self.get_trip_transports(trip_id)
    }

    fn accommodation(&self, accommodation_id: u64) -> Result<Option<Accommodation>> {
        self.get_accommodation(accommodation_id)
    }

    fn accommodations_checking_out(&self, trip_id: u64, date: Date) -> Result<Vec<Accommodation>> {
        self.get_accommodations_checking_out(trip_id, date)
    }
}

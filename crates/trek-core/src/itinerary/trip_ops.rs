//! Trip operations for the Itinerary.

use super::Itinerary;
use crate::{
    display::Trips,
    error::Result,
    models::Trip,
    params::{CreateTrip, Id, UpdateTrip},
};

impl Itinerary {
    /// Creates a trip owned by the acting user.
    pub async fn create_trip(&self, params: &CreateTrip) -> Result<Trip> {
        let owner = self.actor()?;
        let params = params.clone();
        self.with_database(move |db| db.create_trip(&owner, &params))
            .await
    }

    /// Lists the acting user's trips, most recent first.
    pub async fn list_trips(&self) -> Result<Trips> {
        let owner = self.actor()?;
        let trips = self
            .with_database(move |db| db.list_trips(&owner))
            .await?;
        Ok(Trips(trips))
    }

    /// Updates the details of a trip owned by the acting user.
    pub async fn update_trip(&self, params: &UpdateTrip) -> Result<Trip> {
        let actor = self.actor()?;
        let params = params.clone();
        self.with_database(move |db| db.update_trip(&actor, &params))
            .await
    }

    /// Retrieves a trip with its steps.
    pub async fn get_trip(&self, params: &Id) -> Result<Option<Trip>> {
        let trip_id = params.id;
        self.with_database(move |db| db.get_trip(trip_id)).await
    }

    /// Deletes a trip with all its steps, activities, lodging and reviews.
    pub async fn delete_trip(&self, params: &Id) -> Result<Trip> {
        let actor = self.actor()?;
        let trip_id = params.id;
        self.with_database(move |db| db.delete_trip(&actor, trip_id))
            .await
    }
}

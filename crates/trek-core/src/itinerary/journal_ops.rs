//! Activity, lodging and review operations for the Itinerary.

use super::Itinerary;
use crate::{
    error::Result,
    models::{Accommodation, Activity, Image, Review},
    params::{AddImage, CreateAccommodation, CreateActivity, Id, ReviewDraft, UpdateActivity},
};

impl Itinerary {
    /// Adds a leisure activity or transport leg to a step.
    pub async fn add_activity(&self, params: &CreateActivity) -> Result<Activity> {
        let actor = self.actor()?;
        let params = params.clone();
        self.with_database(move |db| db.add_activity(&actor, &params))
            .await
    }

    /// Replaces the contents of an activity.
    pub async fn update_activity(&self, params: &UpdateActivity) -> Result<Activity> {
        let actor = self.actor()?;
        let params = params.clone();
        self.with_database(move |db| db.update_activity(&actor, &params))
            .await
    }

    /// Removes an activity from its step.
    pub async fn remove_activity(&self, params: &Id) -> Result<Activity> {
        let actor = self.actor()?;
        let activity_id = params.id;
        self.with_database(move |db| db.remove_activity(&actor, activity_id))
            .await
    }

    /// Adds an accommodation to a trip, linking the steps it covers.
    pub async fn add_accommodation(&self, params: &CreateAccommodation) -> Result<Accommodation> {
        let actor = self.actor()?;
        let params = params.clone();
        self.with_database(move |db| db.add_accommodation(&actor, &params))
            .await
    }

    /// Removes an accommodation and detaches it from its steps.
    pub async fn remove_accommodation(&self, params: &Id) -> Result<Accommodation> {
        let actor = self.actor()?;
        let accommodation_id = params.id;
        self.with_database(move |db| db.remove_accommodation(&actor, accommodation_id))
            .await
    }

    /// Lists the accommodations of a trip.
    pub async fn list_accommodations(&self, params: &Id) -> Result<Vec<Accommodation>> {
        let trip_id = params.id;
        self.with_database(move |db| db.get_trip_accommodations(trip_id))
            .await
    }

    /// Writes the review of a step.
    pub async fn write_review(&self, params: &ReviewDraft) -> Result<Review> {
        let actor = self.actor()?;
        let params = params.clone();
        self.with_database(move |db| db.create_review(&actor, &params))
            .await
    }

    /// Replaces the rating and notes of a step's review.
    pub async fn edit_review(&self, params: &ReviewDraft) -> Result<Review> {
        let actor = self.actor()?;
        let params = params.clone();
        self.with_database(move |db| db.update_review(&actor, &params))
            .await
    }

    /// Retrieves the review of a step.
    pub async fn get_review(&self, params: &Id) -> Result<Option<Review>> {
        let step_id = params.id;
        self.with_database(move |db| db.get_review(step_id)).await
    }

    /// Attaches an image to a review.
    pub async fn add_image(&self, params: &AddImage) -> Result<Image> {
        let actor = self.actor()?;
        let params = params.clone();
        self.with_database(move |db| db.add_image(&actor, &params))
            .await
    }

    /// Detaches an image from its review.
    pub async fn remove_image(&self, params: &Id) -> Result<Image> {
        let actor = self.actor()?;
        let image_id = params.id;
        self.with_database(move |db| db.remove_image(&actor, image_id))
            .await
    }
}

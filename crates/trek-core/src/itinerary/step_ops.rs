//! Step operations for the Itinerary.

use jiff::Zoned;

use super::Itinerary;
use crate::{
    display::{ActivityThread, Steps},
    error::{Entity, Result, TrekError},
    models::{Step, StepOverview},
    params::{EditStep, Id, InsertStep},
    thread::build_day_thread,
};

impl Itinerary {
    /// Inserts a step at the requested position of a trip.
    pub async fn insert_step(&self, params: &InsertStep) -> Result<Step> {
        let actor = self.actor()?;
        let params = params.clone();
        self.with_database(move |db| db.insert_step(&actor, &params))
            .await
    }

    /// Updates the non-ordering fields of a step.
    pub async fn edit_step(&self, params: &EditStep) -> Result<Step> {
        let actor = self.actor()?;
        let params = params.clone();
        self.with_database(move |db| db.edit_step(&actor, &params))
            .await
    }

    /// Deletes a step and returns the ID of its trip.
    pub async fn delete_step(&self, params: &Id) -> Result<u64> {
        let actor = self.actor()?;
        let step_id = params.id;
        self.with_database(move |db| db.delete_step(&actor, step_id))
            .await
    }

    /// Retrieves a single step by its ID.
    pub async fn get_step(&self, params: &Id) -> Result<Option<Step>> {
        let step_id = params.id;
        self.with_database(move |db| db.get_step(step_id)).await
    }

    /// Retrieves all steps of a trip in sequence order.
    pub async fn get_steps(&self, params: &Id) -> Result<Steps> {
        let trip_id = params.id;
        let steps = self
            .with_database(move |db| db.get_steps(trip_id))
            .await?;
        Ok(Steps(steps))
    }

    /// Builds the day thread of a step.
    pub async fn day_thread(&self, params: &Id) -> Result<ActivityThread> {
        let step_id = params.id;
        let thread = self
            .with_database(move |db| {
                let step = db.get_step(step_id)?.ok_or(TrekError::NotFound {
                    entity: Entity::Step,
                    id: step_id,
                })?;
                build_day_thread(&*db, &step)
            })
            .await?;
        Ok(ActivityThread(thread))
    }

    /// Assembles the page model of a step for the acting user, who may be
    /// anonymous.
    pub async fn step_overview(&self, params: &Id) -> Result<StepOverview> {
        let viewer = self.identity.acting_user();
        let step_id = params.id;
        let today = Zoned::now().date();
        self.with_database(move |db| db.get_step_overview(step_id, viewer.as_deref(), today))
            .await
    }
}

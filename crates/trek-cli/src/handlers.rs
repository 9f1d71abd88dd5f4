//! Dispatches parsed commands to the itinerary and renders their results.

use std::fmt::Display;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use trek_core::{
    display::{CreateResult, DeleteResult, UpdateResult},
    params::{EditStep, Id, UpdateTrip},
    Entity, Itinerary, TrekError,
};

use crate::{
    cli::{ActivityCommands, LodgingCommands, ReviewCommands, StepCommands, TripCommands},
    renderer::TerminalRenderer,
};

/// Command handler bound to one itinerary and one renderer.
pub struct Cli {
    itinerary: Itinerary,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(itinerary: Itinerary, renderer: TerminalRenderer) -> Self {
        Self {
            itinerary,
            renderer,
        }
    }

    fn emit<T: Serialize>(&self, value: &T, markdown: impl Display) -> Result<()> {
        self.renderer.emit(value, markdown)
    }

    pub async fn handle_trip_command(&self, command: TripCommands) -> Result<()> {
        match command {
            TripCommands::Create(args) => {
                let trip = self.itinerary.create_trip(&args.into()).await?;
                self.emit(&trip, CreateResult::new(trip.clone()))
            }
            TripCommands::List => self.list_trips().await,
            TripCommands::Show(args) => {
                let id: Id = args.into();
                let trip = self
                    .itinerary
                    .get_trip(&id)
                    .await?
                    .ok_or(TrekError::NotFound {
                        entity: Entity::Trip,
                        id: id.id,
                    })?;
                self.emit(&trip, &trip)
            }
            TripCommands::Edit(args) => {
                let params: UpdateTrip = args.into();
                let changes = describe_trip_changes(&params);
                let trip = self.itinerary.update_trip(&params).await?;
                self.emit(&trip, UpdateResult::with_changes(trip.clone(), changes))
            }
            TripCommands::Delete(args) => {
                if !args.confirm {
                    bail!(
                        "Deleting trip {} removes all its steps, activities, lodging and \
                         reviews. Re-run with --confirm to proceed.",
                        args.id
                    );
                }
                let trip = self.itinerary.delete_trip(&Id { id: args.id }).await?;
                self.emit(&trip, DeleteResult::new(trip.clone()))
            }
        }
    }

    /// Lists the acting user's trips.
    pub async fn list_trips(&self) -> Result<()> {
        let trips = self.itinerary.list_trips().await?;
        self.emit(&trips, &trips)
    }

    pub async fn handle_step_command(&self, command: StepCommands) -> Result<()> {
        match command {
            StepCommands::Insert(args) => {
                let step = self.itinerary.insert_step(&args.into()).await?;
                self.emit(&step, CreateResult::new(step.clone()))
            }
            StepCommands::Edit(args) => {
                let params: EditStep = args.into();
                let changes = describe_step_changes(&params);
                let step = self.itinerary.edit_step(&params).await?;
                self.emit(&step, UpdateResult::with_changes(step.clone(), changes))
            }
            StepCommands::Delete(args) => {
                let id: Id = args.into();
                let step = self
                    .itinerary
                    .get_step(&id)
                    .await?
                    .ok_or(TrekError::NotFound {
                        entity: Entity::Step,
                        id: id.id,
                    })?;
                self.itinerary.delete_step(&id).await?;
                self.emit(&step, DeleteResult::new(step.clone()))
            }
            StepCommands::Show(args) => {
                let overview = self.itinerary.step_overview(&args.into()).await?;
                self.emit(&overview, &overview)
            }
            StepCommands::List(args) => {
                let steps = self.itinerary.get_steps(&args.into()).await?;
                self.emit(&steps, &steps)
            }
            StepCommands::Thread(args) => {
                let thread = self.itinerary.day_thread(&args.into()).await?;
                self.emit(&thread, &thread)
            }
        }
    }

    pub async fn handle_activity_command(&self, command: ActivityCommands) -> Result<()> {
        let activity = match command {
            ActivityCommands::Leisure(args) => {
                let activity = self.itinerary.add_activity(&args.into()).await?;
                return self.emit(&activity, CreateResult::new(activity.clone()));
            }
            ActivityCommands::Transport(args) => {
                let activity = self.itinerary.add_activity(&args.into()).await?;
                return self.emit(&activity, CreateResult::new(activity.clone()));
            }
            ActivityCommands::EditLeisure(args) => {
                let activity = self.itinerary.update_activity(&args.into()).await?;
                return self.emit(&activity, UpdateResult::new(activity.clone()));
            }
            ActivityCommands::EditTransport(args) => {
                let activity = self.itinerary.update_activity(&args.into()).await?;
                return self.emit(&activity, UpdateResult::new(activity.clone()));
            }
            ActivityCommands::Remove(args) => self.itinerary.remove_activity(&args.into()).await?,
        };
        self.emit(&activity, DeleteResult::new(activity.clone()))
    }

    pub async fn handle_lodging_command(&self, command: LodgingCommands) -> Result<()> {
        match command {
            LodgingCommands::Add(args) => {
                let stay = self.itinerary.add_accommodation(&args.into()).await?;
                self.emit(&stay, CreateResult::new(stay.clone()))
            }
            LodgingCommands::Remove(args) => {
                let stay = self.itinerary.remove_accommodation(&args.into()).await?;
                self.emit(&stay, DeleteResult::new(stay.clone()))
            }
            LodgingCommands::List(args) => {
                let stays = self.itinerary.list_accommodations(&args.into()).await?;
                let markdown = if stays.is_empty() {
                    "No accommodations found.\n".to_string()
                } else {
                    stays.iter().map(|stay| format!("{stay}\n")).collect()
                };
                self.emit(&stays, markdown)
            }
        }
    }

    pub async fn handle_review_command(&self, command: ReviewCommands) -> Result<()> {
        match command {
            ReviewCommands::Write(args) => {
                let review = self.itinerary.write_review(&args.into()).await?;
                self.emit(&review, CreateResult::new(review.clone()))
            }
            ReviewCommands::Edit(args) => {
                let review = self.itinerary.edit_review(&args.into()).await?;
                self.emit(&review, UpdateResult::new(review.clone()))
            }
            ReviewCommands::Show(args) => {
                let id: Id = args.into();
                let review = self
                    .itinerary
                    .get_review(&id)
                    .await?
                    .with_context(|| format!("Step {} has not been reviewed yet", id.id))?;
                self.emit(&review, &review)
            }
            ReviewCommands::AddImage(args) => {
                let image = self.itinerary.add_image(&args.into()).await?;
                self.emit(&image, CreateResult::new(image.clone()))
            }
            ReviewCommands::RemoveImage(args) => {
                let image = self.itinerary.remove_image(&args.into()).await?;
                self.emit(&image, DeleteResult::new(image.clone()))
            }
        }
    }
}

fn describe_trip_changes(params: &UpdateTrip) -> Vec<String> {
    let mut changes = Vec::new();
    if let Some(title) = &params.title {
        changes.push(format!("Title set to '{title}'"));
    }
    if let Some(country) = &params.country {
        changes.push(format!("Country set to '{country}'"));
    }
    if let Some(category) = params.category {
        changes.push(format!("Category set to {category}"));
    }
    if let Some(start_date) = params.start_date {
        changes.push(format!("Start date moved to {start_date}"));
    }
    match params.notes.as_deref().map(str::trim) {
        Some("") => changes.push("Cleared notes".to_string()),
        Some(_) => changes.push("Updated notes".to_string()),
        None => {}
    }
    changes
}

/// Human-readable list of the fields an edit touches.
fn describe_step_changes(params: &EditStep) -> Vec<String> {
    let mut changes = Vec::new();
    if let Some(origin) = &params.origin {
        changes.push(format!("Origin set to '{origin}'"));
    }
    if let Some(destination) = &params.destination {
        changes.push(format!("Destination set to '{destination}'"));
    }
    if params.walking_hours.is_some() || params.walking_minutes.is_some() {
        changes.push("Updated walking time".to_string());
    }
    if let Some(distance) = params.walking_distance {
        changes.push(format!("Distance set to {distance} km"));
    }
    if let Some(ascent) = params.ascent {
        changes.push(format!("Ascent set to {ascent} m"));
    }
    match params.description.as_deref().map(str::trim) {
        Some("") => changes.push("Cleared description".to_string()),
        Some(_) => changes.push("Updated description".to_string()),
        None => {}
    }
    match params.notes.as_deref().map(str::trim) {
        Some("") => changes.push("Cleared notes".to_string()),
        Some(_) => changes.push("Updated notes".to_string()),
        None => {}
    }
    changes
}

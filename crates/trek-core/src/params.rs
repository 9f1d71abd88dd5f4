//! Parameter structures for itinerary operations.
//!
//! These structures are shared by every front end (the CLI today) and carry
//! no framework-specific derives. Each one knows how to validate itself; the
//! database layer calls `validate()` before it opens a transaction, so a
//! rejected request never touches the store.
//!
//! Validation messages are written for the traveller and are surfaced
//! verbatim in [`TrekError::InvalidInput`].

use jiff::civil::{Date, DateTime};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TrekError},
    models::{ActivityKind, TripCategory},
};

const TITLE_MAX: usize = 50;
const PLACE_MAX: usize = 20;
const TEXT_MAX: usize = 500;
const REVIEW_TEXT_MAX: usize = 2000;

fn too_long(value: Option<&str>, max: usize) -> bool {
    value.is_some_and(|v| v.chars().count() > max)
}

fn check_place(field: &str, value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() || value.chars().count() > PLACE_MAX {
        return Err(TrekError::invalid_input(field).with_reason(message));
    }
    Ok(())
}

pub(crate) fn check_walking_time(hours: u32, minutes: u32) -> Result<()> {
    if hours > 24 || (hours == 24 && minutes > 0) {
        return Err(TrekError::invalid_input("walking_time_hours")
            .with_reason("Please enter a value between 0 and 24 hours."));
    }
    if minutes > 59 {
        return Err(TrekError::invalid_input("walking_time_minutes")
            .with_reason("Please enter a maximum of 59 minutes."));
    }
    Ok(())
}

fn check_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(TrekError::invalid_input("title")
            .with_reason("Please give your trip a descriptive title."));
    }
    if title.chars().count() > TITLE_MAX {
        return Err(TrekError::invalid_input("title")
            .with_reason("Title cannot be longer than 50 characters."));
    }
    Ok(())
}

fn check_country(country: &str) -> Result<()> {
    if country.trim().is_empty() {
        return Err(TrekError::invalid_input("country").with_reason("Please specify a country."));
    }
    Ok(())
}

fn check_trip_notes(notes: Option<&str>) -> Result<()> {
    if too_long(notes, TEXT_MAX) {
        return Err(TrekError::invalid_input("notes")
            .with_reason("Notes are limited to 500 characters maximum."));
    }
    Ok(())
}

fn check_activity(name: &str, price: f64, notes: Option<&str>) -> Result<()> {
    if name.trim().is_empty() {
        return Err(TrekError::invalid_input("name").with_reason("Please give the activity a name."));
    }
    check_non_negative("price", price, "Please enter a positive price.")?;
    if too_long(notes, TEXT_MAX) {
        return Err(TrekError::invalid_input("notes")
            .with_reason("Notes are limited to 500 characters."));
    }
    Ok(())
}

fn check_non_negative(field: &str, value: f64, message: &str) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(TrekError::invalid_input(field).with_reason(message));
    }
    Ok(())
}

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a new trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTrip {
    /// Title of the trip (required, at most 50 characters)
    pub title: String,
    /// Country the trip takes place in (required)
    pub country: String,
    pub category: TripCategory,
    /// Date of the first step
    pub start_date: Date,
    /// Optional notes, at most 500 characters
    pub notes: Option<String>,
}

impl CreateTrip {
    /// Validate the trip fields.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jiff::civil::date;
    /// use trek_core::{models::TripCategory, params::CreateTrip, TrekError};
    ///
    /// let params = CreateTrip {
    ///     title: "".to_string(),
    ///     country: "Ireland".to_string(),
    ///     category: TripCategory::Forest,
    ///     start_date: date(2015, 4, 12),
    ///     notes: None,
    /// };
    /// match params.validate() {
    ///     Err(TrekError::InvalidInput { reason, .. }) => {
    ///         assert_eq!(reason, "Please give your trip a descriptive title.")
    ///     }
    ///     other => panic!("unexpected: {other:?}"),
    /// }
    /// ```
    pub fn validate(&self) -> Result<()> {
        check_title(&self.title)?;
        check_country(&self.country)?;
        check_trip_notes(self.notes.as_deref())
    }
}

/// Partial update of a trip's own fields.
///
/// Steps, lodging and totals are absent: they change through their own
/// operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTrip {
    /// Trip ID to update (required)
    pub id: u64,
    pub title: Option<String>,
    pub country: Option<String>,
    pub category: Option<TripCategory>,
    /// Moves every step date along with it
    pub start_date: Option<Date>,
    /// New notes; a blank value clears them
    pub notes: Option<String>,
}

impl UpdateTrip {
    /// Whether the request carries any field to change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.country.is_none()
            && self.category.is_none()
            && self.start_date.is_none()
            && self.notes.is_none()
    }

    /// Validate the provided fields.
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            check_title(title)?;
        }
        if let Some(country) = &self.country {
            check_country(country)?;
        }
        check_trip_notes(self.notes.as_deref())
    }
}

/// Fields describing a step, used when inserting one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepData {
    /// Starting point (required, at most 20 characters)
    pub origin: String,
    /// Arrival point (required, at most 20 characters)
    pub destination: String,
    /// Whole hours of walking, 0 to 24
    #[serde(default)]
    pub walking_hours: u32,
    /// Extra minutes of walking, 0 to 59
    #[serde(default)]
    pub walking_minutes: u32,
    /// Walking distance in kilometres
    #[serde(default)]
    pub walking_distance: f64,
    /// Ascent in metres
    #[serde(default)]
    pub ascent: i32,
    pub description: Option<String>,
    pub notes: Option<String>,
}

impl StepData {
    /// Validate the step fields.
    pub fn validate(&self) -> Result<()> {
        check_place(
            "origin",
            &self.origin,
            "Enter a starting point of maximum 20 characters.",
        )?;
        check_place(
            "destination",
            &self.destination,
            "Enter an arrival point of maximum 20 characters.",
        )?;
        check_walking_time(self.walking_hours, self.walking_minutes)?;
        check_non_negative(
            "walking_distance",
            self.walking_distance,
            "Please enter a positive distance.",
        )?;
        if too_long(self.description.as_deref(), TEXT_MAX) {
            return Err(TrekError::invalid_input("description")
                .with_reason("The description cannot be longer than 500 characters."));
        }
        if too_long(self.notes.as_deref(), TEXT_MAX) {
            return Err(TrekError::invalid_input("notes")
                .with_reason("Notes are limited to 500 characters."));
        }
        Ok(())
    }

    /// Walking time in fractional hours.
    pub fn walking_time(&self) -> f64 {
        f64::from(self.walking_hours) + f64::from(self.walking_minutes) / 60.0
    }
}

/// Parameters for inserting a step at a given position of a trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsertStep {
    /// ID of the trip to insert into
    pub trip_id: u64,
    /// Sequence number the new step takes (1-based)
    pub position: u32,
    /// Step contents
    #[serde(flatten)]
    pub step: StepData,
}

/// Partial update of a step's non-ordering fields.
///
/// Sequence number and lodging are absent: only insertion and
/// deletion move those.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditStep {
    /// Step ID to update (required)
    pub id: u64,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub walking_hours: Option<u32>,
    pub walking_minutes: Option<u32>,
    pub walking_distance: Option<f64>,
    pub ascent: Option<i32>,
    pub description: Option<String>,
    pub notes: Option<String>,
    /// Version the caller last read; the edit is refused if the stored row
    /// has moved on
    pub expected_version: Option<u32>,
}

impl EditStep {
    /// Whether the request carries any field to change.
    pub fn is_empty(&self) -> bool {
        self.origin.is_none()
            && self.destination.is_none()
            && self.walking_hours.is_none()
            && self.walking_minutes.is_none()
            && self.walking_distance.is_none()
            && self.ascent.is_none()
            && self.description.is_none()
            && self.notes.is_none()
    }

    /// Validate the provided fields.
    pub fn validate(&self) -> Result<()> {
        if let Some(origin) = &self.origin {
            check_place(
                "origin",
                origin,
                "Enter a starting point of maximum 20 characters.",
            )?;
        }
        if let Some(destination) = &self.destination {
            check_place(
                "destination",
                destination,
                "Enter an arrival point of maximum 20 characters.",
            )?;
        }
        check_walking_time(
            self.walking_hours.unwrap_or(0),
            self.walking_minutes.unwrap_or(0),
        )?;
        if let Some(distance) = self.walking_distance {
            check_non_negative(
                "walking_distance",
                distance,
                "Please enter a positive distance.",
            )?;
        }
        if too_long(self.description.as_deref(), TEXT_MAX) {
            return Err(TrekError::invalid_input("description")
                .with_reason("The description cannot be longer than 500 characters."));
        }
        if too_long(self.notes.as_deref(), TEXT_MAX) {
            return Err(TrekError::invalid_input("notes")
                .with_reason("Notes are limited to 500 characters."));
        }
        Ok(())
    }
}

/// Parameters for adding a leisure activity or transport leg to a step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateActivity {
    /// ID of the step the activity belongs to
    pub step_id: u64,
    pub name: String,
    pub start_time: DateTime,
    #[serde(default)]
    pub price: f64,
    pub notes: Option<String>,
    #[serde(flatten)]
    pub kind: ActivityKind,
}

impl CreateActivity {
    /// Validate the activity fields.
    pub fn validate(&self) -> Result<()> {
        check_activity(&self.name, self.price, self.notes.as_deref())
    }
}

/// Replacement contents of an existing activity.
///
/// The activity stays on its step, and a leisure activity cannot become a
/// transport leg or the other way round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateActivity {
    /// Activity ID to update (required)
    pub id: u64,
    pub name: String,
    pub start_time: DateTime,
    #[serde(default)]
    pub price: f64,
    pub notes: Option<String>,
    #[serde(flatten)]
    pub kind: ActivityKind,
}

impl UpdateActivity {
    /// Validate the activity fields.
    pub fn validate(&self) -> Result<()> {
        check_activity(&self.name, self.price, self.notes.as_deref())
    }
}

/// Parameters for adding an accommodation to a trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccommodation {
    /// ID of the trip the stay belongs to
    pub trip_id: u64,
    pub name: String,
    pub check_in: DateTime,
    pub check_out: DateTime,
    #[serde(default)]
    pub price: f64,
}

impl CreateAccommodation {
    /// Validate the accommodation fields.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TrekError::invalid_input("name")
                .with_reason("Please enter the name of the accommodation."));
        }
        if self.check_out <= self.check_in {
            return Err(TrekError::invalid_input("check_out")
                .with_reason("Check-out must be after check-in."));
        }
        check_non_negative("price", self.price, "Please enter a positive price.")
    }
}

/// Contents of a review, used both to write and to edit one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewDraft {
    /// ID of the reviewed step
    pub step_id: u64,
    /// Rating between 1 and 5
    pub rating: u8,
    pub private_notes: Option<String>,
    pub public_notes: Option<String>,
}

impl ReviewDraft {
    /// Validate the review fields.
    pub fn validate(&self) -> Result<()> {
        if !(1..=5).contains(&self.rating) {
            return Err(TrekError::invalid_input("rating")
                .with_reason("Please assign a rating between 1 and 5."));
        }
        if too_long(self.private_notes.as_deref(), REVIEW_TEXT_MAX) {
            return Err(TrekError::invalid_input("private_notes")
                .with_reason("Notes are limited to 2000 characters maximum."));
        }
        if too_long(self.public_notes.as_deref(), REVIEW_TEXT_MAX) {
            return Err(TrekError::invalid_input("public_notes")
                .with_reason("Notes are limited to 2000 characters maximum."));
        }
        Ok(())
    }
}

/// Parameters for attaching an uploaded image to a review.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddImage {
    pub review_id: u64,
    /// Location of the already uploaded blob
    pub url: String,
}

impl AddImage {
    /// Validate the image fields.
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(TrekError::invalid_input("url")
                .with_reason("Please browse for a file to upload."));
        }
        Ok(())
    }
}

//! Result wrapper types for displaying operation outcomes.
//!
//! Create, update and delete results share one message layout. Resources opt
//! in through [`Described`], which names their kind and a short label.

use std::fmt;

use crate::models::{Accommodation, Activity, Image, Review, Step, Trip};

/// A resource that can be announced in an operation result.
pub trait Described {
    /// Lowercase resource kind, such as `trip`.
    const KIND: &'static str;

    fn id(&self) -> u64;

    /// Short human label used in deletion messages.
    fn label(&self) -> String;
}

impl Described for Trip {
    const KIND: &'static str = "trip";

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> String {
        self.title.clone()
    }
}

impl Described for Step {
    const KIND: &'static str = "step";

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> String {
        format!("{} → {}", self.origin, self.destination)
    }
}

impl Described for Activity {
    const KIND: &'static str = "activity";

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

impl Described for Accommodation {
    const KIND: &'static str = "accommodation";

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

impl Described for Review {
    const KIND: &'static str = "review";

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> String {
        format!("step {}", self.step_id())
    }
}

impl Described for Image {
    const KIND: &'static str = "image";

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> String {
        self.url.clone()
    }
}

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use trek_core::{display::CreateResult, models::Image};
///
/// let image = Image {
///     id: 4,
///     review_id: 2,
///     url: "https://img.example/ridge.jpg".to_string(),
/// };
///
/// let output = CreateResult::new(image).to_string();
/// assert!(output.starts_with("Created image with ID: 4"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl<T: Described + fmt::Display> fmt::Display for CreateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created {} with ID: {}", T::KIND, self.resource.id())?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations.
///
/// Tracks the list of changed fields so the user sees what was modified.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl<T: Described + fmt::Display> fmt::Display for UpdateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated {} with ID: {}", T::KIND, self.resource.id())?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl<T: Described> fmt::Display for DeleteResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted {} '{}' (ID: {})",
            T::KIND,
            self.resource.label(),
            self.resource.id()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_result_lists_changes() {
        let review = Review {
            id: 7,
            rating: 4,
            private_notes: None,
            public_notes: None,
            images: vec![],
        };
        let output =
            UpdateResult::with_changes(review.clone(), vec!["Rating set to 4".to_string()])
                .to_string();
        assert!(output.starts_with("Updated review with ID: 7"));
        assert!(output.contains("- Rating set to 4"));

        let output = DeleteResult::new(review).to_string();
        assert_eq!(output, "Deleted review 'step 7' (ID: 7)\n");
    }
}

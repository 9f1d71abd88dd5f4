//! Review and image models.

use serde::{Deserialize, Serialize};

/// The traveller's review of a step. Shares its identifier with the step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    /// Identifier, equal to the reviewed step's ID
    pub id: u64,

    /// Rating between 1 and 5
    pub rating: u8,

    pub private_notes: Option<String>,

    pub public_notes: Option<String>,

    /// Attached images in upload order
    #[serde(default)]
    pub images: Vec<Image>,
}

impl Review {
    /// ID of the reviewed step.
    pub fn step_id(&self) -> u64 {
        self.id
    }
}

/// An uploaded picture attached to a review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Image {
    pub id: u64,
    pub review_id: u64,
    /// Location of the stored blob
    pub url: String,
}

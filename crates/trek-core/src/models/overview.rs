//! Read model for a single step page.

use serde::{Deserialize, Serialize};

use super::{Review, Step};
use crate::thread::ThreadEntry;

/// A step with everything shown alongside it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepOverview {
    pub step: Step,

    pub trip_title: String,

    /// IDs of every step of the trip in sequence order, for paging
    pub sibling_ids: Vec<u64>,

    pub review: Option<Review>,

    /// Number of images attached to the review
    pub photo_count: usize,

    /// The step's day thread, time-ordered
    pub thread: Vec<ThreadEntry>,

    /// Whether the viewer owns the trip and may modify the step
    pub editable: bool,

    /// Whether the step's date has been reached, so it can be reviewed
    pub reviewable: bool,
}

impl StepOverview {
    /// IDs of the previous and next steps, if any.
    pub fn neighbours(&self) -> (Option<u64>, Option<u64>) {
        let Some(index) = self.sibling_ids.iter().position(|&id| id == self.step.id) else {
            return (None, None);
        };
        let previous = index.checked_sub(1).map(|i| self.sibling_ids[i]);
        let next = self.sibling_ids.get(index + 1).copied();
        (previous, next)
    }
}

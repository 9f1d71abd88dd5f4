//! Activity model: leisure activities and transport legs attached to a step.

use jiff::{civil::DateTime, SignedDuration};
use serde::{Deserialize, Serialize};

use super::{LeisureCategory, TransportMode};

/// Something planned during a step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: u64,

    /// ID of the step the activity belongs to
    pub step_id: u64,

    pub name: String,

    pub start_time: DateTime,

    pub price: f64,

    pub notes: Option<String>,

    /// Variant-specific payload
    #[serde(flatten)]
    pub kind: ActivityKind,
}

/// Variant payload of an [`Activity`], tagged by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ActivityKind {
    Leisure {
        category: LeisureCategory,
        address: Option<String>,
    },
    Transport {
        mode: TransportMode,
        company: Option<String>,
        destination: Option<String>,
        /// Travel time in minutes
        duration_minutes: u32,
    },
}

impl ActivityKind {
    /// Database discriminant for the variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Leisure { .. } => "leisure",
            ActivityKind::Transport { .. } => "transport",
        }
    }
}

impl Activity {
    /// Whether this activity is a transport leg.
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ActivityKind::Transport { .. })
    }

    /// Arrival time of a transport leg: start time plus duration. `None` for
    /// leisure activities.
    pub fn arrival_time(&self) -> Option<DateTime> {
        match self.kind {
            ActivityKind::Transport {
                duration_minutes, ..
            } => Some(
                self.start_time
                    .saturating_add(SignedDuration::from_mins(i64::from(duration_minutes))),
            ),
            ActivityKind::Leisure { .. } => None,
        }
    }
}

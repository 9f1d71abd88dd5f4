//! Markdown formatting for domain models and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly. Collections and
//! operation outcomes go through small wrapper types so the same data can be
//! framed differently depending on context.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │   Formatted     │
//! │  (Trip, Step)   │───▶│ & Result Types  │───▶│    Output       │
//! │                 │    │                 │    │ (Terminal/JSON) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`collections`]: Trips, Steps and ActivityThread
//! - [`results`]: CreateResult, UpdateResult and DeleteResult
//! - [`datetime`]: Date and time formatting
//! - [`models`]: Display implementations for domain models

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

use serde::Serialize;

pub use collections::{ActivityThread, Steps, Trips};
pub use datetime::{ClockTime, LocalDateTime, LongDate};
pub use results::{CreateResult, DeleteResult, Described, UpdateResult};

use crate::error::Result;

/// Serializes any result as pretty-printed JSON for machine consumers.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

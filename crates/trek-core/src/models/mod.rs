//! Data models for trips, steps and the records hanging off them.
//!
//! Display implementations for these models live in
//! [`crate::display::models`] so presentation stays apart from data.
//!
//! # Examples
//!
//! ```rust
//! use trek_core::models::{TransportMode, TripCategory};
//!
//! assert_eq!("forest".parse::<TripCategory>(), Ok(TripCategory::Forest));
//! assert_eq!(TransportMode::Hitchhiking.as_str(), "hitchhiking");
//! ```

pub mod accommodation;
pub mod activity;
pub mod category;
pub mod overview;
pub mod review;
pub mod step;
pub mod trip;

#[cfg(test)]
mod tests;

pub use accommodation::Accommodation;
pub use activity::{Activity, ActivityKind};
pub use category::{LeisureCategory, TransportMode, TripCategory};
pub use overview::StepOverview;
pub use review::{Image, Review};
pub use step::Step;
pub use trip::Trip;

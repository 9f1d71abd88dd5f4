//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper handles the empty case and otherwise formats its items with
//! their own `Display` implementation.

use std::{fmt, ops::Index};

use serde::Serialize;

use crate::{
    models::{Step, Trip},
    thread::ThreadEntry,
};

/// Declares slice-like accessors and iteration for a newtype over `Vec`.
macro_rules! vec_wrapper {
    ($name:ident, $item:ty) => {
        impl $name {
            /// Check if the collection is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Number of items in the collection.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Get a reference to the item at the given index.
            pub fn get(&self, index: usize) -> Option<&$item> {
                self.0.get(index)
            }

            /// Get an iterator over the items.
            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $name {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<Self::Item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }
    };
}

/// Newtype wrapper for displaying a list of trips as summaries.
///
/// # Examples
///
/// ```rust
/// use trek_core::display::Trips;
///
/// let trips = Trips(vec![]);
/// assert_eq!(format!("{trips}"), "No trips found.\n");
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Trips(pub Vec<Trip>);

vec_wrapper!(Trips, Trip);

impl fmt::Display for Trips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No trips found.");
        }
        for trip in &self.0 {
            writeln!(f, "## {} (ID: {})", trip.title, trip.id)?;
            writeln!(f)?;
            writeln!(
                f,
                "- **{}**, {}, from {}",
                trip.country, trip.category, trip.start_date
            )?;
            writeln!(
                f,
                "- **{} days**, {:.1} km, {:.2} total",
                trip.duration(),
                trip.total_walking_distance,
                trip.total_cost
            )?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying the ordered steps of a trip.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Steps(pub Vec<Step>);

vec_wrapper!(Steps, Step);

impl fmt::Display for Steps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No steps found.");
        }
        for step in &self.0 {
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying a step's day thread.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ActivityThread(pub Vec<ThreadEntry>);

vec_wrapper!(ActivityThread, ThreadEntry);

impl fmt::Display for ActivityThread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "Nothing planned for this day.");
        }
        for entry in &self.0 {
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collections() {
        assert_eq!(Steps(vec![]).to_string(), "No steps found.\n");
        assert_eq!(
            ActivityThread(vec![]).to_string(),
            "Nothing planned for this day.\n"
        );
        assert!(Trips(vec![]).is_empty());
    }
}

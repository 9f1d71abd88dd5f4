//! Enumerations for trip categories, leisure categories and transport modes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Declares a lowercase string-backed enum with `as_str`, `ALL` and
/// `FromStr`.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Convert to database string representation
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(format!(
                        "Invalid {}: {s}. Expected one of: {}",
                        $label,
                        [$($text),+].join(", ")
                    )),
                }
            }
        }
    };
}

string_enum! {
    /// Landscape a trip mostly takes place in.
    TripCategory, "trip category" {
        Coastal => "coastal",
        Mountainous => "mountainous",
        Forest => "forest",
        Desert => "desert",
        Cultural => "cultural",
        Unclassifiable => "unclassifiable",
    }
}

string_enum! {
    /// Kind of leisure activity.
    LeisureCategory, "leisure category" {
        Aquatic => "aquatic",
        Sports => "sports",
        Musical => "musical",
        Cultural => "cultural",
        Nature => "nature",
        Gastronomy => "gastronomy",
        Other => "other",
    }
}

string_enum! {
    /// Means of transport for a transport leg.
    TransportMode, "transport mode" {
        Boat => "boat",
        Plane => "plane",
        Train => "train",
        Tram => "tram",
        Metro => "metro",
        Bus => "bus",
        Car => "car",
        Hitchhiking => "hitchhiking",
        Bike => "bike",
        Foot => "foot",
    }
}

impl Default for TripCategory {
    fn default() -> Self {
        TripCategory::Unclassifiable
    }
}

impl Default for LeisureCategory {
    fn default() -> Self {
        LeisureCategory::Other
    }
}

//! Display implementations for domain models.
//!
//! Every implementation emits markdown for the CLI's terminal renderer.

use std::fmt;

use super::datetime::{ClockTime, LocalDateTime, LongDate};
use crate::{
    models::{
        Accommodation, Activity, ActivityKind, Image, LeisureCategory, Review, Step, StepOverview,
        TransportMode, Trip, TripCategory,
    },
    thread::{IconCategory, SourceKind, ThreadEntry},
};

impl fmt::Display for TripCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LeisureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IconCategory {
    /// Glyph shown in front of a thread entry.
    pub fn glyph(&self) -> &'static str {
        match self {
            IconCategory::Lodging => "🛏",
            IconCategory::Leisure(category) => match category {
                LeisureCategory::Aquatic => "🏊",
                LeisureCategory::Sports => "🚴",
                LeisureCategory::Musical => "🎵",
                LeisureCategory::Cultural => "🏛",
                LeisureCategory::Nature => "🌲",
                LeisureCategory::Gastronomy => "🍴",
                LeisureCategory::Other => "⭐",
            },
            IconCategory::Transport(mode) => match mode {
                TransportMode::Boat => "⛴",
                TransportMode::Plane => "✈",
                TransportMode::Train => "🚆",
                TransportMode::Tram => "🚋",
                TransportMode::Metro => "🚇",
                TransportMode::Bus => "🚌",
                TransportMode::Car => "🚗",
                TransportMode::Hitchhiking => "👍",
                TransportMode::Bike => "🚲",
                TransportMode::Foot => "🚶",
            },
        }
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        writeln!(f, "- Country: {}", self.country)?;
        writeln!(f, "- Category: {}", self.category)?;
        writeln!(f, "- Starts: {}", LongDate(&self.start_date))?;
        writeln!(f, "- Duration: {} days", self.duration())?;
        writeln!(f, "- Walking distance: {:.1} km", self.total_walking_distance)?;
        writeln!(f, "- Total cost: {:.2}", self.total_cost)?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(notes) = &self.notes {
            writeln!(f)?;
            writeln!(f, "{notes}")?;
        }

        if self.steps.is_empty() {
            writeln!(f, "\nNo steps in this trip.")?;
        } else {
            writeln!(f, "\n## Steps")?;
            writeln!(f)?;
            for step in &self.steps {
                write!(f, "{step}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hours, minutes) = self.walking_hours_minutes();
        writeln!(
            f,
            "### Day {}: {} → {} (ID: {})",
            self.sequence_no, self.origin, self.destination, self.id
        )?;
        writeln!(f)?;
        writeln!(f, "- Date: {}", LongDate(&self.date))?;
        writeln!(
            f,
            "- Walking: {hours}h{minutes:02}, {:.1} km, {} m ascent",
            self.walking_distance, self.ascent
        )?;
        if let Some(accommodation_id) = self.accommodation_id {
            writeln!(f, "- Accommodation: {accommodation_id}")?;
        }
        writeln!(f)?;

        if let Some(description) = &self.description {
            writeln!(f, "{description}")?;
            writeln!(f)?;
        }
        if let Some(notes) = &self.notes {
            writeln!(f, "#### Notes")?;
            writeln!(f)?;
            writeln!(f, "{notes}")?;
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;
        writeln!(f, "- Step: {}", self.step_id)?;
        writeln!(f, "- Starts: {}", self.start_time)?;
        writeln!(f, "- Price: {:.2}", self.price)?;
        match &self.kind {
            ActivityKind::Leisure { category, address } => {
                writeln!(f, "- Category: {category}")?;
                if let Some(address) = address {
                    writeln!(f, "- Address: {address}")?;
                }
            }
            ActivityKind::Transport {
                mode,
                company,
                destination,
                duration_minutes,
            } => {
                writeln!(f, "- Mode: {mode}")?;
                if let Some(company) = company {
                    writeln!(f, "- Company: {company}")?;
                }
                if let Some(destination) = destination {
                    writeln!(f, "- Destination: {destination}")?;
                }
                writeln!(f, "- Duration: {duration_minutes} min")?;
                if let Some(arrival) = self.arrival_time() {
                    writeln!(f, "- Arrives: {arrival}")?;
                }
            }
        }
        if let Some(notes) = &self.notes {
            writeln!(f)?;
            writeln!(f, "{notes}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Accommodation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;
        writeln!(f, "- Check-in: {}", self.check_in)?;
        writeln!(f, "- Check-out: {}", self.check_out)?;
        writeln!(f, "- Price: {:.2}", self.price)
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- [{}] {}", self.id, self.url)
    }
}

impl fmt::Display for Review {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## Review of step {} {}",
            self.step_id(),
            "★".repeat(usize::from(self.rating))
        )?;
        writeln!(f)?;
        if let Some(notes) = &self.public_notes {
            writeln!(f, "{notes}")?;
            writeln!(f)?;
        }
        if let Some(notes) = &self.private_notes {
            writeln!(f, "#### Private notes")?;
            writeln!(f)?;
            writeln!(f, "{notes}")?;
            writeln!(f)?;
        }
        if !self.images.is_empty() {
            writeln!(f, "#### Images")?;
            writeln!(f)?;
            for image in &self.images {
                write!(f, "{image}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ThreadEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- **{}** {} {}",
            ClockTime(&self.start_time),
            self.icon.glyph(),
            self.display_name
        )?;
        if let Some(arrival) = &self.arrival_time {
            write!(f, " (arrives {})", ClockTime(arrival))?;
        }
        if self.price > 0.0 && self.source != SourceKind::LodgingCheckOut {
            write!(f, ", {:.2}", self.price)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for StepOverview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.trip_title)?;
        writeln!(f)?;
        write!(f, "{}", self.step)?;

        writeln!(f, "## Day thread")?;
        writeln!(f)?;
        if self.thread.is_empty() {
            writeln!(f, "Nothing planned for this day.")?;
        } else {
            for entry in &self.thread {
                write!(f, "{entry}")?;
            }
        }
        writeln!(f)?;

        match (&self.review, self.reviewable) {
            (Some(review), _) => write!(f, "{review}")?,
            (None, true) => writeln!(f, "Not reviewed yet.")?,
            (None, false) => writeln!(f, "This step can be reviewed once it has taken place.")?,
        }

        let (previous, next) = self.neighbours();
        writeln!(f)?;
        writeln!(
            f,
            "Step {} of {} · previous: {} · next: {}",
            self.step.sequence_no,
            self.sibling_ids.len(),
            previous.map_or_else(|| "none".to_string(), |id| id.to_string()),
            next.map_or_else(|| "none".to_string(), |id| id.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_thread_entry_display() {
        let entry = ThreadEntry {
            id: 3,
            start_time: date(2024, 6, 3).at(11, 0, 0, 0),
            display_name: "Coach".to_string(),
            price: 25.0,
            icon: IconCategory::Transport(TransportMode::Bus),
            source: SourceKind::TransportDeparture,
            arrival_time: Some(date(2024, 6, 3).at(13, 30, 0, 0)),
        };
        let output = entry.to_string();
        assert!(output.contains("**11:00**"));
        assert!(output.contains("Coach (arrives 13:30), 25.00"));
    }

    #[test]
    fn test_review_stars() {
        let review = Review {
            id: 9,
            rating: 3,
            private_notes: None,
            public_notes: Some("Windy ridge".to_string()),
            images: vec![],
        };
        let output = review.to_string();
        assert!(output.contains("## Review of step 9 ★★★"));
        assert!(output.contains("Windy ridge"));
    }
}

//! Per-day activity thread assembly.
//!
//! A thread is a read-time projection of everything that happens on a step's
//! date: leisure activities, transport departures and arrivals, and lodging
//! check-in/check-out. It is never persisted and is rebuilt from current data
//! on every read.
//!
//! # Assembly order
//!
//! 1. Leisure activities of the step, at their start time
//! 2. Transport legs of the step (departures), carrying their arrival time
//! 3. Transport legs of any step of the trip arriving on the step's date,
//!    except those already emitted as departures
//! 4. Check-in of the step's lodging, when it happens on the step's date
//! 5. Check-out of a trip lodging on the step's date (at most one)
//! 6. Stable sort by time of day only
//!
//! Sorting ignores the date component: stored timestamps for a single day's
//! events may carry an unrelated date (an overnight arrival, for example).

use std::collections::HashSet;

use jiff::civil::{Date, DateTime};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    models::{Accommodation, Activity, ActivityKind, LeisureCategory, Step, TransportMode},
};

/// Read access needed to assemble a thread.
///
/// Implemented by [`crate::Database`]; tests implement it over in-memory
/// fixtures.
pub trait ThreadSource {
    /// All activities (both variants) attached to a step, ordered by start
    /// time.
    fn activities_for_step(&self, step_id: u64) -> Result<Vec<Activity>>;

    /// Transport legs attached to any step of a trip.
    fn transports_for_trip(&self, trip_id: u64) -> Result<Vec<Activity>>;

    /// A single accommodation by ID.
    fn accommodation(&self, accommodation_id: u64) -> Result<Option<Accommodation>>;

    /// Distinct accommodations referenced by steps of `trip_id` whose
    /// check-out falls on `date`.
    fn accommodations_checking_out(&self, trip_id: u64, date: Date) -> Result<Vec<Accommodation>>;
}

/// Where a thread entry comes from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    LeisureActivity,
    TransportDeparture,
    TransportArrival,
    LodgingCheckIn,
    LodgingCheckOut,
}

impl SourceKind {
    /// Whether the entry comes from a transport leg.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SourceKind::TransportDeparture | SourceKind::TransportArrival
        )
    }
}

/// Icon family for an entry; front ends map it to a glyph.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IconCategory {
    Leisure(LeisureCategory),
    Transport(TransportMode),
    Lodging,
}

/// One event in a day's thread.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThreadEntry {
    /// ID of the activity or accommodation the entry stands for
    pub id: u64,
    /// When the event happens (arrival time for arrivals)
    pub start_time: DateTime,
    pub display_name: String,
    pub price: f64,
    pub icon: IconCategory,
    pub source: SourceKind,
    /// Derived arrival time, set on departures only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<DateTime>,
}

/// Builds the time-ordered thread of events on `step`'s date.
pub fn build_day_thread<S>(source: &S, step: &Step) -> Result<Vec<ThreadEntry>>
where
    S: ThreadSource + ?Sized,
{
    let step_activities = source.activities_for_step(step.id)?;
    let mut thread = Vec::new();

    for activity in &step_activities {
        if let ActivityKind::Leisure { category, .. } = activity.kind {
            thread.push(ThreadEntry {
                id: activity.id,
                start_time: activity.start_time,
                display_name: activity.name.clone(),
                price: activity.price,
                icon: IconCategory::Leisure(category),
                source: SourceKind::LeisureActivity,
                arrival_time: None,
            });
        }
    }

    let mut departures = HashSet::new();
    for activity in &step_activities {
        if let ActivityKind::Transport { mode, .. } = activity.kind {
            departures.insert(activity.id);
            thread.push(ThreadEntry {
                id: activity.id,
                start_time: activity.start_time,
                display_name: activity.name.clone(),
                price: activity.price,
                icon: IconCategory::Transport(mode),
                source: SourceKind::TransportDeparture,
                arrival_time: activity.arrival_time(),
            });
        }
    }

    for activity in source.transports_for_trip(step.trip_id)? {
        if departures.contains(&activity.id) {
            continue;
        }
        let (ActivityKind::Transport { mode, .. }, Some(arrival)) =
            (&activity.kind, activity.arrival_time())
        else {
            continue;
        };
        if arrival.date() != step.date {
            continue;
        }
        thread.push(ThreadEntry {
            id: activity.id,
            start_time: arrival,
            display_name: format!("Arrival {}", activity.name),
            price: activity.price,
            icon: IconCategory::Transport(*mode),
            source: SourceKind::TransportArrival,
            arrival_time: None,
        });
    }

    if let Some(accommodation_id) = step.accommodation_id {
        match source.accommodation(accommodation_id)? {
            Some(stay) if stay.check_in.date() == step.date => {
                thread.push(lodging_entry(&stay, SourceKind::LodgingCheckIn));
            }
            Some(_) => {}
            None => warn!(
                "Step {} references missing accommodation {}",
                step.id, accommodation_id
            ),
        }
    }

    let checking_out = source.accommodations_checking_out(step.trip_id, step.date)?;
    if let Some(stay) = pick_check_out(step, checking_out) {
        thread.push(lodging_entry(&stay, SourceKind::LodgingCheckOut));
    }

    thread.sort_by_key(|entry| entry.start_time.time());
    Ok(thread)
}

/// Chooses the single check-out to show when several distinct lodgings end
/// on the same date: the earliest check-out wins, ties go to the lowest ID.
fn pick_check_out(step: &Step, mut candidates: Vec<Accommodation>) -> Option<Accommodation> {
    candidates.sort_by_key(|stay| (stay.check_out, stay.id));
    candidates.dedup_by_key(|stay| stay.id);
    if candidates.len() > 1 {
        warn!(
            "{} accommodations check out on {} (trip {}); showing only '{}'",
            candidates.len(),
            step.date,
            step.trip_id,
            candidates[0].name
        );
    }
    candidates.into_iter().next()
}

fn lodging_entry(stay: &Accommodation, source: SourceKind) -> ThreadEntry {
    let (start_time, label) = match source {
        SourceKind::LodgingCheckIn => (stay.check_in, "Check-In at"),
        _ => (stay.check_out, "Check-Out at"),
    };
    ThreadEntry {
        id: stay.id,
        start_time,
        display_name: format!("{label} {}", stay.name),
        price: stay.price,
        icon: IconCategory::Lodging,
        source,
        arrival_time: None,
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[derive(Default)]
    struct Fixture {
        steps: Vec<Step>,
        activities: Vec<Activity>,
        accommodations: Vec<Accommodation>,
    }

    impl ThreadSource for Fixture {
        fn activities_for_step(&self, step_id: u64) -> Result<Vec<Activity>> {
            let mut found: Vec<Activity> = self
                .activities
                .iter()
                .filter(|a| a.step_id == step_id)
                .cloned()
                .collect();
            found.sort_by_key(|a| (a.start_time, a.id));
            Ok(found)
        }

        fn transports_for_trip(&self, trip_id: u64) -> Result<Vec<Activity>> {
            let step_ids: HashSet<u64> = self
                .steps
                .iter()
                .filter(|s| s.trip_id == trip_id)
                .map(|s| s.id)
                .collect();
            Ok(self
                .activities
                .iter()
                .filter(|a| a.is_transport() && step_ids.contains(&a.step_id))
                .cloned()
                .collect())
        }

        fn accommodation(&self, accommodation_id: u64) -> Result<Option<Accommodation>> {
            Ok(self
                .accommodations
                .iter()
                .find(|a| a.id == accommodation_id)
                .cloned())
        }

        fn accommodations_checking_out(
            &self,
            trip_id: u64,
            date: Date,
        ) -> Result<Vec<Accommodation>> {
            let linked: HashSet<u64> = self
                .steps
                .iter()
                .filter(|s| s.trip_id == trip_id)
                .filter_map(|s| s.accommodation_id)
                .collect();
            Ok(self
                .accommodations
                .iter()
                .filter(|a| linked.contains(&a.id) && a.check_out.date() == date)
                .cloned()
                .collect())
        }
    }

    fn step(id: u64, sequence_no: u32, day: i8, accommodation_id: Option<u64>) -> Step {
        Step {
            id,
            trip_id: 1,
            sequence_no,
            origin: "A".to_string(),
            destination: "B".to_string(),
            walking_time: 0.0,
            walking_distance: 0.0,
            ascent: 0,
            description: None,
            notes: None,
            accommodation_id,
            date: date(2024, 6, day),
            version: 1,
        }
    }

    fn leisure(id: u64, step_id: u64, name: &str, at: DateTime) -> Activity {
        Activity {
            id,
            step_id,
            name: name.to_string(),
            start_time: at,
            price: 10.0,
            notes: None,
            kind: ActivityKind::Leisure {
                category: LeisureCategory::Cultural,
                address: None,
            },
        }
    }

    fn transport(id: u64, step_id: u64, name: &str, at: DateTime, minutes: u32) -> Activity {
        Activity {
            id,
            step_id,
            name: name.to_string(),
            start_time: at,
            price: 25.0,
            notes: None,
            kind: ActivityKind::Transport {
                mode: TransportMode::Bus,
                company: None,
                destination: None,
                duration_minutes: minutes,
            },
        }
    }

    fn stay(id: u64, check_in: DateTime, check_out: DateTime) -> Accommodation {
        Accommodation {
            id,
            trip_id: 1,
            name: format!("Hotel {id}"),
            check_in,
            check_out,
            price: 80.0,
        }
    }

    fn names(thread: &[ThreadEntry]) -> Vec<&str> {
        thread.iter().map(|e| e.display_name.as_str()).collect()
    }

    #[test]
    fn test_day_thread_orders_by_time_of_day() {
        let day = date(2024, 6, 3);
        let fixture = Fixture {
            steps: vec![step(1, 1, 1, None), step(2, 2, 2, Some(50)), step(3, 3, 3, None)],
            activities: vec![
                leisure(10, 3, "Museum", day.at(9, 0, 0, 0)),
                leisure(11, 3, "Dinner", day.at(14, 0, 0, 0)),
                transport(12, 3, "Coach", day.at(11, 0, 0, 0), 150),
            ],
            accommodations: vec![stay(50, date(2024, 6, 2).at(17, 0, 0, 0), day.at(8, 0, 0, 0))],
        };

        let thread = build_day_thread(&fixture, &fixture.steps[2]).unwrap();

        assert_eq!(
            names(&thread),
            vec!["Check-Out at Hotel 50", "Museum", "Coach", "Dinner"]
        );
        assert_eq!(thread[2].source, SourceKind::TransportDeparture);
        assert_eq!(thread[2].arrival_time, Some(day.at(13, 30, 0, 0)));
        assert!(thread
            .iter()
            .all(|e| e.source != SourceKind::TransportArrival));
    }

    #[test]
    fn test_arrival_from_previous_step_is_included() {
        let fixture = Fixture {
            steps: vec![step(1, 1, 1, None), step(2, 2, 2, None)],
            activities: vec![transport(
                20,
                1,
                "Ferry",
                date(2024, 6, 1).at(22, 0, 0, 0),
                10 * 60,
            )],
            accommodations: vec![],
        };

        let thread = build_day_thread(&fixture, &fixture.steps[1]).unwrap();

        assert_eq!(names(&thread), vec!["Arrival Ferry"]);
        assert_eq!(thread[0].start_time, date(2024, 6, 2).at(8, 0, 0, 0));
        assert_eq!(thread[0].source, SourceKind::TransportArrival);
        assert_eq!(thread[0].arrival_time, None);

        let departure_day = build_day_thread(&fixture, &fixture.steps[0]).unwrap();
        assert_eq!(names(&departure_day), vec!["Ferry"]);
    }

    #[test]
    fn test_check_in_only_on_check_in_date() {
        let fixture = Fixture {
            steps: vec![step(1, 1, 1, Some(7)), step(2, 2, 2, Some(7)), step(3, 3, 3, None)],
            activities: vec![],
            accommodations: vec![stay(
                7,
                date(2024, 6, 1).at(16, 0, 0, 0),
                date(2024, 6, 3).at(10, 0, 0, 0),
            )],
        };

        let first = build_day_thread(&fixture, &fixture.steps[0]).unwrap();
        assert_eq!(names(&first), vec!["Check-In at Hotel 7"]);
        assert_eq!(first[0].icon, IconCategory::Lodging);

        let middle = build_day_thread(&fixture, &fixture.steps[1]).unwrap();
        assert!(middle.is_empty());

        let last = build_day_thread(&fixture, &fixture.steps[2]).unwrap();
        assert_eq!(names(&last), vec!["Check-Out at Hotel 7"]);
        assert_eq!(last[0].source, SourceKind::LodgingCheckOut);
    }

    #[test]
    fn test_ambiguous_check_out_picks_earliest() {
        let day = date(2024, 6, 2);
        let fixture = Fixture {
            steps: vec![step(1, 1, 1, Some(8)), step(2, 2, 2, Some(9))],
            activities: vec![],
            accommodations: vec![
                stay(8, date(2024, 6, 1).at(15, 0, 0, 0), day.at(11, 0, 0, 0)),
                stay(9, date(2024, 5, 30).at(15, 0, 0, 0), day.at(10, 0, 0, 0)),
            ],
        };

        let thread = build_day_thread(&fixture, &fixture.steps[1]).unwrap();

        let check_outs: Vec<&ThreadEntry> = thread
            .iter()
            .filter(|e| e.source == SourceKind::LodgingCheckOut)
            .collect();
        assert_eq!(check_outs.len(), 1);
        assert_eq!(check_outs[0].id, 9);
    }

    #[test]
    fn test_sort_ignores_date_component() {
        let fixture = Fixture {
            steps: vec![step(1, 1, 1, None)],
            activities: vec![
                leisure(1, 1, "Late", date(2024, 6, 1).at(20, 0, 0, 0)),
                leisure(2, 1, "Early, odd date", date(2030, 1, 1).at(7, 0, 0, 0)),
            ],
            accommodations: vec![],
        };

        let thread = build_day_thread(&fixture, &fixture.steps[0]).unwrap();
        assert_eq!(names(&thread), vec!["Early, odd date", "Late"]);
    }
}

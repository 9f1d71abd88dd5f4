//! Ownership and deletability checks shared by every mutating operation.
//!
//! These are pure functions over already-loaded records. Callers load the
//! record together with its trip owner, run the check, and only then start
//! writing, so a failed check never leaves partial changes behind.

use crate::{
    error::{ConflictReason, Entity, Result, TrekError},
    models::{Review, Step, Trip},
};

/// Resolves the record `found` for `actor`.
///
/// `found` pairs the record with the owner of its trip. Fails with
/// `NotFound` when the record is absent and `Forbidden` when the owner is
/// somebody else.
pub fn ensure_owned<T>(
    entity: Entity,
    id: u64,
    found: Option<(T, String)>,
    actor: &str,
) -> Result<T> {
    match found {
        None => Err(TrekError::NotFound { entity, id }),
        Some((_, owner)) if owner != actor => Err(TrekError::Forbidden { entity, id }),
        Some((record, _)) => Ok(record),
    }
}

/// [`ensure_owned`] for trips, which carry their owner.
pub fn ensure_owned_trip(trip_id: u64, trip: Option<Trip>, actor: &str) -> Result<Trip> {
    ensure_owned(
        Entity::Trip,
        trip_id,
        trip.map(|t| {
            let owner = t.owner.clone();
            (t, owner)
        }),
        actor,
    )
}

/// [`ensure_owned`] for steps.
pub fn ensure_owned_step(step_id: u64, found: Option<(Step, String)>, actor: &str) -> Result<Step> {
    ensure_owned(Entity::Step, step_id, found, actor)
}

/// Refuses deletion of a step that still holds a lodging reference or whose
/// review still carries images.
pub fn ensure_deletable(step: &Step, review: Option<&Review>) -> Result<()> {
    if step.accommodation_id.is_some() {
        return Err(TrekError::conflict(
            Entity::Step,
            step.id,
            ConflictReason::AccommodationLinked {
                sequence_no: step.sequence_no,
            },
        ));
    }
    if review.is_some_and(|r| !r.images.is_empty()) {
        return Err(TrekError::conflict(
            Entity::Step,
            step.id,
            ConflictReason::ReviewedWithImages {
                sequence_no: step.sequence_no,
            },
        ));
    }
    Ok(())
}

/// Refuses deletion while any later step of the trip holds a lodging
/// reference.
pub fn ensure_no_subsequent_lodging(step: &Step, siblings: &[Step]) -> Result<()> {
    let blocked = siblings
        .iter()
        .any(|s| s.sequence_no > step.sequence_no && s.accommodation_id.is_some());
    if blocked {
        return Err(TrekError::conflict(
            Entity::Step,
            step.id,
            ConflictReason::SubsequentAccommodation,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::{error::ErrorKind, models::Image};

    fn step(id: u64, sequence_no: u32, accommodation_id: Option<u64>) -> Step {
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
            date: date(2024, 6, 1),
            version: 1,
        }
    }

    fn review(image_count: u64) -> Review {
        Review {
            id: 1,
            rating: 4,
            private_notes: None,
            public_notes: None,
            images: (0..image_count)
                .map(|i| Image {
                    id: i + 1,
                    review_id: 1,
                    url: format!("https://img.example/{i}.jpg"),
                })
                .collect(),
        }
    }

    #[test]
    fn test_ensure_owned_step() {
        let found = Some((step(1, 1, None), "alice".to_string()));
        assert!(ensure_owned_step(1, found.clone(), "alice").is_ok());

        let error = ensure_owned_step(1, found, "bob").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Forbidden);

        let error = ensure_owned_step(42, None, "alice").unwrap_err();
        assert!(matches!(
            error,
            TrekError::NotFound {
                entity: Entity::Step,
                id: 42
            }
        ));
    }

    #[test]
    fn test_ensure_deletable_lodging_first() {
        let error = ensure_deletable(&step(3, 2, Some(9)), Some(&review(2))).unwrap_err();
        match error {
            TrekError::Conflict { reason, .. } => {
                assert_eq!(reason.code(), "accommodation-linked")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_ensure_deletable_review_images() {
        let error = ensure_deletable(&step(3, 2, None), Some(&review(1))).unwrap_err();
        match error {
            TrekError::Conflict { reason, .. } => {
                assert_eq!(reason, ConflictReason::ReviewedWithImages { sequence_no: 2 })
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(ensure_deletable(&step(3, 2, None), Some(&review(0))).is_ok());
        assert!(ensure_deletable(&step(3, 2, None), None).is_ok());
    }

    #[test]
    fn test_ensure_no_subsequent_lodging() {
        let siblings = vec![step(1, 1, Some(5)), step(2, 2, None), step(3, 3, None)];
        assert!(ensure_no_subsequent_lodging(&siblings[1], &siblings).is_ok());

        let siblings = vec![step(1, 1, None), step(2, 2, None), step(3, 3, Some(5))];
        let error = ensure_no_subsequent_lodging(&siblings[0], &siblings).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Conflict);
    }
}

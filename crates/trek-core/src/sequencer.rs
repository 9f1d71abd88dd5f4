//! Pure sequencing rules for a trip's steps.
//!
//! The database layer applies these inside a transaction:
//!
//! ```text
//! insert at k:   seq >= k  ->  seq + 1      (open the slot)
//!                new step  ->  seq k
//!                re-read seq >= k, apply carry_over_lodging
//! delete at k:   guard, then seq > k  ->  seq - 1
//! ```
//!
//! Lodging is kept by position rather than by step identity: after an
//! insertion every position from `k` on holds the stay it held before, and
//! the final position (which is new) holds none.

use crate::{
    error::{Result, TrekError},
    models::Step,
};

/// Checks that `position` is a valid 1-based insertion point for a trip that
/// currently has `step_count` steps (appending at `step_count + 1` is
/// allowed).
pub fn validate_position(position: u32, step_count: u32) -> Result<()> {
    if position == 0 || position > step_count + 1 {
        return Err(TrekError::invalid_input("position").with_reason(format!(
            "Position {position} is out of range. Trip has {step_count} steps, so a new step \
             can go at positions 1 to {}",
            step_count + 1
        )));
    }
    Ok(())
}

/// Computes the lodging carry-over after an insertion.
///
/// `steps` are the trip's steps with a sequence number at or after the
/// insertion point, in ascending order, as re-read after the insert. Every
/// step except the last takes the lodging currently held by the next one;
/// the last one is cleared. Returns `(step_id, accommodation_id)` for each
/// step whose lodging changes.
pub fn carry_over_lodging(steps: &[Step]) -> Vec<(u64, Option<u64>)> {
    let mut assignments: Vec<(u64, Option<u64>)> = steps
        .windows(2)
        .map(|pair| (pair[0].id, pair[1].accommodation_id))
        .collect();
    if let Some(last) = steps.last() {
        assignments.push((last.id, None));
    }

    assignments
        .into_iter()
        .zip(steps)
        .filter(|((_, new_lodging), step)| step.accommodation_id != *new_lodging)
        .map(|(assignment, _)| assignment)
        .collect()
}

/// Whether the steps' sequence numbers are exactly `1..=N`.
pub fn is_contiguous(steps: &[Step]) -> bool {
    let mut numbers: Vec<u32> = steps.iter().map(|s| s.sequence_no).collect();
    numbers.sort_unstable();
    numbers
        .iter()
        .enumerate()
        .all(|(index, &n)| n as usize == index + 1)
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

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

    #[test]
    fn test_validate_position() {
        assert!(validate_position(1, 0).is_ok());
        assert!(validate_position(4, 3).is_ok());
        assert!(validate_position(0, 3).is_err());
        assert!(validate_position(5, 3).is_err());
    }

    #[test]
    fn test_carry_over_keeps_lodging_by_position() {
        // New step 10 inserted at 2 ahead of old step 2 (lodging 7) and old step 3.
        let after_insert = vec![step(10, 2, None), step(2, 3, Some(7)), step(3, 4, None)];
        let assignments = carry_over_lodging(&after_insert);
        assert_eq!(assignments, vec![(10, Some(7)), (2, None)]);
    }

    #[test]
    fn test_carry_over_appending_changes_nothing() {
        let after_insert = vec![step(10, 4, None)];
        assert!(carry_over_lodging(&after_insert).is_empty());
        assert!(carry_over_lodging(&[]).is_empty());
    }

    #[test]
    fn test_carry_over_clears_terminal_lodging() {
        let after_insert = vec![step(10, 3, None), step(3, 4, Some(8))];
        assert_eq!(
            carry_over_lodging(&after_insert),
            vec![(10, Some(8)), (3, None)]
        );
    }

    #[test]
    fn test_is_contiguous() {
        assert!(is_contiguous(&[]));
        assert!(is_contiguous(&[step(1, 2, None), step(2, 1, None)]));
        assert!(!is_contiguous(&[step(1, 1, None), step(2, 3, None)]));
        assert!(!is_contiguous(&[step(1, 1, None), step(2, 1, None)]));
    }
}

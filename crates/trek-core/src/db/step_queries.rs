//! Step sequencing, editing and queries.

use jiff::civil::Date;
use log::debug;
use rusqlite::{params, types::Type, Connection, OptionalExtension};

use super::{parse_column, step_date};
use crate::{
    error::{ConflictReason, DatabaseResultExt, Entity, Result, TrekError},
    guard,
    models::{Step, StepOverview},
    params::{check_walking_time, EditStep, InsertStep},
    sequencer,
    thread::build_day_thread,
};

const STEP_COLUMNS: &str = "s.id, s.trip_id, s.sequence_no, s.origin, s.destination, \
                            s.walking_time, s.walking_distance, s.ascent, s.description, s.notes, \
                            s.accommodation_id, s.version, t.start_date, t.owner";
const STEP_FROM: &str = "FROM steps s JOIN trips t ON t.id = s.trip_id";

const COUNT_STEPS_SQL: &str = "SELECT COUNT(*) FROM steps WHERE trip_id = ?1";
const INSERT_STEP_SQL: &str = "INSERT INTO steps (trip_id, sequence_no, origin, destination, walking_time, walking_distance, ascent, description, notes) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
// Renumbering goes through negative values so UNIQUE (trip_id, sequence_no)
// holds after every row update.
const SHIFT_UP_SQL: &str = "UPDATE steps SET sequence_no = -(sequence_no + 1) WHERE trip_id = ?1 AND sequence_no >= ?2";
const SHIFT_DOWN_SQL: &str = "UPDATE steps SET sequence_no = -(sequence_no - 1) WHERE trip_id = ?1 AND sequence_no > ?2";
const RESTORE_SIGN_SQL: &str = "UPDATE steps SET sequence_no = -sequence_no WHERE trip_id = ?1 AND sequence_no < 0";
const SET_STEP_ACCOMMODATION_SQL: &str = "UPDATE steps SET accommodation_id = ?1 WHERE id = ?2";
const UPDATE_STEP_SQL: &str = "UPDATE steps SET origin = ?1, destination = ?2, walking_time = ?3, walking_distance = ?4, ascent = ?5, description = ?6, notes = ?7, version = version + 1 WHERE id = ?8 AND version = ?9";
const SELECT_STEP_VERSION_SQL: &str = "SELECT version FROM steps WHERE id = ?1";
const DELETE_STEP_IMAGES_SQL: &str = "DELETE FROM images WHERE review_id = ?1";
const DELETE_STEP_REVIEW_SQL: &str = "DELETE FROM reviews WHERE id = ?1";
const DELETE_STEP_ACTIVITIES_SQL: &str = "DELETE FROM activities WHERE step_id = ?1";
const DELETE_STEP_SQL: &str = "DELETE FROM steps WHERE id = ?1";

/// Replaces `current` with `update` when one is given. A blank update clears
/// the field.
fn merge_text(update: Option<&str>, current: Option<String>) -> Option<String> {
    match update {
        Some(text) if text.trim().is_empty() => None,
        Some(text) => Some(text.to_string()),
        None => current,
    }
}

impl super::Database {
    /// Constructs a Step and its trip owner from a row selected with
    /// `STEP_COLUMNS`.
    fn build_step_from_row(row: &rusqlite::Row) -> rusqlite::Result<(Step, String)> {
        let sequence_no = row.get::<_, i64>(2)? as u32;
        let start_date: Date = parse_column(row, 12)?;
        let date = step_date(start_date, sequence_no)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(12, Type::Text, Box::new(e)))?;

        let step = Step {
            id: row.get::<_, i64>(0)? as u64,
            trip_id: row.get::<_, i64>(1)? as u64,
            sequence_no,
            origin: row.get(3)?,
            destination: row.get(4)?,
            walking_time: row.get(5)?,
            walking_distance: row.get(6)?,
            ascent: row.get(7)?,
            description: row.get(8)?,
            notes: row.get(9)?,
            accommodation_id: row.get::<_, Option<i64>>(10)?.map(|id| id as u64),
            version: row.get::<_, i64>(11)? as u32,
            date,
        };
        Ok((step, row.get(13)?))
    }

    /// Loads a step together with the owner of its trip.
    pub(super) fn load_step(conn: &Connection, step_id: u64) -> Result<Option<(Step, String)>> {
        conn.query_row(
            &format!("SELECT {STEP_COLUMNS} {STEP_FROM} WHERE s.id = ?1"),
            params![step_id as i64],
            Self::build_step_from_row,
        )
        .optional()
        .db_context("Failed to query step")
    }

    /// Loads the steps of a trip with a sequence number of at least
    /// `from_sequence_no`, in order.
    pub(super) fn load_steps_from(
        conn: &Connection,
        trip_id: u64,
        from_sequence_no: u32,
    ) -> Result<Vec<Step>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {STEP_COLUMNS} {STEP_FROM} WHERE s.trip_id = ?1 AND s.sequence_no >= ?2 \
                 ORDER BY s.sequence_no"
            ))
            .db_context("Failed to prepare step query")?;

        let steps = stmt
            .query_map(
                params![trip_id as i64, from_sequence_no],
                Self::build_step_from_row,
            )
            .db_context("Failed to query steps")?
            .map(|r| r.map(|(step, _)| step))
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch steps")?;
        Ok(steps)
    }

    /// Loads every step of a trip, in order.
    pub(super) fn load_steps(conn: &Connection, trip_id: u64) -> Result<Vec<Step>> {
        Self::load_steps_from(conn, trip_id, 1)
    }

    /// Inserts a new step at `position`, shifting later steps and carrying
    /// lodging over by position.
    pub fn insert_step(&mut self, actor: &str, request: &InsertStep) -> Result<Step> {
        request.step.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let trip_id = request.trip_id;
        guard::ensure_owned_trip(trip_id, Self::load_trip(&tx, trip_id)?, actor)?;

        let step_count: i64 = tx
            .query_row(COUNT_STEPS_SQL, params![trip_id as i64], |row| row.get(0))
            .db_context("Failed to count steps")?;
        sequencer::validate_position(request.position, step_count as u32)?;

        tx.execute(SHIFT_UP_SQL, params![trip_id as i64, request.position])
            .db_context("Failed to shift subsequent steps")?;
        tx.execute(RESTORE_SIGN_SQL, params![trip_id as i64])
            .db_context("Failed to shift subsequent steps")?;

        let data = &request.step;
        tx.execute(
            INSERT_STEP_SQL,
            params![
                trip_id as i64,
                request.position,
                data.origin.trim(),
                data.destination.trim(),
                data.walking_time(),
                data.walking_distance,
                data.ascent,
                data.description.as_deref(),
                data.notes.as_deref()
            ],
        )
        .db_context("Failed to insert step")?;
        let id = tx.last_insert_rowid() as u64;

        let subsequent = Self::load_steps_from(&tx, trip_id, request.position)?;
        for (step_id, accommodation_id) in sequencer::carry_over_lodging(&subsequent) {
            debug!("Carrying lodging {accommodation_id:?} over to step {step_id}");
            tx.execute(
                SET_STEP_ACCOMMODATION_SQL,
                params![accommodation_id.map(|a| a as i64), step_id as i64],
            )
            .db_context("Failed to carry lodging over")?;
        }

        Self::refresh_trip_totals(&tx, trip_id)?;

        let (step, _) = Self::load_step(&tx, id)?.ok_or(TrekError::NotFound {
            entity: Entity::Step,
            id,
        })?;

        tx.commit().db_context("Failed to commit transaction")?;
        debug!(
            "Inserted step {id} at position {} of trip {trip_id} ({} steps now)",
            request.position,
            step_count + 1
        );

        Ok(step)
    }

    /// Updates the non-ordering fields of a step and bumps its version.
    pub fn edit_step(&mut self, actor: &str, request: &EditStep) -> Result<Step> {
        request.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let step = guard::ensure_owned_step(request.id, Self::load_step(&tx, request.id)?, actor)?;

        if let Some(expected) = request.expected_version.filter(|&v| v != step.version) {
            return Err(TrekError::conflict(
                Entity::Step,
                step.id,
                ConflictReason::StaleVersion {
                    expected,
                    actual: step.version,
                },
            ));
        }

        if request.is_empty() {
            return Ok(step);
        }

        let walking_time = match (request.walking_hours, request.walking_minutes) {
            (None, None) => step.walking_time,
            (hours, minutes) => {
                let (current_hours, current_minutes) = step.walking_hours_minutes();
                let hours = hours.unwrap_or(current_hours);
                let minutes = minutes.unwrap_or(current_minutes);
                // A half-given time is only valid once merged with the stored half.
                check_walking_time(hours, minutes)?;
                f64::from(hours) + f64::from(minutes) / 60.0
            }
        };

        let rows = tx
            .execute(
                UPDATE_STEP_SQL,
                params![
                    request.origin.as_deref().map(str::trim).unwrap_or(&step.origin),
                    request
                        .destination
                        .as_deref()
                        .map(str::trim)
                        .unwrap_or(&step.destination),
                    walking_time,
                    request.walking_distance.unwrap_or(step.walking_distance),
                    request.ascent.unwrap_or(step.ascent),
                    merge_text(request.description.as_deref(), step.description.clone()),
                    merge_text(request.notes.as_deref(), step.notes.clone()),
                    step.id as i64,
                    step.version
                ],
            )
            .db_context("Failed to update step")?;

        if rows == 0 {
            let actual: i64 = tx
                .query_row(SELECT_STEP_VERSION_SQL, params![step.id as i64], |row| {
                    row.get(0)
                })
                .db_context("Failed to read step version")?;
            return Err(TrekError::conflict(
                Entity::Step,
                step.id,
                ConflictReason::StaleVersion {
                    expected: step.version,
                    actual: actual as u32,
                },
            ));
        }

        Self::refresh_trip_totals(&tx, step.trip_id)?;

        let (updated, _) = Self::load_step(&tx, step.id)?.ok_or(TrekError::NotFound {
            entity: Entity::Step,
            id: step.id,
        })?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(updated)
    }

    /// Deletes a step, closing the gap in the numbering. Returns the ID of
    /// the trip the step belonged to.
    pub fn delete_step(&mut self, actor: &str, step_id: u64) -> Result<u64> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let step = guard::ensure_owned_step(step_id, Self::load_step(&tx, step_id)?, actor)?;
        let review = Self::load_review(&tx, step_id)?;
        guard::ensure_deletable(&step, review.as_ref())?;
        let siblings = Self::load_steps(&tx, step.trip_id)?;
        guard::ensure_no_subsequent_lodging(&step, &siblings)?;

        let id = step_id as i64;
        tx.execute(DELETE_STEP_IMAGES_SQL, params![id])
            .db_context("Failed to delete review images")?;
        tx.execute(DELETE_STEP_REVIEW_SQL, params![id])
            .db_context("Failed to delete review")?;
        tx.execute(DELETE_STEP_ACTIVITIES_SQL, params![id])
            .db_context("Failed to delete activities")?;
        tx.execute(DELETE_STEP_SQL, params![id])
            .db_context("Failed to delete step")?;

        tx.execute(
            SHIFT_DOWN_SQL,
            params![step.trip_id as i64, step.sequence_no],
        )
        .db_context("Failed to renumber subsequent steps")?;
        tx.execute(RESTORE_SIGN_SQL, params![step.trip_id as i64])
            .db_context("Failed to renumber subsequent steps")?;

        Self::refresh_trip_totals(&tx, step.trip_id)?;

        tx.commit().db_context("Failed to commit transaction")?;
        debug!(
            "Deleted step {step_id} at position {} of trip {}",
            step.sequence_no, step.trip_id
        );

        Ok(step.trip_id)
    }

    /// Retrieves a step by ID.
    pub fn get_step(&self, step_id: u64) -> Result<Option<Step>> {
        Ok(Self::load_step(&self.connection, step_id)?.map(|(step, _)| step))
    }

    /// Retrieves every step of a trip ordered by sequence number.
    pub fn get_steps(&self, trip_id: u64) -> Result<Vec<Step>> {
        Self::load_steps(&self.connection, trip_id)
    }

    /// Assembles the page model of a step as seen by `viewer` on `today`.
    /// Steps are readable by anyone; only the owner gets an editable view.
    pub fn get_step_overview(
        &self,
        step_id: u64,
        viewer: Option<&str>,
        today: Date,
    ) -> Result<StepOverview> {
        let (step, owner) =
            Self::load_step(&self.connection, step_id)?.ok_or(TrekError::NotFound {
                entity: Entity::Step,
                id: step_id,
            })?;
        let trip = Self::load_trip(&self.connection, step.trip_id)?.ok_or(TrekError::NotFound {
            entity: Entity::Trip,
            id: step.trip_id,
        })?;

        let sibling_ids = Self::load_steps(&self.connection, step.trip_id)?
            .iter()
            .map(|s| s.id)
            .collect();
        let review = Self::load_review(&self.connection, step.id)?;
        let thread = build_day_thread(self, &step)?;

        Ok(StepOverview {
            trip_title: trip.title,
            sibling_ids,
            photo_count: review.as_ref().map_or(0, |r| r.images.len()),
            review,
            thread,
            editable: viewer == Some(owner.as_str()),
            reviewable: step.date <= today,
            step,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::merge_text;

    #[test]
    fn test_merge_text() {
        assert_eq!(merge_text(None, Some("kept".into())), Some("kept".into()));
        assert_eq!(merge_text(Some("new"), Some("old".into())), Some("new".into()));
        assert_eq!(merge_text(Some("  "), Some("old".into())), None);
    }
}

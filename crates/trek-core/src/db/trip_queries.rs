//! Trip CRUD operations and queries.

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use super::{parse_column, step_date};
use crate::{
    error::{ConflictReason, DatabaseResultExt, Entity, Result, TrekError},
    guard,
    models::Trip,
    params::{CreateTrip, UpdateTrip},
};

const TRIP_COLUMNS: &str = "id, owner, title, country, category, start_date, notes, total_cost, \
                            total_walking_distance, created_at, updated_at";
const INSERT_TRIP_SQL: &str = "INSERT INTO trips (owner, title, country, category, start_date, notes, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const SELECT_TRIP_ID_BY_TITLE_SQL: &str = "SELECT id FROM trips WHERE owner = ?1 AND title = ?2";
const SELECT_OTHER_TRIP_ID_BY_TITLE_SQL: &str =
    "SELECT id FROM trips WHERE owner = ?1 AND title = ?2 AND id != ?3";
const UPDATE_TRIP_SQL: &str = "UPDATE trips SET title = ?1, country = ?2, category = ?3, start_date = ?4, notes = ?5, updated_at = ?6 WHERE id = ?7";
const DELETE_TRIP_SQL: &str = "DELETE FROM trips WHERE id = ?1";

impl super::Database {
    /// Constructs a Trip (without steps) from a row selected with
    /// `TRIP_COLUMNS`.
    pub(super) fn build_trip_from_row(row: &rusqlite::Row) -> rusqlite::Result<Trip> {
        Ok(Trip {
            id: row.get::<_, i64>(0)? as u64,
            owner: row.get(1)?,
            title: row.get(2)?,
            country: row.get(3)?,
            category: parse_column(row, 4)?,
            start_date: parse_column(row, 5)?,
            notes: row.get(6)?,
            total_cost: row.get(7)?,
            total_walking_distance: row.get(8)?,
            created_at: parse_column::<Timestamp>(row, 9)?,
            updated_at: parse_column::<Timestamp>(row, 10)?,
            steps: Vec::new(),
        })
    }

    /// Loads a trip row without its steps.
    pub(super) fn load_trip(conn: &Connection, trip_id: u64) -> Result<Option<Trip>> {
        conn.query_row(
            &format!("SELECT {TRIP_COLUMNS} FROM trips WHERE id = ?1"),
            params![trip_id as i64],
            Self::build_trip_from_row,
        )
        .optional()
        .db_context("Failed to query trip")
    }

    /// Creates a trip owned by `owner`. Titles are unique per owner.
    pub fn create_trip(&mut self, owner: &str, trip: &CreateTrip) -> Result<Trip> {
        trip.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let title = trip.title.trim();
        let existing: Option<i64> = tx
            .query_row(SELECT_TRIP_ID_BY_TITLE_SQL, params![owner, title], |row| {
                row.get(0)
            })
            .optional()
            .db_context("Failed to check for duplicate title")?;
        if let Some(existing_id) = existing {
            return Err(TrekError::conflict(
                Entity::Trip,
                existing_id as u64,
                ConflictReason::DuplicateTitle,
            ));
        }

        let now = Timestamp::now().to_string();
        tx.execute(
            INSERT_TRIP_SQL,
            params![
                owner,
                title,
                trip.country.trim(),
                trip.category.as_str(),
                trip.start_date.to_string(),
                trip.notes.as_deref(),
                &now,
                &now
            ],
        )
        .db_context("Failed to insert trip")?;
        let id = tx.last_insert_rowid() as u64;

        let created = Self::load_trip(&tx, id)?.ok_or(TrekError::NotFound {
            entity: Entity::Trip,
            id,
        })?;

        tx.commit().db_context("Failed to commit transaction")?;
        debug!("Created trip {id} for {owner}");

        Ok(created)
    }

    /// Updates the title, country, category, start date or notes of a trip
    /// and returns it with its steps.
    ///
    /// Moving the start date moves every step date. The move is refused when
    /// a step linked to an accommodation would leave the stay's dates.
    pub fn update_trip(&mut self, actor: &str, request: &UpdateTrip) -> Result<Trip> {
        request.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut trip =
            guard::ensure_owned_trip(request.id, Self::load_trip(&tx, request.id)?, actor)?;

        if request.is_empty() {
            trip.steps = Self::load_steps(&tx, trip.id)?;
            return Ok(trip);
        }

        let title = request.title.as_deref().map_or(trip.title.as_str(), str::trim);
        let existing: Option<i64> = tx
            .query_row(
                SELECT_OTHER_TRIP_ID_BY_TITLE_SQL,
                params![actor, title, trip.id as i64],
                |row| row.get(0),
            )
            .optional()
            .db_context("Failed to check for duplicate title")?;
        if let Some(existing_id) = existing {
            return Err(TrekError::conflict(
                Entity::Trip,
                existing_id as u64,
                ConflictReason::DuplicateTitle,
            ));
        }

        let start_date = request.start_date.unwrap_or(trip.start_date);
        if start_date != trip.start_date {
            let accommodations = Self::load_trip_accommodations(&tx, trip.id)?;
            for step in Self::load_steps(&tx, trip.id)? {
                let Some(stay) = step
                    .accommodation_id
                    .and_then(|id| accommodations.iter().find(|a| a.id == id))
                else {
                    continue;
                };
                let moved = step_date(start_date, step.sequence_no).map_err(|_| {
                    TrekError::invalid_input("start_date")
                        .with_reason("The trip would end outside the supported calendar.")
                })?;
                if moved < stay.check_in.date() || moved >= stay.check_out.date() {
                    return Err(TrekError::invalid_input("start_date").with_reason(
                        "The new dates of the trip do not match its booked accommodations. \
                         Please first edit or delete the accommodations.",
                    ));
                }
            }
        }

        let notes = match request.notes.as_deref() {
            Some(text) if text.trim().is_empty() => None,
            Some(text) => Some(text),
            None => trip.notes.as_deref(),
        };

        tx.execute(
            UPDATE_TRIP_SQL,
            params![
                title,
                request.country.as_deref().map_or(trip.country.as_str(), str::trim),
                request.category.unwrap_or(trip.category).as_str(),
                start_date.to_string(),
                notes,
                Timestamp::now().to_string(),
                trip.id as i64
            ],
        )
        .db_context("Failed to update trip")?;

        let mut updated = Self::load_trip(&tx, trip.id)?.ok_or(TrekError::NotFound {
            entity: Entity::Trip,
            id: trip.id,
        })?;
        updated.steps = Self::load_steps(&tx, trip.id)?;

        tx.commit().db_context("Failed to commit transaction")?;
        debug!("Updated trip {}", trip.id);

        Ok(updated)
    }

    /// Retrieves a trip with its steps.
    pub fn get_trip(&self, trip_id: u64) -> Result<Option<Trip>> {
        let mut trip = Self::load_trip(&self.connection, trip_id)?;
        if let Some(ref mut trip) = trip {
            trip.steps = Self::load_steps(&self.connection, trip.id)?;
        }
        Ok(trip)
    }

    /// Lists the trips of `owner`, most recent start date first, each with
    /// its steps.
    pub fn list_trips(&self, owner: &str) -> Result<Vec<Trip>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {TRIP_COLUMNS} FROM trips WHERE owner = ?1 ORDER BY start_date DESC, id DESC"
            ))
            .db_context("Failed to prepare trip list query")?;

        let mut trips = stmt
            .query_map(params![owner], Self::build_trip_from_row)
            .db_context("Failed to query trips")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch trips")?;

        for trip in &mut trips {
            trip.steps = Self::load_steps(&self.connection, trip.id)?;
        }

        Ok(trips)
    }

    /// Permanently deletes a trip with everything attached to it and returns
    /// what was deleted.
    pub fn delete_trip(&mut self, actor: &str, trip_id: u64) -> Result<Trip> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut trip = guard::ensure_owned_trip(trip_id, Self::load_trip(&tx, trip_id)?, actor)?;
        trip.steps = Self::load_steps(&tx, trip_id)?;

        // Children first, without relying on ON DELETE CASCADE
        tx.execute(
            "DELETE FROM images WHERE review_id IN (SELECT id FROM steps WHERE trip_id = ?1)",
            params![trip_id as i64],
        )
        .db_context("Failed to delete trip images")?;
        tx.execute(
            "DELETE FROM reviews WHERE id IN (SELECT id FROM steps WHERE trip_id = ?1)",
            params![trip_id as i64],
        )
        .db_context("Failed to delete trip reviews")?;
        tx.execute(
            "DELETE FROM activities WHERE step_id IN (SELECT id FROM steps WHERE trip_id = ?1)",
            params![trip_id as i64],
        )
        .db_context("Failed to delete trip activities")?;
        tx.execute(
            "DELETE FROM steps WHERE trip_id = ?1",
            params![trip_id as i64],
        )
        .db_context("Failed to delete trip steps")?;
        tx.execute(
            "DELETE FROM accommodations WHERE trip_id = ?1",
            params![trip_id as i64],
        )
        .db_context("Failed to delete trip accommodations")?;
        tx.execute(DELETE_TRIP_SQL, params![trip_id as i64])
            .db_context("Failed to delete trip")?;

        tx.commit().db_context("Failed to commit transaction")?;
        debug!("Deleted trip {trip_id} with {} steps", trip.steps.len());

        Ok(trip)
    }
}

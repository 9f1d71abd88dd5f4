//! Accommodation operations: linking a stay to the steps it covers.

use jiff::civil::Date;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use super::parse_column;
use crate::{
    error::{ConflictReason, DatabaseResultExt, Entity, Result, TrekError},
    guard,
    models::{Accommodation, Step},
    params::CreateAccommodation,
};

const ACCOMMODATION_COLUMNS: &str = "a.id, a.trip_id, a.name, a.check_in, a.check_out, a.price";
const INSERT_ACCOMMODATION_SQL: &str = "INSERT INTO accommodations (trip_id, name, check_in, check_out, price) VALUES (?1, ?2, ?3, ?4, ?5)";
const LINK_STEP_SQL: &str = "UPDATE steps SET accommodation_id = ?1 WHERE id = ?2";
const UNLINK_STEPS_SQL: &str = "UPDATE steps SET accommodation_id = NULL WHERE accommodation_id = ?1";
const DELETE_ACCOMMODATION_SQL: &str = "DELETE FROM accommodations WHERE id = ?1";

/// Steps whose date falls in `[check_in, check_out)`, one night per step.
fn steps_in_window(steps: &[Step], check_in: Date, check_out: Date) -> Vec<&Step> {
    steps
        .iter()
        .filter(|s| s.date >= check_in && s.date < check_out)
        .collect()
}

impl super::Database {
    fn build_accommodation_from_row(row: &rusqlite::Row) -> rusqlite::Result<Accommodation> {
        Ok(Accommodation {
            id: row.get::<_, i64>(0)? as u64,
            trip_id: row.get::<_, i64>(1)? as u64,
            name: row.get(2)?,
            check_in: parse_column(row, 3)?,
            check_out: parse_column(row, 4)?,
            price: row.get(5)?,
        })
    }

    /// Loads an accommodation together with the owner of its trip.
    fn load_accommodation(
        conn: &Connection,
        accommodation_id: u64,
    ) -> Result<Option<(Accommodation, String)>> {
        conn.query_row(
            &format!(
                "SELECT {ACCOMMODATION_COLUMNS}, t.owner FROM accommodations a \
                 JOIN trips t ON t.id = a.trip_id WHERE a.id = ?1"
            ),
            params![accommodation_id as i64],
            |row| Ok((Self::build_accommodation_from_row(row)?, row.get(6)?)),
        )
        .optional()
        .db_context("Failed to query accommodation")
    }

    /// Adds an accommodation to a trip and links it to every step it covers.
    pub fn add_accommodation(
        &mut self,
        actor: &str,
        request: &CreateAccommodation,
    ) -> Result<Accommodation> {
        request.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        guard::ensure_owned_trip(
            request.trip_id,
            Self::load_trip(&tx, request.trip_id)?,
            actor,
        )?;

        let steps = Self::load_steps(&tx, request.trip_id)?;
        let covered = steps_in_window(&steps, request.check_in.date(), request.check_out.date());
        if covered.is_empty() {
            return Err(TrekError::invalid_input("check_in").with_reason(
                "The accommodation dates do not match any step of the trip.",
            ));
        }
        if let Some(taken) = covered.iter().find(|s| s.accommodation_id.is_some()) {
            return Err(TrekError::conflict(
                Entity::Step,
                taken.id,
                ConflictReason::LodgingOverlap {
                    sequence_no: taken.sequence_no,
                },
            ));
        }

        tx.execute(
            INSERT_ACCOMMODATION_SQL,
            params![
                request.trip_id as i64,
                request.name.trim(),
                request.check_in.to_string(),
                request.check_out.to_string(),
                request.price
            ],
        )
        .db_context("Failed to insert accommodation")?;
        let id = tx.last_insert_rowid() as u64;

        for step in &covered {
            tx.execute(LINK_STEP_SQL, params![id as i64, step.id as i64])
                .db_context("Failed to link accommodation to step")?;
        }
        Self::refresh_trip_totals(&tx, request.trip_id)?;

        let (accommodation, _) =
            Self::load_accommodation(&tx, id)?.ok_or(TrekError::NotFound {
                entity: Entity::Accommodation,
                id,
            })?;

        tx.commit().db_context("Failed to commit transaction")?;
        debug!(
            "Linked accommodation {id} to {} steps of trip {}",
            covered.len(),
            request.trip_id
        );

        Ok(accommodation)
    }

    /// Detaches an accommodation from its steps, deletes it and returns it.
    pub fn remove_accommodation(
        &mut self,
        actor: &str,
        accommodation_id: u64,
    ) -> Result<Accommodation> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let accommodation = guard::ensure_owned(
            Entity::Accommodation,
            accommodation_id,
            Self::load_accommodation(&tx, accommodation_id)?,
            actor,
        )?;

        let unlinked = tx
            .execute(UNLINK_STEPS_SQL, params![accommodation_id as i64])
            .db_context("Failed to unlink accommodation")?;
        tx.execute(DELETE_ACCOMMODATION_SQL, params![accommodation_id as i64])
            .db_context("Failed to delete accommodation")?;
        Self::refresh_trip_totals(&tx, accommodation.trip_id)?;

        tx.commit().db_context("Failed to commit transaction")?;
        debug!("Removed accommodation {accommodation_id} from {unlinked} steps");

        Ok(accommodation)
    }

    /// Retrieves an accommodation by ID.
    pub fn get_accommodation(&self, accommodation_id: u64) -> Result<Option<Accommodation>> {
        Ok(Self::load_accommodation(&self.connection, accommodation_id)?.map(|(a, _)| a))
    }

    /// Loads the accommodations of a trip ordered by check-in.
    pub(super) fn load_trip_accommodations(
        conn: &Connection,
        trip_id: u64,
    ) -> Result<Vec<Accommodation>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {ACCOMMODATION_COLUMNS} FROM accommodations a WHERE a.trip_id = ?1 \
                 ORDER BY a.check_in, a.id"
            ))
            .db_context("Failed to prepare accommodation query")?;

        let accommodations = stmt
            .query_map(params![trip_id as i64], Self::build_accommodation_from_row)
            .db_context("Failed to query accommodations")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch accommodations")?;
        Ok(accommodations)
    }

    /// Accommodations of a trip ordered by check-in.
    pub fn get_trip_accommodations(&self, trip_id: u64) -> Result<Vec<Accommodation>> {
        Self::load_trip_accommodations(&self.connection, trip_id)
    }

    /// Distinct accommodations linked to steps of `trip_id` that check out
    /// on `date`.
    pub fn get_accommodations_checking_out(
        &self,
        trip_id: u64,
        date: Date,
    ) -> Result<Vec<Accommodation>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT DISTINCT {ACCOMMODATION_COLUMNS} FROM accommodations a \
                 JOIN steps s ON s.accommodation_id = a.id \
                 WHERE s.trip_id = ?1 AND date(a.check_out) = ?2 \
                 ORDER BY a.check_out, a.id"
            ))
            .db_context("Failed to prepare check-out query")?;

        let accommodations = stmt
            .query_map(
                params![trip_id as i64, date.to_string()],
                Self::build_accommodation_from_row,
            )
            .db_context("Failed to query check-outs")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch check-outs")?;
        Ok(accommodations)
    }
}

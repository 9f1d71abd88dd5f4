//! Leisure activity and transport leg operations.

use log::debug;
use rusqlite::{params, types::Type, Connection, OptionalExtension};

use super::{parse_column, parse_optional_column};
use crate::{
    error::{DatabaseResultExt, Entity, Result, TrekError},
    guard,
    models::{Activity, ActivityKind},
    params::{CreateActivity, UpdateActivity},
};

/// Kind-specific column values: category, address, mode, company,
/// destination and duration.
type KindColumns<'a> = (
    Option<&'static str>,
    Option<&'a str>,
    Option<&'static str>,
    Option<&'a str>,
    Option<&'a str>,
    Option<u32>,
);

fn kind_columns(kind: &ActivityKind) -> KindColumns<'_> {
    match kind {
        ActivityKind::Leisure { category, address } => {
            (Some(category.as_str()), address.as_deref(), None, None, None, None)
        }
        ActivityKind::Transport {
            mode,
            company,
            destination,
            duration_minutes,
        } => (
            None,
            None,
            Some(mode.as_str()),
            company.as_deref(),
            destination.as_deref(),
            Some(*duration_minutes),
        ),
    }
}

const ACTIVITY_COLUMNS: &str = "a.id, a.step_id, a.kind, a.name, a.start_time, a.price, a.notes, \
                                a.category, a.address, a.mode, a.company, a.destination, \
                                a.duration_minutes, t.owner";
const ACTIVITY_FROM: &str =
    "FROM activities a JOIN steps s ON s.id = a.step_id JOIN trips t ON t.id = s.trip_id";
const INSERT_ACTIVITY_SQL: &str = "INSERT INTO activities (step_id, kind, name, start_time, price, notes, category, address, mode, company, destination, duration_minutes) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";
const UPDATE_ACTIVITY_SQL: &str = "UPDATE activities SET name = ?1, start_time = ?2, price = ?3, notes = ?4, category = ?5, address = ?6, mode = ?7, company = ?8, destination = ?9, duration_minutes = ?10 WHERE id = ?11";
const DELETE_ACTIVITY_SQL: &str = "DELETE FROM activities WHERE id = ?1";

impl super::Database {
    /// Constructs an Activity and its trip owner from a row selected with
    /// `ACTIVITY_COLUMNS`.
    fn build_activity_from_row(row: &rusqlite::Row) -> rusqlite::Result<(Activity, String)> {
        let kind: String = row.get(2)?;
        let kind = match kind.as_str() {
            "leisure" => ActivityKind::Leisure {
                category: parse_optional_column(row, 7)?.unwrap_or_default(),
                address: row.get(8)?,
            },
            "transport" => ActivityKind::Transport {
                mode: parse_column(row, 9)?,
                company: row.get(10)?,
                destination: row.get(11)?,
                duration_minutes: row.get::<_, Option<i64>>(12)?.unwrap_or(0).max(0) as u32,
            },
            other => {
                return Err(rusqlite::Error::FromSqlConversionFailure(
                    2,
                    Type::Text,
                    format!("Invalid activity kind: {other}").into(),
                ))
            }
        };

        let activity = Activity {
            id: row.get::<_, i64>(0)? as u64,
            step_id: row.get::<_, i64>(1)? as u64,
            name: row.get(3)?,
            start_time: parse_column(row, 4)?,
            price: row.get(5)?,
            notes: row.get(6)?,
            kind,
        };
        Ok((activity, row.get(13)?))
    }

    fn query_activities(
        conn: &Connection,
        filter: &str,
        id: u64,
    ) -> Result<Vec<(Activity, String)>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {ACTIVITY_COLUMNS} {ACTIVITY_FROM} WHERE {filter} ORDER BY a.start_time, a.id"
            ))
            .db_context("Failed to prepare activity query")?;

        let activities = stmt
            .query_map(params![id as i64], Self::build_activity_from_row)
            .db_context("Failed to query activities")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch activities")?;
        Ok(activities)
    }

    fn load_activity(conn: &Connection, activity_id: u64) -> Result<Option<(Activity, String)>> {
        Ok(Self::query_activities(conn, "a.id = ?1", activity_id)?
            .into_iter()
            .next())
    }

    /// Adds a leisure activity or transport leg to a step.
    pub fn add_activity(&mut self, actor: &str, request: &CreateActivity) -> Result<Activity> {
        request.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let step = guard::ensure_owned_step(
            request.step_id,
            Self::load_step(&tx, request.step_id)?,
            actor,
        )?;

        let (category, address, mode, company, destination, duration) = kind_columns(&request.kind);

        tx.execute(
            INSERT_ACTIVITY_SQL,
            params![
                step.id as i64,
                request.kind.as_str(),
                request.name.trim(),
                request.start_time.to_string(),
                request.price,
                request.notes.as_deref(),
                category,
                address,
                mode,
                company,
                destination,
                duration
            ],
        )
        .db_context("Failed to insert activity")?;
        let id = tx.last_insert_rowid() as u64;

        Self::refresh_trip_totals(&tx, step.trip_id)?;

        let (activity, _) = Self::load_activity(&tx, id)?.ok_or(TrekError::NotFound {
            entity: Entity::Activity,
            id,
        })?;

        tx.commit().db_context("Failed to commit transaction")?;
        debug!(
            "Added {} activity {id} to step {}",
            request.kind.as_str(),
            step.id
        );

        Ok(activity)
    }

    /// Replaces the contents of an activity and refreshes its trip's cost.
    pub fn update_activity(&mut self, actor: &str, request: &UpdateActivity) -> Result<Activity> {
        request.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let activity = guard::ensure_owned(
            Entity::Activity,
            request.id,
            Self::load_activity(&tx, request.id)?,
            actor,
        )?;
        if activity.kind.as_str() != request.kind.as_str() {
            return Err(TrekError::invalid_input("kind").with_reason(format!(
                "A {} activity cannot be turned into a {} one.",
                activity.kind.as_str(),
                request.kind.as_str()
            )));
        }
        let (step, _) = Self::load_step(&tx, activity.step_id)?.ok_or(TrekError::NotFound {
            entity: Entity::Step,
            id: activity.step_id,
        })?;

        let (category, address, mode, company, destination, duration) = kind_columns(&request.kind);
        tx.execute(
            UPDATE_ACTIVITY_SQL,
            params![
                request.name.trim(),
                request.start_time.to_string(),
                request.price,
                request.notes.as_deref(),
                category,
                address,
                mode,
                company,
                destination,
                duration,
                activity.id as i64
            ],
        )
        .db_context("Failed to update activity")?;
        Self::refresh_trip_totals(&tx, step.trip_id)?;

        let (updated, _) = Self::load_activity(&tx, activity.id)?.ok_or(TrekError::NotFound {
            entity: Entity::Activity,
            id: activity.id,
        })?;

        tx.commit().db_context("Failed to commit transaction")?;
        debug!("Updated activity {} of step {}", activity.id, step.id);

        Ok(updated)
    }

    /// Removes an activity and returns it.
    pub fn remove_activity(&mut self, actor: &str, activity_id: u64) -> Result<Activity> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let activity = guard::ensure_owned(
            Entity::Activity,
            activity_id,
            Self::load_activity(&tx, activity_id)?,
            actor,
        )?;
        let (step, _) = Self::load_step(&tx, activity.step_id)?.ok_or(TrekError::NotFound {
            entity: Entity::Step,
            id: activity.step_id,
        })?;

        tx.execute(DELETE_ACTIVITY_SQL, params![activity_id as i64])
            .db_context("Failed to delete activity")?;
        Self::refresh_trip_totals(&tx, step.trip_id)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(activity)
    }

    /// Retrieves an activity by ID.
    pub fn get_activity(&self, activity_id: u64) -> Result<Option<Activity>> {
        Ok(Self::load_activity(&self.connection, activity_id)?.map(|(activity, _)| activity))
    }

    /// Activities of a step ordered by start time.
    pub fn get_step_activities(&self, step_id: u64) -> Result<Vec<Activity>> {
        Ok(Self::query_activities(&self.connection, "a.step_id = ?1", step_id)?
            .into_iter()
            .map(|(activity, _)| activity)
            .collect())
    }

    /// Transport legs attached to any step of a trip.
    pub fn get_trip_transports(&self, trip_id: u64) -> Result<Vec<Activity>> {
        Ok(Self::query_activities(
            &self.connection,
            "s.trip_id = ?1 AND a.kind = 'transport'",
            trip_id,
        )?
        .into_iter()
        .map(|(activity, _)| activity)
        .collect())
    }
}

//! SQLite persistence for trips, steps and everything attached to them.
//!
//! Each `*_queries` module adds an `impl Database` block for one family of
//! records. Every mutating method runs in a single transaction and performs
//! its ownership and integrity checks inside that transaction before the
//! first write, so a refused operation leaves the store untouched.

use std::{error::Error, path::Path, str::FromStr};

use jiff::{civil::Date, ToSpan};
use rusqlite::{params, types::Type, Connection, Row};

use crate::error::{DatabaseResultExt, Result};

pub mod accommodation_queries;
pub mod activity_queries;
pub mod review_queries;
pub mod schema;
pub mod step_queries;
pub mod thread_source;
pub mod trip_queries;

const REFRESH_TRIP_TOTALS_SQL: &str = "UPDATE trips SET \
     total_walking_distance = (SELECT COALESCE(SUM(walking_distance), 0) FROM steps WHERE trip_id = ?1), \
     total_cost = \
       (SELECT COALESCE(SUM(a.price), 0) FROM activities a JOIN steps s ON s.id = a.step_id WHERE s.trip_id = ?1) \
     + (SELECT COALESCE(SUM(price), 0) FROM accommodations WHERE trip_id = ?1), \
     updated_at = ?2 \
     WHERE id = ?1";

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database at `path` and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Recomputes a trip's cost and walking distance from its current rows
    /// and touches its `updated_at`.
    fn refresh_trip_totals(conn: &Connection, trip_id: u64) -> Result<()> {
        conn.execute(
            REFRESH_TRIP_TOTALS_SQL,
            params![trip_id as i64, jiff::Timestamp::now().to_string()],
        )
        .db_context("Failed to update trip totals")?;
        Ok(())
    }
}

/// Reads a TEXT column and parses it with `FromStr`.
pub(crate) fn parse_column<T>(row: &Row, index: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: Into<Box<dyn Error + Send + Sync>>,
{
    let text: String = row.get(index)?;
    text.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, e.into()))
}

/// Like [`parse_column`] for nullable columns.
pub(crate) fn parse_optional_column<T>(row: &Row, index: usize) -> rusqlite::Result<Option<T>>
where
    T: FromStr,
    T::Err: Into<Box<dyn Error + Send + Sync>>,
{
    let text: Option<String> = row.get(index)?;
    text.map(|t| {
        t.parse::<T>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, e.into()))
    })
    .transpose()
}

/// Calendar date of the step at `sequence_no` in a trip starting on
/// `start_date`: one day per step.
pub(crate) fn step_date(start_date: Date, sequence_no: u32) -> std::result::Result<Date, jiff::Error> {
    start_date.checked_add(i64::from(sequence_no.saturating_sub(1)).days())
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_step_date_counts_from_start() {
        let start = date(2024, 2, 28);
        assert_eq!(step_date(start, 1).unwrap(), start);
        assert_eq!(step_date(start, 2).unwrap(), date(2024, 2, 29));
        assert_eq!(step_date(start, 3).unwrap(), date(2024, 3, 1));
    }
}

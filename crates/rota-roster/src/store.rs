use std::sync::Mutex;

use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::instrument;

use crate::error::{Result, RosterError};
use crate::types::{ShiftRecord, ShiftType};

const SHIFT_SELECT_SQL: &str =
    "SELECT date, work_type, changed_work_type, created_at, updated_at FROM shifts";

/// Thread-safe store for persisted shift records.
///
/// Wraps a single SQLite connection in a `Mutex`. For high-concurrency
/// deployments consider a connection pool, but a Mutex is sufficient for a
/// single-node admin service.
pub struct ShiftStore {
    db: Mutex<Connection>,
}

impl ShiftStore {
    /// Wrap an already-open (and `init_db`-initialised) connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Mutex::new(conn),
        }
    }

    /// Insert a single record directly.
    ///
    /// A second record for the same date violates the primary key and is
    /// surfaced as [`RosterError::Conflict`].
    #[instrument(skip(self), fields(date = %date, work_type = %work_type))]
    pub fn create(
        &self,
        date: NaiveDate,
        work_type: ShiftType,
        changed_work_type: Option<ShiftType>,
    ) -> Result<ShiftRecord> {
        let mut record = ShiftRecord::new(date, work_type);
        record.changed_work_type = changed_work_type;

        let db = self.db.lock().unwrap();
        let inserted = db.execute(
            "INSERT INTO shifts (date, work_type, changed_work_type, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            rusqlite::params![
                record.date.to_string(),
                record.work_type.as_str(),
                record.changed_work_type.map(|t| t.as_str()),
                record.created_at,
            ],
        );
        match inserted {
            Ok(_) => Ok(record),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(RosterError::Conflict { date })
            }
            Err(e) => Err(RosterError::Database(e)),
        }
    }

    /// Retrieve the record for a date, returning `None` if absent.
    pub fn get(&self, date: NaiveDate) -> Result<Option<ShiftRecord>> {
        let db = self.db.lock().unwrap();
        match db.query_row(
            &format!("{SHIFT_SELECT_SQL} WHERE date = ?1"),
            rusqlite::params![date.to_string()],
            row_to_record,
        ) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(RosterError::Database(e)),
        }
    }

    /// Return records ordered by ascending date.
    ///
    /// When a `(start, end)` pair is given, only dates in the inclusive range
    /// are returned. ISO-8601 text sorts chronologically, so the comparison
    /// happens on the stored strings.
    #[instrument(skip(self))]
    pub fn list(&self, range: Option<(NaiveDate, NaiveDate)>) -> Result<Vec<ShiftRecord>> {
        let db = self.db.lock().unwrap();
        let records = match range {
            Some((start, end)) => {
                let mut stmt = db.prepare(&format!(
                    "{SHIFT_SELECT_SQL} WHERE date >= ?1 AND date <= ?2 ORDER BY date"
                ))?;
                let rows = stmt.query_map(
                    rusqlite::params![start.to_string(), end.to_string()],
                    row_to_record,
                )?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
            None => {
                let mut stmt = db.prepare(&format!("{SHIFT_SELECT_SQL} ORDER BY date"))?;
                let rows = stmt.query_map([], row_to_record)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
        };
        Ok(records)
    }

    /// Set the manual override for a date. The original assignment in
    /// `work_type` is left untouched.
    #[instrument(skip(self), fields(date = %date, new_type = %new_type))]
    pub fn set_override(&self, date: NaiveDate, new_type: ShiftType) -> Result<ShiftRecord> {
        let now = chrono::Utc::now().to_rfc3339();
        {
            let db = self.db.lock().unwrap();
            let changed = db.execute(
                "UPDATE shifts SET changed_work_type = ?1, updated_at = ?2 WHERE date = ?3",
                rusqlite::params![new_type.as_str(), now, date.to_string()],
            )?;
            if changed == 0 {
                return Err(RosterError::NotFound { date });
            }
        }
        self.get(date)?.ok_or(RosterError::NotFound { date })
    }

    /// Insert a batch of generated records inside one transaction.
    ///
    /// Uses `INSERT OR IGNORE`, so a date that gained a record between the
    /// engine's existence check and this flush is skipped rather than
    /// erroring. Returns the number of rows actually written.
    #[instrument(skip(self, records), fields(staged = records.len()))]
    pub fn insert_missing(&self, records: &[ShiftRecord]) -> Result<u64> {
        if records.is_empty() {
            return Ok(0);
        }
        let mut db = self.db.lock().unwrap();
        let tx = db.transaction()?;
        let mut inserted = 0u64;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR IGNORE INTO shifts
                 (date, work_type, changed_work_type, created_at, updated_at)
                 VALUES (?1, ?2, NULL, ?3, ?3)",
            )?;
            for record in records {
                inserted += stmt.execute(rusqlite::params![
                    record.date.to_string(),
                    record.work_type.as_str(),
                    record.created_at,
                ])? as u64;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }
}

/// Map a SELECT row (column order from SHIFT_SELECT_SQL) to a ShiftRecord.
/// Centralised here so every query in this crate stays consistent.
fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<ShiftRecord> {
    use std::str::FromStr;

    let date_str: String = row.get(0)?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let work_type = ShiftType::from_str(&row.get::<_, String>(1)?).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, e.into())
    })?;
    let changed_work_type = match row.get::<_, Option<String>>(2)? {
        Some(s) => Some(ShiftType::from_str(&s).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, e.into())
        })?),
        None => None,
    };

    Ok(ShiftRecord {
        date,
        work_type,
        changed_work_type,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

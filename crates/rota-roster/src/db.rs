use rusqlite::Connection;

use crate::error::Result;

/// Initialise the roster schema in `conn`.
///
/// `date` is the primary key: the one-record-per-date invariant is enforced
/// by the storage layer, so a racing generate and create cannot produce a
/// duplicate row. The engine's existence check is an optimisation on top.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS shifts (
            date              TEXT NOT NULL PRIMARY KEY,  -- ISO-8601 YYYY-MM-DD
            work_type         TEXT NOT NULL,
            changed_work_type TEXT,                       -- NULL means no override
            created_at        TEXT NOT NULL,
            updated_at        TEXT NOT NULL
        ) STRICT;
        ",
    )?;
    Ok(())
}

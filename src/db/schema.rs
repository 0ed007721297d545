use crate::errors::{Error, Result};
use rusqlite::Connection;
use tracing::{debug, info, instrument, warn};

/// Bump this to force a destructive migration: on mismatch both tables are
/// dropped and recreated, losing all stored data.
pub(crate) const SCHEMA_VERSION: i32 = 1;

// `transaction` is a reserved word, hence `transac`.
const CREATE_TABLES_SQL: &str = "BEGIN;

    CREATE TABLE IF NOT EXISTS account (
        accountNo TEXT PRIMARY KEY,
        bankName TEXT NOT NULL,
        accountHolderName TEXT NOT NULL,
        balance REAL NOT NULL
    );

    CREATE TABLE IF NOT EXISTS transac (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        expenseType TEXT NOT NULL,
        amount REAL NOT NULL,
        accountNo TEXT,
        FOREIGN KEY (accountNo) REFERENCES account (accountNo)
    );
    COMMIT;";

#[instrument(skip(conn))]
pub(crate) fn create_tables(conn: &Connection) -> Result<()> {
    debug!("Executing CREATE TABLE statements if tables do not exist.");
    conn.execute_batch(CREATE_TABLES_SQL)
        .map_err(|e| Error::Database(format!("Failed to create tables: {}", e)))?;
    info!("Database tables ensured (account, transac).");
    Ok(())
}

/// Brings the database up to [`SCHEMA_VERSION`].
///
/// A fresh database (user_version 0) gets its tables created and is stamped
/// with the current version. Any other version mismatch drops both tables
/// and recreates them; callers must treat a schema upgrade as full data
/// loss.
#[instrument(skip(conn))]
pub(crate) fn ensure_schema(conn: &Connection) -> Result<()> {
    let stored_version: i32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| Error::Database(format!("Failed to read schema version: {}", e)))?;

    if stored_version != 0 && stored_version != SCHEMA_VERSION {
        warn!(
            "Schema version mismatch (stored {}, expected {}). Dropping and recreating tables; all data is lost.",
            stored_version, SCHEMA_VERSION
        );
        conn.execute_batch(
            "BEGIN;
            DROP TABLE IF EXISTS transac;
            DROP TABLE IF EXISTS account;
            COMMIT;",
        )
        .map_err(|e| Error::Database(format!("Failed to drop outdated tables: {}", e)))?;
    }

    create_tables(conn)?;

    if stored_version != SCHEMA_VERSION {
        // PRAGMA does not support bound parameters.
        conn.execute_batch(&format!("PRAGMA user_version = {}", SCHEMA_VERSION))
            .map_err(|e| Error::Database(format!("Failed to stamp schema version: {}", e)))?;
        info!("Stamped schema version {}.", SCHEMA_VERSION);
    }
    Ok(())
}

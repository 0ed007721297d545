use crate::db::schema::ensure_schema;
use crate::errors::{Error, Result};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument};

/// Shared handle to the single ledger connection. The mutex serializes
/// store calls; there is no cross-call atomicity beyond one statement.
pub type DbPool = Arc<Mutex<Connection>>;

#[instrument]
pub async fn init_db(db_path: &str) -> Result<DbPool> {
    debug!("Initializing database connection to: {}", db_path);
    let conn = Connection::open(db_path)
        .map_err(|e| Error::Database(format!("Failed to open database at {}: {}", db_path, e)))?;

    // transac.accountNo is a declared-but-unenforced reference: postings may
    // outlive their account and may be logged before it exists. Enforcement
    // stays off (SQLite's default) to keep that contract.
    conn.execute("PRAGMA foreign_keys = OFF;", [])
        .map_err(|e| Error::Database(format!("Failed to configure foreign keys: {}", e)))?;

    info!("Database connection opened. Ensuring schema is current...");
    ensure_schema(&conn)?;

    Ok(Arc::new(Mutex::new(conn)))
}

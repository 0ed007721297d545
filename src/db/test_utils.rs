#![allow(dead_code)]
use crate::db::{schema, DbPool};
use crate::errors::Result;
use crate::models::Account;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

pub(crate) fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init(); // Use try_init to avoid panic if already initialized
}

/// Fresh in-memory database with the schema applied, for one test.
pub(crate) fn setup_test_db() -> Result<DbPool> {
    let conn = Connection::open_in_memory()?;
    // Match init_db: the transac.accountNo reference is declared but
    // unenforced, and the bundled SQLite defaults foreign_keys to ON.
    conn.execute("PRAGMA foreign_keys = OFF;", [])?;
    schema::ensure_schema(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

pub(crate) fn sample_account(account_no: &str, balance: f64) -> Account {
    Account {
        account_no: account_no.to_string(),
        bank_name: "BOC".to_string(),
        account_holder_name: "Kasun".to_string(),
        balance,
    }
}

/// Inserts a transaction row with arbitrary raw text, bypassing the store's
/// serialization. Used to plant malformed rows for corruption tests.
pub(crate) fn direct_insert_transaction_row(
    conn: &Connection,
    date: &str,
    account_no: &str,
    expense_type: &str,
    amount: f64,
) -> Result<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO transac (date, accountNo, expenseType, amount)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    let id = stmt.insert(params![date, account_no, expense_type, amount])?;
    Ok(id)
}

use crate::db::DbPool;
use crate::errors::{Error, Result};
use crate::models::{ExpenseType, Transaction, DATE_FORMAT};
use chrono::NaiveDate;
use rusqlite::params;
use tracing::{debug, info, instrument};

/// Raw column values as stored; parsed into a [`Transaction`] after the
/// query so that malformed text surfaces as [`Error::Corrupt`] rather than
/// a mapping failure inside the cursor.
struct StoredRow {
    id: i64,
    date: String,
    account_no: String,
    expense_type: String,
    amount: f64,
}

fn parse_row(row: StoredRow) -> Result<Transaction> {
    let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT).map_err(|e| {
        Error::Corrupt(format!(
            "transaction {} has malformed date '{}' (expected {}): {}",
            row.id, row.date, DATE_FORMAT, e
        ))
    })?;
    let expense_type: ExpenseType = row.expense_type.parse()?;
    Ok(Transaction {
        id: row.id,
        date,
        account_no: row.account_no,
        expense_type,
        amount: row.amount,
    })
}

/// Appends one transaction to the log and returns its row id.
///
/// The date is serialized in the fixed `%d-%m-%Y` wire format. The account
/// number is not checked for existence; a dangling reference is allowed.
#[instrument(skip(pool))]
pub async fn log_transaction(
    pool: &DbPool,
    date: NaiveDate,
    account_no: &str,
    expense_type: ExpenseType,
    amount: f64,
) -> Result<i64> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;

    let mut stmt = conn.prepare_cached(
        "INSERT INTO transac (date, accountNo, expenseType, amount)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    let transaction_id = stmt.insert(params![
        date.format(DATE_FORMAT).to_string(),
        account_no,
        expense_type.as_str(),
        amount,
    ])?;

    info!(
        "Logged transaction {} for account {}: {} of {:.2} on {}",
        transaction_id,
        account_no,
        expense_type,
        amount,
        date.format(DATE_FORMAT)
    );
    Ok(transaction_id)
}

/// Returns the full transaction log in storage order.
///
/// # Errors
///
/// Returns [`Error::Corrupt`] if any stored date or expense-type text does
/// not parse back; a malformed row is never skipped or defaulted.
#[instrument(skip(pool))]
pub async fn get_all_transactions(pool: &DbPool) -> Result<Vec<Transaction>> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;

    let mut stmt = conn.prepare_cached(
        "SELECT id, date, accountNo, expenseType, amount FROM transac ORDER BY id ASC",
    )?;
    let rows_iter = stmt.query_map([], |row| {
        Ok(StoredRow {
            id: row.get(0)?,
            date: row.get(1)?,
            account_no: row.get(2)?,
            expense_type: row.get(3)?,
            amount: row.get(4)?,
        })
    })?;

    let mut transactions = Vec::new();
    for stored in rows_iter {
        transactions.push(parse_row(stored?)?);
    }
    debug!("Fetched {} transactions.", transactions.len());
    Ok(transactions)
}

/// Returns the last `limit` transactions of the log, in storage order.
///
/// The limit is pushed into the query (`ORDER BY id DESC LIMIT`), so the
/// cost is proportional to `limit` rather than the full log. A limit of
/// zero or less returns an empty list; a limit at or above the total count
/// returns the full sequence unchanged.
#[instrument(skip(pool))]
pub async fn get_recent_transactions(pool: &DbPool, limit: i64) -> Result<Vec<Transaction>> {
    // SQLite treats a negative LIMIT as unlimited, so reject it up front.
    if limit <= 0 {
        debug!("Non-positive limit {}; returning empty log slice.", limit);
        return Ok(Vec::new());
    }

    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;

    let mut stmt = conn.prepare_cached(
        "SELECT id, date, accountNo, expenseType, amount FROM transac
         ORDER BY id DESC LIMIT ?1",
    )?;
    let rows_iter = stmt.query_map(params![limit], |row| {
        Ok(StoredRow {
            id: row.get(0)?,
            date: row.get(1)?,
            account_no: row.get(2)?,
            expense_type: row.get(3)?,
            amount: row.get(4)?,
        })
    })?;

    let mut transactions = Vec::new();
    for stored in rows_iter {
        transactions.push(parse_row(stored?)?);
    }
    // The query walked newest-first; flip back to storage order.
    transactions.reverse();

    debug!(
        "Fetched last {} transactions (requested {}).",
        transactions.len(),
        limit
    );
    Ok(transactions)
}

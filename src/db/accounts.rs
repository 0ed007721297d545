use crate::db::DbPool;
use crate::errors::{Error, Result};
use crate::models::{Account, ExpenseType};
use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info, instrument};

fn account_from_row(row: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        account_no: row.get(0)?,
        bank_name: row.get(1)?,
        account_holder_name: row.get(2)?,
        balance: row.get(3)?,
    })
}

/// Lists every stored account number, in storage order. No sort order is
/// guaranteed.
#[instrument(skip(pool))]
pub async fn list_account_numbers(pool: &DbPool) -> Result<Vec<String>> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;

    let mut stmt = conn.prepare_cached("SELECT accountNo FROM account")?;
    let numbers_iter = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut numbers = Vec::new();
    for number in numbers_iter {
        numbers.push(number?);
    }
    debug!("Fetched {} account numbers.", numbers.len());
    Ok(numbers)
}

/// Lists every stored account record, in storage order.
#[instrument(skip(pool))]
pub async fn list_accounts(pool: &DbPool) -> Result<Vec<Account>> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;

    let mut stmt = conn.prepare_cached(
        "SELECT accountNo, bankName, accountHolderName, balance FROM account",
    )?;
    let accounts_iter = stmt.query_map([], account_from_row)?;

    let mut accounts = Vec::new();
    for account in accounts_iter {
        accounts.push(account?);
    }
    debug!("Fetched {} accounts.", accounts.len());
    Ok(accounts)
}

/// Fetches one account by its number.
///
/// # Errors
///
/// Returns [`Error::InvalidAccount`] when no row matches. The zero-row case
/// is detected with an explicit presence check, never by positioning into
/// an empty result set.
#[instrument(skip(pool))]
pub async fn get_account(pool: &DbPool, account_no: &str) -> Result<Account> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;

    let mut stmt = conn.prepare_cached(
        "SELECT accountNo, bankName, accountHolderName, balance
         FROM account WHERE accountNo = ?1",
    )?;
    let account = stmt
        .query_row(params![account_no], account_from_row)
        .optional()?;

    account.ok_or_else(|| Error::InvalidAccount(account_no.to_string()))
}

/// Inserts a new account row.
///
/// There is no uniqueness pre-check: a duplicate account number fails at
/// the primary-key constraint and surfaces as [`Error::Rusqlite`], not as
/// the domain error.
#[instrument(skip(pool, account), fields(account_no = %account.account_no))]
pub async fn add_account(pool: &DbPool, account: &Account) -> Result<()> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;

    let mut stmt = conn.prepare_cached(
        "INSERT INTO account (accountNo, bankName, accountHolderName, balance)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    stmt.execute(params![
        account.account_no,
        account.bank_name,
        account.account_holder_name,
        account.balance,
    ])?;

    info!(
        "Added account {} ({}, holder: {}) with balance {:.2}",
        account.account_no, account.bank_name, account.account_holder_name, account.balance
    );
    Ok(())
}

/// Deletes the account with the given number.
///
/// # Errors
///
/// Returns [`Error::InvalidAccount`] when no such account exists. Postings
/// already logged against the account are left in place (dangling
/// references are permitted).
#[instrument(skip(pool))]
pub async fn remove_account(pool: &DbPool, account_no: &str) -> Result<()> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;

    let rows_deleted = conn.execute(
        "DELETE FROM account WHERE accountNo = ?1",
        params![account_no],
    )?;
    if rows_deleted == 0 {
        return Err(Error::InvalidAccount(account_no.to_string()));
    }

    info!("Removed account {}", account_no);
    Ok(())
}

/// Applies a posting to an account balance: EXPENSE subtracts the amount,
/// INCOME adds it.
///
/// The update is a single atomic statement (`balance = balance ± amount`),
/// so interleaved calls against the same account cannot lose an update.
///
/// # Errors
///
/// Returns [`Error::InvalidAccount`] when the account number has no
/// matching row.
#[instrument(skip(pool))]
pub async fn update_balance(
    pool: &DbPool,
    account_no: &str,
    expense_type: ExpenseType,
    amount: f64,
) -> Result<()> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;

    let sql = match expense_type {
        ExpenseType::Expense => "UPDATE account SET balance = balance - ?1 WHERE accountNo = ?2",
        ExpenseType::Income => "UPDATE account SET balance = balance + ?1 WHERE accountNo = ?2",
    };
    let rows_updated = conn.execute(sql, params![amount, account_no])?;
    if rows_updated == 0 {
        return Err(Error::InvalidAccount(account_no.to_string()));
    }

    info!(
        "Applied {} of {:.2} to account {}",
        expense_type, amount, account_no
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_utils::{init_test_tracing, sample_account, setup_test_db};

    #[tokio::test]
    async fn added_account_is_returned_field_for_field() -> Result<()> {
        init_test_tracing();
        let db_pool = setup_test_db()?;
        let account = sample_account("12345A", 4500.0);

        add_account(&db_pool, &account).await?;
        let fetched = get_account(&db_pool, "12345A").await?;

        assert_eq!(fetched, account);
        Ok(())
    }

    #[tokio::test]
    async fn listing_returns_numbers_and_records_in_storage_order() -> Result<()> {
        init_test_tracing();
        let db_pool = setup_test_db()?;
        add_account(&db_pool, &sample_account("11111A", 10.0)).await?;
        add_account(&db_pool, &sample_account("22222B", 20.0)).await?;
        add_account(&db_pool, &sample_account("33333C", 30.0)).await?;

        let numbers = list_account_numbers(&db_pool).await?;
        assert_eq!(numbers, vec!["11111A", "22222B", "33333C"]);

        let accounts = list_accounts(&db_pool).await?;
        assert_eq!(accounts.len(), 3);
        assert_eq!(accounts[1].account_no, "22222B");
        assert_eq!(accounts[1].balance, 20.0);
        Ok(())
    }

    #[tokio::test]
    async fn fetching_unknown_account_is_the_domain_error() -> Result<()> {
        init_test_tracing();
        let db_pool = setup_test_db()?;

        let err = get_account(&db_pool, "ghost").await.unwrap_err();
        assert!(matches!(err, Error::InvalidAccount(ref no) if no == "ghost"));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_account_number_fails_at_the_constraint() -> Result<()> {
        init_test_tracing();
        let db_pool = setup_test_db()?;
        add_account(&db_pool, &sample_account("12345A", 100.0)).await?;

        let err = add_account(&db_pool, &sample_account("12345A", 200.0))
            .await
            .unwrap_err();
        assert!(
            matches!(err, Error::Rusqlite(_)),
            "duplicate insert must surface the engine constraint, got {:?}",
            err
        );
        Ok(())
    }

    #[tokio::test]
    async fn removing_an_account_deletes_exactly_that_row() -> Result<()> {
        init_test_tracing();
        let db_pool = setup_test_db()?;
        add_account(&db_pool, &sample_account("11111A", 10.0)).await?;
        add_account(&db_pool, &sample_account("22222B", 20.0)).await?;

        remove_account(&db_pool, "11111A").await?;

        let numbers = list_account_numbers(&db_pool).await?;
        assert_eq!(numbers, vec!["22222B"]);
        Ok(())
    }

    #[tokio::test]
    async fn removing_unknown_account_is_the_domain_error() -> Result<()> {
        init_test_tracing();
        let db_pool = setup_test_db()?;

        let err = remove_account(&db_pool, "ghost").await.unwrap_err();
        assert!(matches!(err, Error::InvalidAccount(ref no) if no == "ghost"));
        Ok(())
    }

    #[tokio::test]
    async fn expense_then_income_of_equal_amount_round_trips() -> Result<()> {
        init_test_tracing();
        let db_pool = setup_test_db()?;
        add_account(&db_pool, &sample_account("12345A", 1000.0)).await?;

        update_balance(&db_pool, "12345A", ExpenseType::Expense, 250.0).await?;
        let after_expense = get_account(&db_pool, "12345A").await?;
        assert_eq!(after_expense.balance, 750.0);

        update_balance(&db_pool, "12345A", ExpenseType::Income, 250.0).await?;
        let restored = get_account(&db_pool, "12345A").await?;
        assert_eq!(restored.balance, 1000.0);
        Ok(())
    }

    #[tokio::test]
    async fn zero_amount_posting_leaves_the_balance_untouched() -> Result<()> {
        init_test_tracing();
        let db_pool = setup_test_db()?;
        add_account(&db_pool, &sample_account("12345A", 500.0)).await?;

        update_balance(&db_pool, "12345A", ExpenseType::Expense, 0.0).await?;
        assert_eq!(get_account(&db_pool, "12345A").await?.balance, 500.0);
        Ok(())
    }

    #[tokio::test]
    async fn updating_balance_of_unknown_account_is_the_domain_error() -> Result<()> {
        init_test_tracing();
        let db_pool = setup_test_db()?;

        let err = update_balance(&db_pool, "ghost", ExpenseType::Income, 5.0)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidAccount(ref no) if no == "ghost"));
        Ok(())
    }
}

use dotenvy::dotenv;
use expense_ledger::config;
use expense_ledger::db;
use expense_ledger::errors::Result;
use expense_ledger::models::DATE_FORMAT;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Prints a summary of the stored ledger: every account with its balance,
/// then the most recent postings. Stands in for the out-of-scope UI caller.
#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Resolve configuration and open the database
    let app_config = config::load_app_configuration("config.toml")?;
    info!("Using database at {}", app_config.database_path);

    let db_pool = db::init_db(&app_config.database_path)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 4. Account summary
    let accounts = db::list_accounts(&db_pool).await?;
    info!("{} account(s) on file.", accounts.len());
    for account in &accounts {
        info!(
            "  {} | {} | {} | balance {:.2}",
            account.account_no, account.bank_name, account.account_holder_name, account.balance
        );
    }

    // 5. Recent postings
    let recent = db::get_recent_transactions(&db_pool, 10).await?;
    info!("Last {} transaction(s):", recent.len());
    for tx in &recent {
        info!(
            "  #{} {} {} {:.2} ({})",
            tx.id,
            tx.date.format(DATE_FORMAT),
            tx.expense_type,
            tx.amount,
            tx.account_no
        );
    }

    Ok(())
}

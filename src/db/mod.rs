pub mod accounts;
pub mod connection;
pub(crate) mod schema;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod transactions;

pub use accounts::{
    add_account, get_account, list_account_numbers, list_accounts, remove_account, update_balance,
};
pub use connection::{init_db, DbPool};
pub use transactions::{get_all_transactions, get_recent_transactions, log_transaction};

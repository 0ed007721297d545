use crate::errors::Error;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wire format for transaction dates: two-digit day, two-digit month,
/// four-digit year, dash-separated. Rows written with this format must be
/// parsed back with exactly this format.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// A bank account tracked by the ledger.
///
/// Mirrors the `account` table: the account number is the primary key, the
/// balance is mutated in place by transaction postings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Account {
    pub account_no: String,
    pub bank_name: String,
    pub account_holder_name: String,
    pub balance: f64, // REAL
}

/// Direction of a posting: EXPENSE debits the account, INCOME credits it.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseType {
    Expense,
    Income,
}

impl ExpenseType {
    /// The literal text stored in the `expenseType` column.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "EXPENSE",
            Self::Income => "INCOME",
        }
    }
}

impl fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EXPENSE" => Ok(Self::Expense),
            "INCOME" => Ok(Self::Income),
            other => Err(Error::Corrupt(format!(
                "unknown expense type '{}' (expected EXPENSE or INCOME)",
                other
            ))),
        }
    }
}

/// One row of the append-only transaction log.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    /// Logical reference to an `Account`. Not enforced on insert or on
    /// account deletion, so a dangling reference is possible.
    pub account_no: String,
    pub expense_type: ExpenseType,
    pub amount: f64, // REAL, non-negative by convention
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    /// The single domain error: an operation referenced an account number
    /// with no matching row.
    #[error("Account {0} is invalid.")]
    InvalidAccount(String),

    /// A stored date or expense-type value could not be parsed back.
    #[error("Corrupt ledger record: {0}")]
    Corrupt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Rusqlite error: {0}")]
    Rusqlite(#[from] rusqlite::Error),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

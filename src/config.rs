use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{env, fs, path::Path};

/// Environment variable that overrides the configured database path.
pub const DB_PATH_ENV: &str = "EXPENSE_LEDGER_DB";

/// Fallback database file when neither the environment nor config.toml
/// names one.
pub const DEFAULT_DB_PATH: &str = "data/expense_ledger.sqlite";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: String,
}

#[derive(Deserialize, Debug)]
struct ConfigFile {
    #[serde(default)]
    database: Option<DatabaseSection>,
}

#[derive(Deserialize, Debug)]
struct DatabaseSection {
    path: Option<String>,
}

/// Loads the application configuration.
///
/// Resolution order for the database path: the `EXPENSE_LEDGER_DB`
/// environment variable, then `[database] path` in the given TOML file (if
/// the file exists), then [`DEFAULT_DB_PATH`].
pub fn load_app_configuration<P: AsRef<Path>>(config_path: P) -> Result<AppConfig> {
    if let Ok(path) = env::var(DB_PATH_ENV) {
        tracing::debug!("Using database path from {}: {}", DB_PATH_ENV, path);
        return Ok(AppConfig {
            database_path: path,
        });
    }

    let path_ref = config_path.as_ref();
    if path_ref.exists() {
        tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
        let contents = fs::read_to_string(path_ref).map_err(|e| {
            Error::Config(format!("Failed to read config file {:?}: {}", path_ref, e))
        })?;
        let parsed: ConfigFile = toml::from_str(&contents).map_err(|e| {
            Error::Config(format!(
                "Failed to parse TOML from config file {:?}: {}",
                path_ref, e
            ))
        })?;
        if let Some(path) = parsed.database.and_then(|d| d.path) {
            return Ok(AppConfig {
                database_path: path,
            });
        }
    }

    Ok(AppConfig {
        database_path: DEFAULT_DB_PATH.to_string(),
    })
}

//! Error types for sj-journal

use sj_core::CoreError;
use thiserror::Error;

/// Journal errors
#[derive(Error, Debug)]
pub enum JournalError {
    /// DDL against the journal table failed (J002)
    #[error("[J002] Failed to {action} journal table {table}: {source}")]
    SchemaError {
        action: &'static str,
        table: String,
        #[source]
        source: Box<JournalError>,
    },

    /// A journal query returned something unexpected (J003)
    #[error("[J003] Journal query failed: {0}")]
    QueryError(String),

    /// Configuration file not found (J004)
    #[error("[J004] Journal config file not found: {path}")]
    ConfigNotFound { path: String },

    /// Configuration file could not be parsed (J005)
    #[error("[J005] Failed to parse journal config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Configuration value is invalid (J006)
    #[error("[J006] Invalid journal config: {message}")]
    ConfigInvalid { message: String },

    /// DuckDB driver error with preserved source chain (J007)
    #[error("[J007] DuckDB error: {0}")]
    DuckDb(#[source] duckdb::Error),

    /// SQLite driver error with preserved source chain (J008)
    #[error("[J008] SQLite error: {0}")]
    Sqlite(#[source] rusqlite::Error),

    /// Error from the script layer (J009)
    #[error(transparent)]
    Core(#[from] CoreError),

    /// I/O error with path context (J010)
    #[error("[J010] I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for JournalError
pub type JournalResult<T> = Result<T, JournalError>;

impl From<duckdb::Error> for JournalError {
    fn from(err: duckdb::Error) -> Self {
        JournalError::DuckDb(err)
    }
}

impl From<rusqlite::Error> for JournalError {
    fn from(err: rusqlite::Error) -> Self {
        JournalError::Sqlite(err)
    }
}

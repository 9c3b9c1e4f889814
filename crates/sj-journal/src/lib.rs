//! sj-journal - Journal of applied scripts for scriptjournal
//!
//! Persists [`ExecutedScript`](sj_core::ExecutedScript) records in a database
//! table and keeps that table's schema current: older installations without a
//! fingerprint column are upgraded transparently before any read or write.
//! Dialect differences are confined to [`JournalDialect`]; the sequencing
//! lives once in [`TableJournal`].

pub mod config;
pub mod connection;
pub mod dialect;
pub mod error;
pub mod journal;

pub use config::JournalConfig;
pub use connection::JournalConnection;
pub use dialect::{Dialect, JournalDialect, SqlTableDialect, SqliteDialect};
pub use error::{JournalError, JournalResult};
pub use journal::{Journal, TableJournal};

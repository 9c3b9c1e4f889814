//! SQL dialect strategies for the journal table.
//!
//! A dialect supplies exactly the statements that differ between engines:
//! the `CREATE TABLE` text, the primary-key constraint name, the table and
//! column existence checks, and the add-column statement. Check-then-create
//! sequencing stays in [`TableJournal`](crate::TableJournal).

mod sql_table;
mod sqlite;

pub use sql_table::SqlTableDialect;
pub use sqlite::SqliteDialect;

use crate::connection::JournalConnection;
use crate::error::JournalResult;
use serde::{Deserialize, Serialize};

/// Script name column. Fixed for compatibility with existing journals.
pub const SCRIPT_NAME_COLUMN: &str = "ScriptName";

/// Fingerprint column, added to journals created before it existed.
pub const SCRIPT_HASH_COLUMN: &str = "ScriptHash";

/// Application timestamp column.
pub const APPLIED_COLUMN: &str = "Applied";

/// Engine-specific parts of the journal table.
pub trait JournalDialect: Send + Sync {
    /// Dialect identifier for logging.
    fn name(&self) -> &'static str;

    /// Schema holding the journal table, if the engine has schemas.
    fn schema(&self) -> Option<&str>;

    /// Unquoted journal table name.
    fn table(&self) -> &str;

    /// Name of the auto-incrementing identity column.
    fn key_column(&self) -> &str;

    /// Quote an identifier.
    fn quote(&self, identifier: &str) -> String {
        format!("\"{}\"", identifier.replace('"', "\"\""))
    }

    /// Quoted, schema-qualified journal table name.
    fn qualified_table_name(&self) -> String {
        match self.schema() {
            Some(schema) => format!("{}.{}", self.quote(schema), self.quote(self.table())),
            None => self.quote(self.table()),
        }
    }

    /// Identifier used for the primary-key constraint.
    fn primary_key_name(&self) -> String;

    /// Statement(s) creating the journal table, fingerprint column included.
    fn create_table_sql(&self) -> String;

    /// Whether the journal table exists.
    fn table_exists(&self, conn: &dyn JournalConnection) -> JournalResult<bool>;

    /// Whether the journal table has `column`.
    fn column_exists(&self, conn: &dyn JournalConnection, column: &str) -> JournalResult<bool>;

    /// Add a nullable text column of at most `size` characters.
    fn add_text_column(
        &self,
        conn: &dyn JournalConnection,
        column: &str,
        size: usize,
    ) -> JournalResult<()>;
}

/// Dialect selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// [`SqlTableDialect`]: catalog-based, schema-aware (DuckDB, PostgreSQL)
    #[default]
    SqlTable,
    /// [`SqliteDialect`]: single-file engine without schemas
    Sqlite,
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::SqlTable => write!(f, "sql_table"),
            Dialect::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Escape a value for embedding in a single-quoted SQL literal.
pub(crate) fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

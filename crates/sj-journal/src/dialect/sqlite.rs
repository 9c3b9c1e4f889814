//! Journal table for SQLite.

use super::{quote_literal, JournalDialect, APPLIED_COLUMN, SCRIPT_HASH_COLUMN, SCRIPT_NAME_COLUMN};
use crate::connection::JournalConnection;
use crate::error::JournalResult;

/// Journal table in a SQLite database. SQLite has no schemas, so only the
/// table name is configurable; columns are listed through `PRAGMA table_info`.
#[derive(Debug, Clone)]
pub struct SqliteDialect {
    table: String,
}

impl SqliteDialect {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }
}

impl JournalDialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn schema(&self) -> Option<&str> {
        None
    }

    fn table(&self) -> &str {
        &self.table
    }

    fn key_column(&self) -> &str {
        "SchemaVersionID"
    }

    /// Brackets instead of double quotes: SQLite reads an unknown
    /// double-quoted identifier as a string literal.
    fn quote(&self, identifier: &str) -> String {
        format!("[{}]", identifier.replace(']', "]]"))
    }

    fn primary_key_name(&self) -> String {
        quote_literal(&format!("PK_{}_SchemaVersionID", self.table))
    }

    fn create_table_sql(&self) -> String {
        format!(
            "CREATE TABLE {table} (
    {key} INTEGER CONSTRAINT {pk} PRIMARY KEY AUTOINCREMENT NOT NULL,
    {name} TEXT NOT NULL,
    {hash} TEXT NULL,
    {applied} DATETIME NOT NULL
)",
            table = self.qualified_table_name(),
            key = self.key_column(),
            pk = self.primary_key_name(),
            name = SCRIPT_NAME_COLUMN,
            hash = SCRIPT_HASH_COLUMN,
            applied = APPLIED_COLUMN,
        )
    }

    fn table_exists(&self, conn: &dyn JournalConnection) -> JournalResult<bool> {
        let count = conn.query_count(
            "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = ? COLLATE NOCASE",
            &[Some(self.table.as_str())],
        )?;
        Ok(count == 1)
    }

    fn column_exists(&self, conn: &dyn JournalConnection, column: &str) -> JournalResult<bool> {
        let sql = format!("PRAGMA table_info({})", quote_literal(&self.table));
        // table_info rows: cid, name, type, notnull, dflt_value, pk
        let rows = conn.query_text_rows(&sql, &[], &[1])?;
        Ok(rows
            .iter()
            .filter_map(|row| row.first().and_then(|name| name.as_deref()))
            .any(|name| name.eq_ignore_ascii_case(column)))
    }

    fn add_text_column(
        &self,
        conn: &dyn JournalConnection,
        column: &str,
        _size: usize,
    ) -> JournalResult<()> {
        let sql = format!(
            "ALTER TABLE {} ADD COLUMN {} TEXT",
            self.qualified_table_name(),
            column
        );
        conn.execute_batch(&sql)
    }
}

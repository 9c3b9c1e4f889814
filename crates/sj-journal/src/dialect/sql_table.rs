//! Catalog-based journal table for schema-aware engines.

use super::{quote_literal, JournalDialect, APPLIED_COLUMN, SCRIPT_HASH_COLUMN, SCRIPT_NAME_COLUMN};
use crate::connection::JournalConnection;
use crate::error::JournalResult;

/// Journal table in a configurable schema, introspected through
/// `information_schema`.
///
/// The identity key is backed by a sequence, which DuckDB and PostgreSQL both
/// accept. Without a configured schema the connection's `current_schema()`
/// is used.
#[derive(Debug, Clone)]
pub struct SqlTableDialect {
    schema: Option<String>,
    table: String,
}

impl SqlTableDialect {
    pub fn new(schema: Option<String>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.filter(|s| !s.is_empty()),
            table: table.into(),
        }
    }

    fn sequence_name(&self) -> String {
        let seq = format!("{}_Id_seq", self.table);
        match &self.schema {
            Some(schema) => format!("{}.{}", self.quote(schema), self.quote(&seq)),
            None => self.quote(&seq),
        }
    }

    /// `table_schema` predicate plus its bind value, if any.
    fn schema_predicate(&self) -> (&'static str, Option<&str>) {
        match &self.schema {
            Some(schema) => ("table_schema = ?", Some(schema.as_str())),
            None => ("table_schema = current_schema()", None),
        }
    }
}

impl JournalDialect for SqlTableDialect {
    fn name(&self) -> &'static str {
        "sql_table"
    }

    fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    fn table(&self) -> &str {
        &self.table
    }

    fn key_column(&self) -> &str {
        "Id"
    }

    fn primary_key_name(&self) -> String {
        self.quote(&format!("PK_{}_Id", self.table))
    }

    fn create_table_sql(&self) -> String {
        let mut sql = String::new();
        if let Some(schema) = &self.schema {
            sql.push_str(&format!("CREATE SCHEMA IF NOT EXISTS {};\n", self.quote(schema)));
        }
        let sequence = self.sequence_name();
        sql.push_str(&format!("CREATE SEQUENCE IF NOT EXISTS {sequence};\n"));
        sql.push_str(&format!(
            "CREATE TABLE {table} (
    {key} BIGINT DEFAULT nextval({seq_literal}) CONSTRAINT {pk} PRIMARY KEY,
    {name} VARCHAR(255) NOT NULL,
    {hash} VARCHAR(255),
    {applied} TIMESTAMP NOT NULL
);",
            table = self.qualified_table_name(),
            key = self.quote(self.key_column()),
            seq_literal = quote_literal(&sequence),
            pk = self.primary_key_name(),
            name = self.quote(SCRIPT_NAME_COLUMN),
            hash = self.quote(SCRIPT_HASH_COLUMN),
            applied = self.quote(APPLIED_COLUMN),
        ));
        sql
    }

    fn table_exists(&self, conn: &dyn JournalConnection) -> JournalResult<bool> {
        let (predicate, schema) = self.schema_predicate();
        let sql = format!(
            "SELECT COUNT(*) FROM information_schema.tables WHERE {predicate} AND table_name = ?"
        );
        let params: Vec<Option<&str>> = schema
            .into_iter()
            .map(Some)
            .chain(std::iter::once(Some(self.table.as_str())))
            .collect();
        Ok(conn.query_count(&sql, &params)? > 0)
    }

    fn column_exists(&self, conn: &dyn JournalConnection, column: &str) -> JournalResult<bool> {
        let (predicate, schema) = self.schema_predicate();
        let sql = format!(
            "SELECT COUNT(*) FROM information_schema.columns \
             WHERE {predicate} AND table_name = ? AND lower(column_name) = lower(?)"
        );
        let params: Vec<Option<&str>> = schema
            .into_iter()
            .map(Some)
            .chain([Some(self.table.as_str()), Some(column)])
            .collect();
        Ok(conn.query_count(&sql, &params)? > 0)
    }

    fn add_text_column(
        &self,
        conn: &dyn JournalConnection,
        column: &str,
        size: usize,
    ) -> JournalResult<()> {
        let sql = format!(
            "ALTER TABLE {} ADD COLUMN {} VARCHAR({size})",
            self.qualified_table_name(),
            self.quote(column)
        );
        conn.execute_batch(&sql)
    }
}

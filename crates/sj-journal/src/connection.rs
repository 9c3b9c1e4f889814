//! Execution context the journal issues statements against.
//!
//! The journal never opens, pools, or commits connections; callers hand it
//! whatever connection (or open transaction) the upgrade runs on. Parameters
//! are text or NULL, which covers every value the journal binds.

use crate::error::JournalResult;

/// Minimal statement-execution surface needed by the journal.
pub trait JournalConnection {
    /// Backend identifier for logging.
    fn backend(&self) -> &'static str;

    /// Execute a single statement, returning affected rows.
    fn execute(&self, sql: &str, params: &[Option<&str>]) -> JournalResult<usize>;

    /// Execute one or more statements without parameters.
    fn execute_batch(&self, sql: &str) -> JournalResult<()>;

    /// Run a query whose first column of the first row is an integer count.
    fn query_count(&self, sql: &str, params: &[Option<&str>]) -> JournalResult<i64>;

    /// Run a query and read the given column indexes of every row as text.
    fn query_text_rows(
        &self,
        sql: &str,
        params: &[Option<&str>],
        columns: &[usize],
    ) -> JournalResult<Vec<Vec<Option<String>>>>;
}

impl JournalConnection for duckdb::Connection {
    fn backend(&self) -> &'static str {
        "duckdb"
    }

    fn execute(&self, sql: &str, params: &[Option<&str>]) -> JournalResult<usize> {
        let affected =
            duckdb::Connection::execute(self, sql, duckdb::params_from_iter(params.iter()))?;
        Ok(affected)
    }

    fn execute_batch(&self, sql: &str) -> JournalResult<()> {
        duckdb::Connection::execute_batch(self, sql)?;
        Ok(())
    }

    fn query_count(&self, sql: &str, params: &[Option<&str>]) -> JournalResult<i64> {
        let count = self.query_row(sql, duckdb::params_from_iter(params.iter()), |row| {
            row.get::<_, i64>(0)
        })?;
        Ok(count)
    }

    fn query_text_rows(
        &self,
        sql: &str,
        params: &[Option<&str>],
        columns: &[usize],
    ) -> JournalResult<Vec<Vec<Option<String>>>> {
        let mut stmt = self.prepare(sql)?;
        let rows = stmt.query_map(duckdb::params_from_iter(params.iter()), |row| {
            columns
                .iter()
                .map(|&i| row.get::<_, Option<String>>(i))
                .collect::<Result<Vec<_>, _>>()
        })?;
        let collected = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(collected)
    }
}

impl JournalConnection for rusqlite::Connection {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    fn execute(&self, sql: &str, params: &[Option<&str>]) -> JournalResult<usize> {
        let affected =
            rusqlite::Connection::execute(self, sql, rusqlite::params_from_iter(params.iter()))?;
        Ok(affected)
    }

    fn execute_batch(&self, sql: &str) -> JournalResult<()> {
        rusqlite::Connection::execute_batch(self, sql)?;
        Ok(())
    }

    fn query_count(&self, sql: &str, params: &[Option<&str>]) -> JournalResult<i64> {
        let count = self.query_row(sql, rusqlite::params_from_iter(params.iter()), |row| {
            row.get::<_, i64>(0)
        })?;
        Ok(count)
    }

    fn query_text_rows(
        &self,
        sql: &str,
        params: &[Option<&str>],
        columns: &[usize],
    ) -> JournalResult<Vec<Vec<Option<String>>>> {
        let mut stmt = self.prepare(sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), |row| {
            columns
                .iter()
                .map(|&i| row.get::<_, Option<String>>(i))
                .collect::<Result<Vec<_>, _>>()
        })?;
        let collected = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(collected)
    }
}

#[cfg(test)]
#[path = "connection_test.rs"]
mod tests;

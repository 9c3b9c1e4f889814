//! Journal of executed scripts backed by a database table.

use crate::connection::JournalConnection;
use crate::dialect::{JournalDialect, APPLIED_COLUMN, SCRIPT_HASH_COLUMN, SCRIPT_NAME_COLUMN};
use crate::error::{JournalError, JournalResult};
use chrono::Utc;
use sj_core::{ExecutedScript, LogUpgradeLog, SqlScript, UpgradeLog};
use std::sync::Arc;

/// Default size of the fingerprint column where the engine needs one.
pub const DEFAULT_HASH_COLUMN_SIZE: usize = 255;

/// Durable record of applied scripts.
///
/// Every operation runs against the connection it is given; the journal does
/// not manage connections or transactions.
pub trait Journal {
    /// Create the journal table if it does not exist.
    fn ensure_table_exists(&self, conn: &dyn JournalConnection) -> JournalResult<()>;

    /// Add the fingerprint column to a journal table created without it.
    fn ensure_fingerprint_column_exists(&self, conn: &dyn JournalConnection)
        -> JournalResult<()>;

    /// All recorded scripts, oldest first. Empty when no journal table exists.
    fn get_executed_scripts(
        &self,
        conn: &dyn JournalConnection,
    ) -> JournalResult<Vec<ExecutedScript>>;

    /// Append a record for `script`, stamped with the current time.
    fn store_executed_script(
        &self,
        conn: &dyn JournalConnection,
        script: &SqlScript,
    ) -> JournalResult<()>;
}

/// [`Journal`] over a single table whose engine specifics come from a
/// [`JournalDialect`].
///
/// DDL is check-then-act. When a create or alter fails and a re-check shows the
/// object now exists, another process won the race and the failure is
/// ignored. The fingerprint column is verified on the given connection before
/// every read or write, since one journal may serve several databases.
pub struct TableJournal {
    dialect: Box<dyn JournalDialect>,
    log: Arc<dyn UpgradeLog>,
    hash_column_size: usize,
}

impl TableJournal {
    /// Create a journal reporting progress through the `log` crate.
    pub fn new(dialect: impl JournalDialect + 'static) -> Self {
        Self::from_boxed(Box::new(dialect), Arc::new(LogUpgradeLog))
    }

    pub fn from_boxed(dialect: Box<dyn JournalDialect>, log: Arc<dyn UpgradeLog>) -> Self {
        Self {
            dialect,
            log,
            hash_column_size: DEFAULT_HASH_COLUMN_SIZE,
        }
    }

    /// Route progress messages to `log`.
    pub fn with_log(mut self, log: Arc<dyn UpgradeLog>) -> Self {
        self.log = log;
        self
    }

    /// Size used when adding the fingerprint column.
    pub fn with_hash_column_size(mut self, size: usize) -> Self {
        self.hash_column_size = size;
        self
    }

    pub fn dialect(&self) -> &dyn JournalDialect {
        self.dialect.as_ref()
    }

    fn schema_error(&self, action: &'static str, source: JournalError) -> JournalError {
        JournalError::SchemaError {
            action,
            table: self.dialect.qualified_table_name(),
            source: Box::new(source),
        }
    }
}

impl Journal for TableJournal {
    fn ensure_table_exists(&self, conn: &dyn JournalConnection) -> JournalResult<()> {
        if self.dialect.table_exists(conn)? {
            return Ok(());
        }

        let table = self.dialect.qualified_table_name();
        self.log
            .write_information(&format!("Creating the {table} table"));
        log::debug!(
            "Creating journal table {table} with {} dialect on {}",
            self.dialect.name(),
            conn.backend()
        );

        if let Err(e) = conn.execute_batch(&self.dialect.create_table_sql()) {
            if self.dialect.table_exists(conn).unwrap_or(false) {
                log::debug!("Journal table {table} was created concurrently: {e}");
            } else {
                self.log
                    .write_error(&format!("Failed to create the {table} table: {e}"));
                return Err(self.schema_error("create", e));
            }
        } else {
            self.log
                .write_information(&format!("The {table} table has been created"));
        }
        Ok(())
    }

    fn ensure_fingerprint_column_exists(
        &self,
        conn: &dyn JournalConnection,
    ) -> JournalResult<()> {
        if self.dialect.column_exists(conn, SCRIPT_HASH_COLUMN)? {
            return Ok(());
        }

        let table = self.dialect.qualified_table_name();
        self.log.write_information(&format!(
            "Adding the {SCRIPT_HASH_COLUMN} column to the {table} table"
        ));

        if let Err(e) =
            self.dialect
                .add_text_column(conn, SCRIPT_HASH_COLUMN, self.hash_column_size)
        {
            if self
                .dialect
                .column_exists(conn, SCRIPT_HASH_COLUMN)
                .unwrap_or(false)
            {
                log::debug!("{SCRIPT_HASH_COLUMN} column on {table} was added concurrently: {e}");
            } else {
                self.log.write_error(&format!(
                    "Failed to add the {SCRIPT_HASH_COLUMN} column to the {table} table: {e}"
                ));
                return Err(self.schema_error("alter", e));
            }
        } else {
            self.log.write_information(&format!(
                "The {SCRIPT_HASH_COLUMN} column has been added to the {table} table"
            ));
        }
        Ok(())
    }

    fn get_executed_scripts(
        &self,
        conn: &dyn JournalConnection,
    ) -> JournalResult<Vec<ExecutedScript>> {
        if !self.dialect.table_exists(conn)? {
            log::debug!(
                "Journal table {} does not exist; no scripts executed yet",
                self.dialect.qualified_table_name()
            );
            return Ok(Vec::new());
        }
        self.ensure_fingerprint_column_exists(conn)?;

        let d = self.dialect.as_ref();
        let sql = format!(
            "SELECT {name}, {hash} FROM {table} ORDER BY {applied}, {key}",
            name = d.quote(SCRIPT_NAME_COLUMN),
            hash = d.quote(SCRIPT_HASH_COLUMN),
            table = d.qualified_table_name(),
            applied = d.quote(APPLIED_COLUMN),
            key = d.quote(d.key_column()),
        );
        let rows = conn.query_text_rows(&sql, &[], &[0, 1])?;

        rows.into_iter()
            .map(|row| {
                let mut columns = row.into_iter();
                let name = columns.next().flatten().ok_or_else(|| {
                    JournalError::QueryError(format!(
                        "journal row in {} has no {SCRIPT_NAME_COLUMN}",
                        d.qualified_table_name()
                    ))
                })?;
                Ok(ExecutedScript::new(name, columns.next().flatten()))
            })
            .collect()
    }

    fn store_executed_script(
        &self,
        conn: &dyn JournalConnection,
        script: &SqlScript,
    ) -> JournalResult<()> {
        self.ensure_table_exists(conn)?;
        self.ensure_fingerprint_column_exists(conn)?;

        let d = self.dialect.as_ref();
        let sql = format!(
            "INSERT INTO {table} ({name}, {hash}, {applied}) VALUES (?, ?, ?)",
            table = d.qualified_table_name(),
            name = d.quote(SCRIPT_NAME_COLUMN),
            hash = d.quote(SCRIPT_HASH_COLUMN),
            applied = d.quote(APPLIED_COLUMN),
        );
        let applied = Utc::now().format("%Y-%m-%d %H:%M:%S%.6f").to_string();
        conn.execute(
            &sql,
            &[
                Some(script.name().as_str()),
                Some(script.hash()),
                Some(applied.as_str()),
            ],
        )?;
        log::debug!("Recorded {} as applied at {applied}", script.name());
        Ok(())
    }
}

#[cfg(test)]
#[path = "journal_test.rs"]
mod tests;

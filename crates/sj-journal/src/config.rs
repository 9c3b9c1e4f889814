//! Journal configuration, typically read from `journal.yml`.

use crate::dialect::{Dialect, JournalDialect, SqlTableDialect, SqliteDialect};
use crate::error::{JournalError, JournalResult};
use crate::journal::{TableJournal, DEFAULT_HASH_COLUMN_SIZE};
use serde::{Deserialize, Serialize};
use sj_core::{HashAlgorithm, Hasher, UpgradeLog};
use std::path::Path;
use std::sync::Arc;

/// Where and how applied scripts are journaled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JournalConfig {
    /// Journal table dialect
    #[serde(default)]
    pub dialect: Dialect,

    /// Schema holding the journal table (not supported by sqlite)
    #[serde(default)]
    pub schema: Option<String>,

    /// Journal table name
    #[serde(default = "default_table")]
    pub table: String,

    /// Algorithm used to fingerprint scripts
    #[serde(default)]
    pub hash_algorithm: HashAlgorithm,

    /// Size of the fingerprint column when it has to be added
    #[serde(default = "default_hash_column_size")]
    pub hash_column_size: usize,
}

const DEFAULT_TABLE: &str = "SchemaVersions";

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_hash_column_size() -> usize {
    DEFAULT_HASH_COLUMN_SIZE
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            schema: None,
            table: default_table(),
            hash_algorithm: HashAlgorithm::default(),
            hash_column_size: default_hash_column_size(),
        }
    }
}

impl JournalConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> JournalResult<Self> {
        if !path.exists() {
            return Err(JournalError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| JournalError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> JournalResult<Self> {
        let config: JournalConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> JournalResult<()> {
        if self.table.trim().is_empty() {
            return Err(JournalError::ConfigInvalid {
                message: "journal table name cannot be empty".to_string(),
            });
        }
        if self.dialect == Dialect::Sqlite && self.schema.as_deref().is_some_and(|s| !s.is_empty())
        {
            return Err(JournalError::ConfigInvalid {
                message: "sqlite journals do not support a schema".to_string(),
            });
        }
        if self.hash_column_size == 0 {
            return Err(JournalError::ConfigInvalid {
                message: "hash_column_size must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Build the dialect strategy for this configuration
    pub fn build_dialect(&self) -> Box<dyn JournalDialect> {
        match self.dialect {
            Dialect::SqlTable => Box::new(SqlTableDialect::new(
                self.schema.clone(),
                self.table.clone(),
            )),
            Dialect::Sqlite => Box::new(SqliteDialect::new(self.table.clone())),
        }
    }

    /// Build a journal reporting to `log`
    pub fn build_journal(&self, log: Arc<dyn UpgradeLog>) -> JournalResult<TableJournal> {
        self.validate()?;
        Ok(TableJournal::from_boxed(self.build_dialect(), log)
            .with_hash_column_size(self.hash_column_size))
    }

    /// Hasher scripts must be fingerprinted with to match this journal
    pub fn hasher(&self) -> Arc<dyn Hasher> {
        self.hash_algorithm.hasher()
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

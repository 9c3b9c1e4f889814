//! Journal records of previously executed scripts.

use serde::{Deserialize, Deserializer, Serialize};

/// A script recorded in the journal as applied.
///
/// Rows written before the journal stored fingerprints have no hash. Such
/// legacy records match any candidate with the same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutedScript {
    name: String,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    hash: Option<String>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|h| !h.is_empty()))
}

impl ExecutedScript {
    /// Create a record. An empty hash is stored as absent.
    pub fn new(name: impl Into<String>, hash: Option<String>) -> Self {
        Self {
            name: name.into(),
            hash: hash.filter(|h| !h.is_empty()),
        }
    }

    /// Create a record without a fingerprint.
    pub fn legacy(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }

    /// Name of the executed script.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stored fingerprint, `None` for legacy rows.
    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    /// Whether this row predates fingerprint storage.
    pub fn is_legacy(&self) -> bool {
        self.hash.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_hash_is_legacy() {
        let record = ExecutedScript::new("0001_init.sql", Some(String::new()));
        assert!(record.is_legacy());
        assert_eq!(record.hash(), None);
    }

    #[test]
    fn test_deserialized_empty_hash_is_legacy() {
        let record: ExecutedScript =
            serde_yaml::from_str("name: 0001_init.sql\nhash: ''").unwrap();
        assert!(record.is_legacy());
        assert_eq!(record, ExecutedScript::legacy("0001_init.sql"));

        let script = crate::SqlScript::new("0001_init.sql", "CREATE TABLE users (id INT)");
        assert_eq!(
            script.match_to(Some(&record)).unwrap(),
            crate::MatchOutcome::Matched
        );
    }

    #[test]
    fn test_hash_is_kept() {
        let record = ExecutedScript::new("0001_init.sql", Some("MD5alg_abc".to_string()));
        assert!(!record.is_legacy());
        assert_eq!(record.hash(), Some("MD5alg_abc"));
        assert_eq!(record.name(), "0001_init.sql");
    }
}

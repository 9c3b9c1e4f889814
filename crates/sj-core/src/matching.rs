//! Outcome of comparing a candidate script against the journal.

use serde::Serialize;

/// Classification produced by [`SqlScript::match_to`](crate::SqlScript::match_to).
///
/// A journal written by a different hasher is not an outcome but an error
/// ([`CoreError::UntrustedJournal`](crate::CoreError::UntrustedJournal)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// No journal record for this script; it must run.
    NotApplied,
    /// Already applied with identical content (or recorded by name only).
    Matched,
    /// Applied before, but the content changed since.
    Changed {
        stored_hash: String,
        current_hash: String,
    },
}

impl MatchOutcome {
    /// Whether the script has to be executed.
    pub fn must_run(&self) -> bool {
        !matches!(self, MatchOutcome::Matched)
    }

    /// Whether the script was applied before with different content.
    pub fn is_changed(&self) -> bool {
        matches!(self, MatchOutcome::Changed { .. })
    }
}

impl std::fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchOutcome::NotApplied => write!(f, "not applied"),
            MatchOutcome::Matched => write!(f, "matched"),
            MatchOutcome::Changed {
                stored_hash,
                current_hash,
            } => write!(f, "changed (journal {stored_hash}, current {current_hash})"),
        }
    }
}

//! sj-core - Core library for scriptjournal
//!
//! This crate decides whether a versioned SQL script has already been applied
//! to a database. It provides self-describing script fingerprints, the match
//! rule comparing a candidate script against a journal record, and a pure
//! upgrade plan built from both. It never touches a database; persistence of
//! journal records lives in `sj-journal`.

pub mod error;
pub mod executed;
pub mod hasher;
pub mod matching;
mod newtype_string;
pub mod plan;
pub mod script;
pub mod script_name;
pub mod upgrade_log;

pub use error::{CoreError, CoreResult};
pub use executed::ExecutedScript;
pub use hasher::{HashAlgorithm, Hasher, Md5WithMarkHasher, Sha256WithMarkHasher};
pub use matching::MatchOutcome;
pub use plan::{ScriptDecision, UpgradePlan};
pub use script::SqlScript;
pub use script_name::ScriptName;
pub use upgrade_log::{LogLevel, LogUpgradeLog, NoopUpgradeLog, RecordingUpgradeLog, UpgradeLog};

//! Error types for sj-core

use thiserror::Error;

/// Core error type for scriptjournal
#[derive(Error, Debug)]
pub enum CoreError {
    /// S001: Journal fingerprint was not produced by the configured hasher
    #[error(
        "[S001] Journal entry for script '{script}' has fingerprint '{stored_hash}' which was not produced by the configured {mark} hasher. Use the same hasher that wrote the journal to avoid executing scripts again."
    )]
    UntrustedJournal {
        script: String,
        stored_hash: String,
        mark: String,
    },

    /// S002: Two candidate scripts share a name
    #[error("[S002] Duplicate script name: {name}")]
    DuplicateScript { name: String },

    /// S003: Script could not be read from disk or a stream
    #[error("[S003] Failed to read script {path}: {source}")]
    ScriptIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// S004: Script name is empty
    #[error("[S004] Invalid script name: {reason}")]
    InvalidScriptName { reason: String },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

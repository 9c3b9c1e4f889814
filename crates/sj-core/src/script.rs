//! Candidate SQL scripts and the match rule.

use crate::error::{CoreError, CoreResult};
use crate::executed::ExecutedScript;
use crate::hasher::{Hasher, Md5WithMarkHasher};
use crate::matching::MatchOutcome;
use crate::script_name::ScriptName;
use once_cell::sync::{Lazy, OnceCell};
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

type ContentLoader = Box<dyn FnOnce() -> String + Send>;

enum Contents {
    Loaded(String),
    Deferred(Lazy<String, ContentLoader>),
}

/// A named unit of SQL text that may need to be applied.
///
/// The fingerprint covers the name immediately followed by the contents, with
/// no delimiter, so `("ab", "c")` and `("a", "bc")` share a fingerprint. It is
/// computed on first use and cached for the lifetime of the value.
pub struct SqlScript {
    name: ScriptName,
    contents: Contents,
    hasher: Arc<dyn Hasher>,
    hash: OnceCell<String>,
}

impl SqlScript {
    /// Create a script hashed with the default [`Md5WithMarkHasher`].
    ///
    /// Panics if `name` is empty; use [`try_new`](Self::try_new) for untrusted names.
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self::with_hasher(ScriptName::new(name), contents, Arc::new(Md5WithMarkHasher))
    }

    /// Create a script, rejecting an empty name.
    pub fn try_new(name: impl Into<String>, contents: impl Into<String>) -> CoreResult<Self> {
        let name = ScriptName::try_new(name).ok_or_else(|| CoreError::InvalidScriptName {
            reason: "script name must not be empty".to_string(),
        })?;
        Ok(Self::with_hasher(name, contents, Arc::new(Md5WithMarkHasher)))
    }

    /// Create a script using a specific hasher.
    pub fn with_hasher(
        name: ScriptName,
        contents: impl Into<String>,
        hasher: Arc<dyn Hasher>,
    ) -> Self {
        Self {
            name,
            contents: Contents::Loaded(contents.into()),
            hasher,
            hash: OnceCell::new(),
        }
    }

    /// Create a script whose contents are produced by `loader` on first access.
    ///
    /// The loader runs at most once, when [`contents`](Self::contents) or
    /// [`hash`](Self::hash) is first called. A script that is never hashed or
    /// read never loads its body.
    pub fn lazy<F>(name: ScriptName, loader: F, hasher: Arc<dyn Hasher>) -> Self
    where
        F: FnOnce() -> String + Send + 'static,
    {
        let loader: ContentLoader = Box::new(loader);
        Self {
            name,
            contents: Contents::Deferred(Lazy::new(loader)),
            hasher,
            hash: OnceCell::new(),
        }
    }

    /// Read a script from a UTF-8 file, named after the file.
    ///
    /// A leading byte-order mark is dropped.
    pub fn from_file(path: &Path, hasher: Arc<dyn Hasher>) -> CoreResult<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = ScriptName::try_new(file_name).ok_or_else(|| CoreError::InvalidScriptName {
            reason: format!("path {} has no file name", path.display()),
        })?;
        let file = std::fs::File::open(path).map_err(|e| CoreError::ScriptIo {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::read_named(name, file, &path.display().to_string(), hasher)
    }

    /// Read a script from any reader.
    pub fn from_reader<R: Read>(
        name: ScriptName,
        reader: R,
        hasher: Arc<dyn Hasher>,
    ) -> CoreResult<Self> {
        let origin = name.to_string();
        Self::read_named(name, reader, &origin, hasher)
    }

    fn read_named<R: Read>(
        name: ScriptName,
        mut reader: R,
        origin: &str,
        hasher: Arc<dyn Hasher>,
    ) -> CoreResult<Self> {
        let mut contents = String::new();
        reader
            .read_to_string(&mut contents)
            .map_err(|e| CoreError::ScriptIo {
                path: origin.to_string(),
                source: e,
            })?;
        if let Some(stripped) = contents.strip_prefix('\u{feff}') {
            contents = stripped.to_string();
        }
        Ok(Self::with_hasher(name, contents, hasher))
    }

    /// The script name.
    pub fn name(&self) -> &ScriptName {
        &self.name
    }

    /// The SQL text, loading it first for lazy scripts.
    pub fn contents(&self) -> &str {
        match &self.contents {
            Contents::Loaded(s) => s.as_str(),
            Contents::Deferred(lazy) => Lazy::force(lazy).as_str(),
        }
    }

    /// The fingerprint of name and contents, computed once.
    pub fn hash(&self) -> &str {
        self.hash.get_or_init(|| {
            let contents = self.contents();
            let mut input = String::with_capacity(self.name.len() + contents.len());
            input.push_str(&self.name);
            input.push_str(contents);
            self.hasher.generate_hash(&input)
        })
    }

    /// The hasher this script fingerprints with.
    pub fn hasher(&self) -> &Arc<dyn Hasher> {
        &self.hasher
    }

    /// Decide whether this script was already applied according to `executed`.
    ///
    /// Rules, in order:
    /// 1. no record, or a record for another name: [`MatchOutcome::NotApplied`]
    /// 2. record without a fingerprint: [`MatchOutcome::Matched`]
    /// 3. fingerprint without this hasher's mark: [`CoreError::UntrustedJournal`]
    /// 4. equal fingerprints: [`MatchOutcome::Matched`], otherwise
    ///    [`MatchOutcome::Changed`]
    ///
    /// Contents are only loaded when rule 4 is reached.
    pub fn match_to(&self, executed: Option<&ExecutedScript>) -> CoreResult<MatchOutcome> {
        let Some(executed) = executed else {
            return Ok(MatchOutcome::NotApplied);
        };
        if executed.name() != self.name.as_str() {
            return Ok(MatchOutcome::NotApplied);
        }
        let Some(stored) = executed.hash() else {
            return Ok(MatchOutcome::Matched);
        };
        if !self.hasher.verify(stored) {
            return Err(CoreError::UntrustedJournal {
                script: self.name.to_string(),
                stored_hash: stored.to_string(),
                mark: self.hasher.mark().to_string(),
            });
        }

        let current = self.hash();
        if stored == current {
            Ok(MatchOutcome::Matched)
        } else {
            Ok(MatchOutcome::Changed {
                stored_hash: stored.to_string(),
                current_hash: current.to_string(),
            })
        }
    }
}

impl fmt::Debug for SqlScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loaded = match &self.contents {
            Contents::Loaded(_) => true,
            Contents::Deferred(lazy) => Lazy::get(lazy).is_some(),
        };
        f.debug_struct("SqlScript")
            .field("name", &self.name)
            .field("loaded", &loaded)
            .field("hash", &self.hash.get())
            .finish()
    }
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;

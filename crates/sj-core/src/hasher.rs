//! Self-describing script fingerprints.
//!
//! Every fingerprint starts with a literal mark naming the algorithm that
//! produced it (`MD5alg_`, `SHA256alg_`), followed by the base64 digest. The
//! mark is a versioned protocol element: [`Hasher::verify`] only checks for it,
//! so a journal written by a different algorithm is detected without
//! recomputing anything. Changing a digest algorithm requires a new mark.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;

/// Mark prefixed to fingerprints produced by [`Md5WithMarkHasher`].
pub const MD5_MARK: &str = "MD5alg_";

/// Mark prefixed to fingerprints produced by [`Sha256WithMarkHasher`].
pub const SHA256_MARK: &str = "SHA256alg_";

/// Produces and recognises script fingerprints.
pub trait Hasher: Send + Sync {
    /// Compute the fingerprint of `input`. Must be deterministic.
    fn generate_hash(&self, input: &str) -> String;

    /// Whether `hash` carries this hasher's mark.
    ///
    /// Digest correctness is not checked here; the match rule establishes it
    /// by comparing fingerprints for equality.
    fn verify(&self, hash: &str) -> bool;

    /// The literal mark identifying this algorithm.
    fn mark(&self) -> &'static str;
}

fn marked_digest<D: Digest>(mark: &str, input: &str) -> String {
    let digest = D::digest(input.as_bytes());
    let mut out = String::with_capacity(mark.len() + 44);
    out.push_str(mark);
    STANDARD.encode_string(digest, &mut out);
    out
}

/// MD5 digest of the UTF-8 input, base64 encoded, prefixed with `MD5alg_`.
///
/// This is the default hasher; journals written by earlier installations
/// carry its mark.
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5WithMarkHasher;

impl Hasher for Md5WithMarkHasher {
    fn generate_hash(&self, input: &str) -> String {
        marked_digest::<Md5>(MD5_MARK, input)
    }

    fn verify(&self, hash: &str) -> bool {
        hash.starts_with(MD5_MARK)
    }

    fn mark(&self) -> &'static str {
        MD5_MARK
    }
}

/// SHA-256 digest of the UTF-8 input, base64 encoded, prefixed with `SHA256alg_`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256WithMarkHasher;

impl Hasher for Sha256WithMarkHasher {
    fn generate_hash(&self, input: &str) -> String {
        marked_digest::<Sha256>(SHA256_MARK, input)
    }

    fn verify(&self, hash: &str) -> bool {
        hash.starts_with(SHA256_MARK)
    }

    fn mark(&self) -> &'static str {
        SHA256_MARK
    }
}

/// Hash algorithm selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// [`Md5WithMarkHasher`]
    #[default]
    Md5,
    /// [`Sha256WithMarkHasher`]
    Sha256,
}

impl HashAlgorithm {
    /// Build a shareable hasher for this algorithm.
    pub fn hasher(self) -> Arc<dyn Hasher> {
        match self {
            HashAlgorithm::Md5 => Arc::new(Md5WithMarkHasher),
            HashAlgorithm::Sha256 => Arc::new(Sha256WithMarkHasher),
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashAlgorithm::Md5 => write!(f, "md5"),
            HashAlgorithm::Sha256 => write!(f, "sha256"),
        }
    }
}

#[cfg(test)]
#[path = "hasher_test.rs"]
mod tests;

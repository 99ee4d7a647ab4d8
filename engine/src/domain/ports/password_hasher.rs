//! Port for the credential hashing primitive.
//!
//! The core consumes hashing as an injected capability: plaintext goes in,
//! a digest comes out, and verification compares the two. Plaintext is
//! never stored or logged by anything behind this trait.

use thiserror::Error;

/// Errors surfaced by credential hashing adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordHashError {
    /// Hashing or verification failed (malformed digest, parameter error).
    #[error("credential hashing failed: {message}")]
    Hash {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl PasswordHashError {
    /// Helper for hashing failures.
    pub fn hash(message: impl Into<String>) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }
}

/// Credential primitive consumed by the access service.
///
/// Hashing is CPU-bound and synchronous; adapters that need to offload work
/// do so internally.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce a digest for `plaintext`.
    fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError>;

    /// Whether `plaintext` matches `digest`.
    fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, PasswordHashError>;
}

/// Deterministic fixture hasher for tests.
///
/// Digests are the plaintext behind a fixed prefix. Never use outside test
/// code.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

const FIXTURE_PREFIX: &str = "fixture::";

impl PasswordHasher for FixturePasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError> {
        Ok(format!("{FIXTURE_PREFIX}{plaintext}"))
    }

    fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, PasswordHashError> {
        Ok(digest
            .strip_prefix(FIXTURE_PREFIX)
            .is_some_and(|stored| stored == plaintext))
    }
}

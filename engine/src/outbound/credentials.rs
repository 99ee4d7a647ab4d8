//! Bcrypt-backed implementation of the credential primitive.

use bcrypt::DEFAULT_COST;

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Credential hasher producing bcrypt digests.
///
/// Digests are self-describing, so verification works across cost changes;
/// the cost only applies to newly produced digests.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Hasher with an explicit work factor.
    ///
    /// Tests use a low cost to stay fast; production callers should keep
    /// the default.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError> {
        bcrypt::hash(plaintext, self.cost).map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, PasswordHashError> {
        bcrypt::verify(plaintext, digest).map_err(|err| PasswordHashError::hash(err.to_string()))
    }
}

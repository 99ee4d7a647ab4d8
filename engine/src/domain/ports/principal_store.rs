//! Port for account roster persistence.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::principal::{LoginName, Principal, PrincipalId};

/// Errors surfaced by principal store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrincipalStoreError {
    /// Store connection could not be established.
    #[error("principal store connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("principal store query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl PrincipalStoreError {
    /// Helper for connection related adapter errors.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence port for the account roster.
///
/// `save` doubles as the update path: writing a principal whose identifier
/// already exists overwrites the stored record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    /// Fetch an account by its unique login name.
    async fn find_by_login_name(
        &self,
        login_name: &LoginName,
    ) -> Result<Option<Principal>, PrincipalStoreError>;

    /// Fetch an account by identifier.
    async fn find_by_id(
        &self,
        id: PrincipalId,
    ) -> Result<Option<Principal>, PrincipalStoreError>;

    /// Persist an account, overwriting any record with the same identifier.
    async fn save(&self, principal: &Principal) -> Result<(), PrincipalStoreError>;

    /// Every account on the roster.
    async fn list_all(&self) -> Result<Vec<Principal>, PrincipalStoreError>;
}

/// Fixture implementation for tests that do not exercise the roster.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePrincipalStore;

#[async_trait]
impl PrincipalStore for FixturePrincipalStore {
    async fn find_by_login_name(
        &self,
        _login_name: &LoginName,
    ) -> Result<Option<Principal>, PrincipalStoreError> {
        Ok(None)
    }

    async fn find_by_id(
        &self,
        _id: PrincipalId,
    ) -> Result<Option<Principal>, PrincipalStoreError> {
        Ok(None)
    }

    async fn save(&self, _principal: &Principal) -> Result<(), PrincipalStoreError> {
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Principal>, PrincipalStoreError> {
        Ok(Vec::new())
    }
}

//! Port for sale record persistence.
//!
//! Sales are written exactly once and never updated, so the port only
//! carries a save operation.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::sale::Sale;

/// Errors surfaced by sale store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaleStoreError {
    /// Store connection could not be established.
    #[error("sale store connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Write failed during execution.
    #[error("sale store write failed: {message}")]
    Write {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl SaleStoreError {
    /// Helper for connection related adapter errors.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for write failures.
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
        }
    }
}

/// Persistence port for completed sales.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SaleStore: Send + Sync {
    /// Persist a completed sale.
    async fn save(&self, sale: &Sale) -> Result<(), SaleStoreError>;
}

/// Fixture implementation for tests that do not inspect persisted sales.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSaleStore;

#[async_trait]
impl SaleStore for FixtureSaleStore {
    async fn save(&self, _sale: &Sale) -> Result<(), SaleStoreError> {
        Ok(())
    }
}

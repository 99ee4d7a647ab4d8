//! Port for product catalog persistence.
//!
//! Besides the plain read/write contract, the port carries a conditional
//! quantity write so the stock mutators can run a compare-and-swap keyed on
//! the quantity they read, instead of a lost-update-prone blind write.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::product::{Product, Sku};

/// Errors surfaced by product store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductStoreError {
    /// Store connection could not be established.
    #[error("product store connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("product store query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Conditional quantity write lost a race: the stored quantity no
    /// longer matches the caller's precondition.
    #[error("stock write conflict: expected quantity {expected}, found {actual}")]
    QuantityConflict {
        /// Quantity the caller read before attempting the write.
        expected: u32,
        /// Quantity actually stored at write time.
        actual: u32,
    },
}

impl ProductStoreError {
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

    /// Helper for conditional-write conflicts.
    pub fn quantity_conflict(expected: u32, actual: u32) -> Self {
        Self::QuantityConflict { expected, actual }
    }
}

/// Persistence port for the product catalog.
///
/// # Conditional writes
///
/// [`ProductStore::update_quantity`] only succeeds when the stored quantity
/// still equals `expected`; otherwise it fails with
/// [`ProductStoreError::QuantityConflict`] and changes nothing. Adapters
/// must make the check-and-write atomic with respect to other callers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Persist a new product.
    async fn save(&self, product: &Product) -> Result<(), ProductStoreError>;

    /// Fetch a product by SKU. `None` when no such product exists.
    async fn get(&self, sku: &Sku) -> Result<Option<Product>, ProductStoreError>;

    /// Overwrite a stored product.
    async fn update(&self, product: &Product) -> Result<(), ProductStoreError>;

    /// Conditionally set the on-hand quantity of `sku` to `new`, provided
    /// the stored quantity still equals `expected`.
    async fn update_quantity(
        &self,
        sku: &Sku,
        expected: u32,
        new: u32,
    ) -> Result<(), ProductStoreError>;
}

/// Fixture implementation for tests that do not exercise the catalog.
///
/// Lookups return `None` and writes are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProductStore;

#[async_trait]
impl ProductStore for FixtureProductStore {
    async fn save(&self, _product: &Product) -> Result<(), ProductStoreError> {
        Ok(())
    }

    async fn get(&self, _sku: &Sku) -> Result<Option<Product>, ProductStoreError> {
        Ok(None)
    }

    async fn update(&self, _product: &Product) -> Result<(), ProductStoreError> {
        Ok(())
    }

    async fn update_quantity(
        &self,
        _sku: &Sku,
        _expected: u32,
        _new: u32,
    ) -> Result<(), ProductStoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn fixture_store_lookup_returns_none() {
        let store = FixtureProductStore;
        let sku = Sku::new("sku-1").expect("valid sku");
        let found = store.get(&sku).await.expect("fixture lookup succeeds");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn fixture_store_accepts_conditional_writes() {
        let store = FixtureProductStore;
        let sku = Sku::new("sku-1").expect("valid sku");
        store
            .update_quantity(&sku, 5, 2)
            .await
            .expect("fixture conditional write succeeds");
    }

    #[rstest]
    fn conflict_error_names_both_quantities() {
        let error = ProductStoreError::quantity_conflict(5, 2);
        let message = error.to_string();
        assert!(message.contains("expected quantity 5"));
        assert!(message.contains("found 2"));
    }
}

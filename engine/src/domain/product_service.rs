//! Catalog orchestration and the stock compare-and-swap discipline.
//!
//! The store is network-backed and owns the only authoritative product
//! state; the service holds no cache and re-reads before every mutation.
//! Stock writes go through [`ProductStore::update_quantity`], a conditional
//! write keyed on the quantity that was read, retried a bounded number of
//! times so two concurrent sellers can never both consume the same units.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::json;

use crate::domain::error::Error;
use crate::domain::ports::{ProductStore, ProductStoreError};
use crate::domain::product::{Product, Sku};

/// Attempts per stock mutation before failing fast under contention.
const STOCK_RETRY_BUDGET: u32 = 3;

/// Catalog lookups and mutations over a [`ProductStore`].
pub struct ProductService<S> {
    store: Arc<S>,
}

// Manual impl: cloning shares the store and needs no `S: Clone`.
impl<S> Clone for ProductService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> ProductService<S> {
    /// Create a new service over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S> ProductService<S>
where
    S: ProductStore,
{
    fn map_store_error(error: ProductStoreError) -> Error {
        Error::storage(error.to_string())
    }

    /// Persist a new product.
    ///
    /// Creation carries no stock precondition; any non-negative quantity is
    /// accepted as supplied.
    pub async fn register(&self, product: &Product) -> Result<(), Error> {
        self.store
            .save(product)
            .await
            .map_err(Self::map_store_error)?;
        tracing::info!(sku = %product.sku(), quantity = product.quantity(), "product registered");
        Ok(())
    }

    /// Fetch a product by SKU, failing with `NotFound` on a miss.
    pub async fn find(&self, sku: &Sku) -> Result<Product, Error> {
        self.store
            .get(sku)
            .await
            .map_err(Self::map_store_error)?
            .ok_or_else(|| Error::not_found(format!("no product with sku {sku}")))
    }

    /// Add `amount` units of stock.
    ///
    /// Fails with `InvalidArgument` unless `amount > 0`.
    pub async fn increase_stock(&self, sku: &Sku, amount: u32) -> Result<(), Error> {
        if amount == 0 {
            return Err(Error::invalid_argument(
                "stock amount to add must be positive",
            ));
        }

        for _ in 0..STOCK_RETRY_BUDGET {
            let mut product = self.find(sku).await?;
            let before = product.quantity();
            product.add_stock(amount);

            match self
                .store
                .update_quantity(sku, before, product.quantity())
                .await
            {
                Ok(()) => {
                    tracing::info!(sku = %sku, quantity = product.quantity(), "stock increased");
                    return Ok(());
                }
                Err(ProductStoreError::QuantityConflict { .. }) => continue,
                Err(err) => return Err(Self::map_store_error(err)),
            }
        }

        Err(Self::contention_exhausted(sku))
    }

    /// Remove `amount` units of stock.
    ///
    /// Fails with `InvalidArgument` unless `amount > 0` and with
    /// `InsufficientStock` when `amount` exceeds the freshly read quantity;
    /// the failure leaves the stored state untouched. The conditional write
    /// is keyed on the quantity that was read, so a concurrent seller who
    /// got there first forces a re-read and a re-check of the invariant.
    pub async fn decrease_stock(&self, sku: &Sku, amount: u32) -> Result<(), Error> {
        if amount == 0 {
            return Err(Error::invalid_argument(
                "stock amount to remove must be positive",
            ));
        }

        for _ in 0..STOCK_RETRY_BUDGET {
            let mut product = self.find(sku).await?;
            let before = product.quantity();
            product.remove_stock(amount).map_err(|err| {
                Error::insufficient_stock(format!(
                    "insufficient stock for product {}",
                    product.name()
                ))
                .with_details(json!({
                    "requested": err.requested,
                    "available": err.available,
                }))
            })?;

            match self
                .store
                .update_quantity(sku, before, product.quantity())
                .await
            {
                Ok(()) => {
                    tracing::info!(sku = %sku, quantity = product.quantity(), "stock decreased");
                    return Ok(());
                }
                Err(ProductStoreError::QuantityConflict { .. }) => continue,
                Err(err) => return Err(Self::map_store_error(err)),
            }
        }

        Err(Self::contention_exhausted(sku))
    }

    /// Replace a product's unit price.
    ///
    /// Fails with `InvalidArgument` when `new_price` is negative.
    pub async fn update_price(&self, sku: &Sku, new_price: Decimal) -> Result<(), Error> {
        let mut product = self.find(sku).await?;
        product
            .set_unit_price(new_price)
            .map_err(|err| Error::invalid_argument(err.to_string()))?;

        self.store
            .update(&product)
            .await
            .map_err(Self::map_store_error)?;
        tracing::info!(sku = %sku, price = %new_price, "unit price updated");
        Ok(())
    }

    fn contention_exhausted(sku: &Sku) -> Error {
        Error::storage(format!(
            "stock write for product {sku} kept conflicting; giving up after {STOCK_RETRY_BUDGET} attempts"
        ))
    }
}

//! In-memory product catalog adapter.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{ProductStore, ProductStoreError};
use crate::domain::product::{Product, Sku};

/// Product store over a guarded map.
///
/// The conditional quantity write holds the write lock across its
/// check-and-set, which is what makes concurrent stock mutations safe to
/// race against each other.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    rows: RwLock<HashMap<Sku, Product>>,
}

impl MemoryProductStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn save(&self, product: &Product) -> Result<(), ProductStoreError> {
        let mut rows = self.rows.write().await;
        rows.insert(product.sku().clone(), product.clone());
        Ok(())
    }

    async fn get(&self, sku: &Sku) -> Result<Option<Product>, ProductStoreError> {
        let rows = self.rows.read().await;
        Ok(rows.get(sku).cloned())
    }

    async fn update(&self, product: &Product) -> Result<(), ProductStoreError> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(product.sku()) {
            Some(stored) => {
                *stored = product.clone();
                Ok(())
            }
            None => Err(ProductStoreError::query(format!(
                "no stored product with sku {}",
                product.sku()
            ))),
        }
    }

    async fn update_quantity(
        &self,
        sku: &Sku,
        expected: u32,
        new: u32,
    ) -> Result<(), ProductStoreError> {
        let mut rows = self.rows.write().await;
        let stored = rows.get_mut(sku).ok_or_else(|| {
            ProductStoreError::query(format!("no stored product with sku {sku}"))
        })?;

        if stored.quantity() != expected {
            return Err(ProductStoreError::quantity_conflict(
                expected,
                stored.quantity(),
            ));
        }
        stored.set_quantity(new);
        Ok(())
    }
}

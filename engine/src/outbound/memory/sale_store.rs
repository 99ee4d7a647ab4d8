//! In-memory sale record adapter.
//!
//! Sales are flattened to their persisted [`SaleRecord`] form on the way
//! in, the same shape the network store keeps.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{SaleStore, SaleStoreError};
use crate::domain::sale::{Sale, SaleId, SaleRecord};

/// Sale store over a guarded map keyed by sale identifier.
#[derive(Debug, Default)]
pub struct MemorySaleStore {
    rows: RwLock<HashMap<SaleId, SaleRecord>>,
}

impl MemorySaleStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a persisted record by sale identifier.
    pub async fn get(&self, id: SaleId) -> Option<SaleRecord> {
        let rows = self.rows.read().await;
        rows.get(&id).cloned()
    }

    /// Number of persisted records.
    pub async fn len(&self) -> usize {
        let rows = self.rows.read().await;
        rows.len()
    }

    /// Whether no records have been persisted.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SaleStore for MemorySaleStore {
    async fn save(&self, sale: &Sale) -> Result<(), SaleStoreError> {
        let mut rows = self.rows.write().await;
        rows.insert(sale.id(), SaleRecord::from(sale.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::permission::Role;
    use crate::domain::principal::{LoginName, Principal, PrincipalId};
    use crate::domain::product::{Product, Sku};
    use crate::domain::sale::{CashierSnapshot, PaymentMethod, ProductSnapshot};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn sample_sale() -> Sale {
        let cashier = Principal::new(
            PrincipalId::new(101),
            "Andreisy Neves",
            LoginName::new("andreisy").expect("valid login"),
            "digest::clerk",
            Role::Clerk,
        )
        .expect("valid principal");
        let product = Product::new(
            Sku::new("sku-1").expect("valid sku"),
            "beverages",
            "Ground Coffee 500g",
            Decimal::new(10_00, 2),
            10,
        )
        .expect("valid product");

        Sale::new(
            SaleId::random(),
            CashierSnapshot::of(&cashier),
            ProductSnapshot::of(&product),
            2,
            PaymentMethod::Pix,
            Decimal::ZERO,
            Utc.with_ymd_and_hms(2024, 11, 5, 14, 30, 0).unwrap(),
        )
        .expect("valid sale")
    }

    #[tokio::test]
    async fn saved_sales_are_stored_as_flat_records() {
        let store = MemorySaleStore::new();
        let sale = sample_sale();
        store.save(&sale).await.expect("save succeeds");

        let record = store.get(sale.id()).await.expect("record exists");
        assert_eq!(record.principal_id, PrincipalId::new(101));
        assert_eq!(record.product_sku, "sku-1");
        assert_eq!(record.total, Decimal::new(20_00, 2));
        assert_eq!(store.len().await, 1);
    }
}

//! The sale transaction pipeline.
//!
//! One entry point turns a request to sell into an immutable financial
//! record: look the product up, validate the discount, consume the stock,
//! build the record, persist it. The steps are strictly ordered and
//! short-circuit on the first failure; the stock decrement is the only side
//! effect before the record write and is attempted exactly once.

use std::sync::Arc;

use mockable::Clock;
use rust_decimal::Decimal;
use serde_json::json;

use crate::domain::access_service::require;
use crate::domain::error::Error;
use crate::domain::permission::Permission;
use crate::domain::ports::{ProductStore, SaleStore};
use crate::domain::principal::Principal;
use crate::domain::product::Sku;
use crate::domain::product_service::ProductService;
use crate::domain::sale::{CashierSnapshot, PaymentMethod, ProductSnapshot, Sale, SaleId};

/// Sale registration over the catalog and the sale store.
pub struct SaleService<P, S> {
    products: ProductService<P>,
    sales: Arc<S>,
    clock: Arc<dyn Clock>,
}

// Manual impl: cloning shares the collaborators and needs no `Clone` bounds.
impl<P, S> Clone for SaleService<P, S> {
    fn clone(&self) -> Self {
        Self {
            products: self.products.clone(),
            sales: Arc::clone(&self.sales),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<P, S> SaleService<P, S> {
    /// Create a new service over the catalog service and sale store.
    pub fn new(products: ProductService<P>, sales: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            products,
            sales,
            clock,
        }
    }
}

impl<P, S> SaleService<P, S>
where
    P: ProductStore,
    S: SaleStore,
{
    /// Execute a full sale transaction and return the persisted record.
    ///
    /// Fails with `AccessDenied` unless `principal` holds
    /// [`Permission::PerformSale`]; with `NotFound` when the SKU is unknown;
    /// with `InvalidDiscount` when the discount falls outside the gross
    /// amount; and with `InsufficientStock` when the request exceeds what is
    /// on hand — in every case before any state changes.
    ///
    /// A sale store failure after the stock decrement surfaces as `Storage`
    /// and is not compensated: the decrement stands and no record exists.
    pub async fn register_sale(
        &self,
        principal: &Principal,
        sku: &Sku,
        quantity: u32,
        payment_method: PaymentMethod,
        discount: Decimal,
    ) -> Result<Sale, Error> {
        require(principal, Permission::PerformSale)?;
        if quantity == 0 {
            return Err(Error::invalid_argument("quantity sold must be positive"));
        }

        let product = self.products.find(sku).await?;

        let gross = product.unit_price() * Decimal::from(quantity);
        if discount.is_sign_negative() || discount > gross {
            return Err(Error::invalid_discount(format!(
                "discount must lie between 0 and the gross amount {gross}"
            ))
            .with_details(json!({
                "discount": discount,
                "gross": gross,
            })));
        }

        self.products.decrease_stock(sku, quantity).await?;

        let sale = Sale::new(
            SaleId::random(),
            CashierSnapshot::of(principal),
            ProductSnapshot::of(&product),
            quantity,
            payment_method,
            discount,
            self.clock.utc(),
        )
        .map_err(|err| Error::invalid_argument(err.to_string()))?;

        if let Err(err) = self.sales.save(&sale).await {
            // The decrement is not rolled back here; the caller sees a
            // storage failure and no sale record exists.
            tracing::warn!(
                sale = %sale.id(),
                sku = %sku,
                error = %err,
                "sale record write failed after the stock decrement"
            );
            return Err(Error::storage(err.to_string()));
        }

        tracing::info!(
            sale = %sale.id(),
            cashier = %sale.cashier().principal_id(),
            sku = %sku,
            total = %sale.total(),
            "sale recorded"
        );
        Ok(sale)
    }
}

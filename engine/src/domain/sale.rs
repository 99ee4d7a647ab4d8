//! Sale data model: an immutable record of one completed transaction.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::principal::{Principal, PrincipalId};
use super::product::{Product, ProductValidationError, Sku};

/// Validation errors returned by the [`Sale`] constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaleValidationError {
    /// Quantity sold must be at least one unit.
    ZeroQuantity,
    /// Cashier display name was blank.
    EmptyCashierName,
    /// Discount was negative or exceeded the gross amount.
    DiscountOutOfRange,
    /// A persisted record's total does not match price, quantity, discount.
    TotalMismatch,
    /// The embedded product snapshot failed validation.
    InvalidProductSnapshot(ProductValidationError),
}

impl fmt::Display for SaleValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroQuantity => write!(f, "quantity sold must be positive"),
            Self::EmptyCashierName => write!(f, "cashier name must not be empty"),
            Self::DiscountOutOfRange => {
                write!(f, "discount must lie between zero and the gross amount")
            }
            Self::TotalMismatch => {
                write!(f, "total does not equal unit price x quantity - discount")
            }
            Self::InvalidProductSnapshot(err) => write!(f, "invalid product snapshot: {err}"),
        }
    }
}

impl std::error::Error for SaleValidationError {}

impl From<ProductValidationError> for SaleValidationError {
    fn from(value: ProductValidationError) -> Self {
        Self::InvalidProductSnapshot(value)
    }
}

/// Unique sale identifier, generated per transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(Uuid);

impl SaleId {
    /// Generate a fresh collision-free identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for SaleId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash.
    Cash,
    /// Brazilian instant payment.
    Pix,
    /// Debit card.
    DebitCard,
    /// Credit card.
    CreditCard,
}

impl PaymentMethod {
    /// Human-readable label suitable for display surfaces.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Pix => "PIX",
            Self::DebitCard => "Debit Card",
            Self::CreditCard => "Credit Card",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identity of the principal who performed a sale, copied at sale time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashierSnapshot {
    principal_id: PrincipalId,
    display_name: String,
}

impl CashierSnapshot {
    /// Copy the identity of `principal` as it stands right now.
    pub fn of(principal: &Principal) -> Self {
        Self {
            principal_id: principal.id(),
            display_name: principal.display_name().to_owned(),
        }
    }

    /// Identifier of the principal.
    pub fn principal_id(&self) -> PrincipalId {
        self.principal_id
    }

    /// Display name at sale time.
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }
}

/// Product state copied at sale time.
///
/// Subsequent catalog mutations never alter this snapshot, so historical
/// sales stay stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    sku: Sku,
    name: String,
    unit_price: Decimal,
}

impl ProductSnapshot {
    /// Copy the sellable state of `product` as it stands right now.
    pub fn of(product: &Product) -> Self {
        Self {
            sku: product.sku().clone(),
            name: product.name().to_owned(),
            unit_price: product.unit_price(),
        }
    }

    /// SKU of the product sold.
    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    /// Product name at sale time.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Unit price at sale time.
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }
}

/// An immutable record of one completed transaction.
///
/// ## Invariants
/// - `0 <= discount <= unit_price * quantity`.
/// - `total = unit_price * quantity - discount`, computed exactly once at
///   construction and never recomputed.
/// - The embedded snapshots are owned copies; the record holds no live
///   references to catalog or roster state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "SaleRecord", into = "SaleRecord")]
pub struct Sale {
    id: SaleId,
    cashier: CashierSnapshot,
    product: ProductSnapshot,
    quantity: u32,
    payment_method: PaymentMethod,
    discount: Decimal,
    total: Decimal,
    recorded_at: DateTime<Utc>,
}

impl Sale {
    /// Build the record for a completed transaction.
    ///
    /// `total` is derived here from the snapshot price, `quantity`, and
    /// `discount`; there is no other way to set it.
    pub fn new(
        id: SaleId,
        cashier: CashierSnapshot,
        product: ProductSnapshot,
        quantity: u32,
        payment_method: PaymentMethod,
        discount: Decimal,
        recorded_at: DateTime<Utc>,
    ) -> Result<Self, SaleValidationError> {
        if quantity == 0 {
            return Err(SaleValidationError::ZeroQuantity);
        }
        if cashier.display_name().trim().is_empty() {
            return Err(SaleValidationError::EmptyCashierName);
        }

        let gross = product.unit_price() * Decimal::from(quantity);
        if discount.is_sign_negative() || discount > gross {
            return Err(SaleValidationError::DiscountOutOfRange);
        }

        Ok(Self {
            id,
            cashier,
            product,
            quantity,
            payment_method,
            discount,
            total: gross - discount,
            recorded_at,
        })
    }

    /// Unique sale identifier.
    pub fn id(&self) -> SaleId {
        self.id
    }

    /// Identity of the cashier at sale time.
    pub fn cashier(&self) -> &CashierSnapshot {
        &self.cashier
    }

    /// Product state at sale time.
    pub fn product(&self) -> &ProductSnapshot {
        &self.product
    }

    /// Units sold.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Payment method used.
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Discount subtracted from the gross amount.
    pub fn discount(&self) -> Decimal {
        self.discount
    }

    /// Final amount paid.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Moment the sale was recorded.
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

/// Persisted form of a [`Sale`]: identifiers plus derived scalars.
///
/// Stores no object graphs — the principal and product are reduced to their
/// identifiers and the scalar values the record needs to stay stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    /// Unique sale identifier.
    pub id: SaleId,
    /// Identifier of the principal who sold.
    pub principal_id: PrincipalId,
    /// Cashier display name at sale time.
    pub cashier_name: String,
    /// SKU of the product sold.
    pub product_sku: String,
    /// Product name at sale time.
    pub product_name: String,
    /// Unit price at sale time.
    pub unit_price: Decimal,
    /// Units sold.
    pub quantity: u32,
    /// Payment method used.
    pub payment_method: PaymentMethod,
    /// Discount subtracted from the gross amount.
    pub discount: Decimal,
    /// Final amount paid.
    pub total: Decimal,
    /// Moment the sale was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl From<Sale> for SaleRecord {
    fn from(value: Sale) -> Self {
        let Sale {
            id,
            cashier,
            product,
            quantity,
            payment_method,
            discount,
            total,
            recorded_at,
        } = value;
        Self {
            id,
            principal_id: cashier.principal_id,
            cashier_name: cashier.display_name,
            product_sku: product.sku.into(),
            product_name: product.name,
            unit_price: product.unit_price,
            quantity,
            payment_method,
            discount,
            total,
            recorded_at,
        }
    }
}

impl TryFrom<SaleRecord> for Sale {
    type Error = SaleValidationError;

    fn try_from(value: SaleRecord) -> Result<Self, Self::Error> {
        let SaleRecord {
            id,
            principal_id,
            cashier_name,
            product_sku,
            product_name,
            unit_price,
            quantity,
            payment_method,
            discount,
            total,
            recorded_at,
        } = value;

        if unit_price.is_sign_negative() {
            return Err(ProductValidationError::NegativeUnitPrice.into());
        }
        let product = ProductSnapshot {
            sku: Sku::new(product_sku)?,
            name: product_name,
            unit_price,
        };
        let cashier = CashierSnapshot {
            principal_id,
            display_name: cashier_name,
        };

        let sale = Sale::new(
            id,
            cashier,
            product,
            quantity,
            payment_method,
            discount,
            recorded_at,
        )?;
        if sale.total != total {
            return Err(SaleValidationError::TotalMismatch);
        }
        Ok(sale)
    }
}

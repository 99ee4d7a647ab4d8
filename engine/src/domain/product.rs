//! Product data model: a catalog item owning the stock invariant.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Validation errors returned by the [`Product`] constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductValidationError {
    /// SKU was blank once trimmed.
    EmptySku,
    /// SKU carried surrounding whitespace.
    SkuPadded,
    /// Display name was blank once trimmed.
    EmptyName,
    /// Category label was blank once trimmed.
    EmptyCategory,
    /// Unit price was negative.
    NegativeUnitPrice,
}

impl fmt::Display for ProductValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySku => write!(f, "sku must not be empty"),
            Self::SkuPadded => write!(f, "sku must not contain surrounding whitespace"),
            Self::EmptyName => write!(f, "product name must not be empty"),
            Self::EmptyCategory => write!(f, "product category must not be empty"),
            Self::NegativeUnitPrice => write!(f, "unit price must not be negative"),
        }
    }
}

impl std::error::Error for ProductValidationError {}

/// Stock-keeping unit identifying a product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sku(String);

impl Sku {
    /// Validate and construct a [`Sku`].
    ///
    /// # Examples
    /// ```
    /// use engine::domain::Sku;
    ///
    /// let sku = Sku::new("sku-1").expect("valid sku");
    /// assert_eq!(sku.as_str(), "sku-1");
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, ProductValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(ProductValidationError::EmptySku);
        }
        if raw.trim() != raw {
            return Err(ProductValidationError::SkuPadded);
        }
        Ok(Self(raw))
    }

    /// Borrow the SKU as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Sku {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Sku> for String {
    fn from(value: Sku) -> Self {
        value.0
    }
}

impl TryFrom<String> for Sku {
    type Error = ProductValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Failure raised when a stock removal would drive the quantity negative.
///
/// The entity is left untouched when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("insufficient stock: requested {requested}, only {available} on hand")]
pub struct OutOfStock {
    /// Units the caller asked to remove.
    pub requested: u32,
    /// Units actually on hand.
    pub available: u32,
}

/// A catalog item.
///
/// ## Invariants
/// - `unit_price` is never negative.
/// - `quantity` never goes negative: [`Product::remove_stock`] fails without
///   mutating state when the request exceeds what is on hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "ProductDto", into = "ProductDto")]
pub struct Product {
    sku: Sku,
    category: String,
    name: String,
    unit_price: Decimal,
    quantity: u32,
}

impl Product {
    /// Build a new catalog item from validated parts.
    pub fn new(
        sku: Sku,
        category: impl Into<String>,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
    ) -> Result<Self, ProductValidationError> {
        let category = category.into();
        if category.trim().is_empty() {
            return Err(ProductValidationError::EmptyCategory);
        }
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProductValidationError::EmptyName);
        }
        if unit_price.is_sign_negative() {
            return Err(ProductValidationError::NegativeUnitPrice);
        }

        Ok(Self {
            sku,
            category,
            name,
            unit_price,
            quantity,
        })
    }

    /// Stock-keeping unit.
    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    /// Category or type label.
    pub fn category(&self) -> &str {
        self.category.as_str()
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Unit price.
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Units on hand.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Add units to the on-hand count.
    pub fn add_stock(&mut self, amount: u32) {
        self.quantity = self.quantity.saturating_add(amount);
    }

    /// Remove units from the on-hand count.
    ///
    /// Fails with [`OutOfStock`] — leaving the entity untouched — when
    /// `amount` exceeds the current quantity.
    pub fn remove_stock(&mut self, amount: u32) -> Result<(), OutOfStock> {
        if amount > self.quantity {
            return Err(OutOfStock {
                requested: amount,
                available: self.quantity,
            });
        }
        self.quantity -= amount;
        Ok(())
    }

    /// Replace the unit price.
    pub fn set_unit_price(&mut self, unit_price: Decimal) -> Result<(), ProductValidationError> {
        if unit_price.is_sign_negative() {
            return Err(ProductValidationError::NegativeUnitPrice);
        }
        self.unit_price = unit_price;
        Ok(())
    }

    /// Replace the on-hand count.
    ///
    /// Store adapters use this to apply a conditional quantity write; the
    /// services themselves always mutate stock through
    /// [`Product::add_stock`] and [`Product::remove_stock`].
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductDto {
    sku: String,
    category: String,
    name: String,
    unit_price: Decimal,
    quantity: u32,
}

impl From<Product> for ProductDto {
    fn from(value: Product) -> Self {
        let Product {
            sku,
            category,
            name,
            unit_price,
            quantity,
        } = value;
        Self {
            sku: sku.into(),
            category,
            name,
            unit_price,
            quantity,
        }
    }
}

impl TryFrom<ProductDto> for Product {
    type Error = ProductValidationError;

    fn try_from(value: ProductDto) -> Result<Self, Self::Error> {
        let ProductDto {
            sku,
            category,
            name,
            unit_price,
            quantity,
        } = value;
        Product::new(Sku::new(sku)?, category, name, unit_price, quantity)
    }
}

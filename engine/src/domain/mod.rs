//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the strongly typed entities of the sale transaction core
//! and the services that orchestrate them against the persistence ports.
//! Keep records immutable and document invariants and serialisation
//! contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`] — structured domain failure values.
//! - [`Permission`] / [`Role`] — the closed capability set and role tags.
//! - [`Principal`] — an authenticated actor with a permission map.
//! - [`Product`] — a catalog item owning the stock invariant.
//! - [`Sale`] — an immutable transaction record.
//! - [`AccessService`] / [`ProductService`] / [`SaleService`] — the driving
//!   services consuming the ports in [`ports`].

pub mod access_service;
pub mod auth;
pub mod error;
pub mod permission;
pub mod ports;
pub mod principal;
pub mod product;
pub mod product_service;
pub mod sale;
pub mod sale_service;

#[cfg(test)]
mod access_service_tests;

pub use self::access_service::{AccessService, authorize, require};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::permission::{Permission, Role};
pub use self::principal::{LoginName, Principal, PrincipalId, PrincipalValidationError};
pub use self::product::{OutOfStock, Product, ProductValidationError, Sku};
pub use self::product_service::ProductService;
pub use self::sale::{
    CashierSnapshot, PaymentMethod, ProductSnapshot, Sale, SaleId, SaleRecord, SaleValidationError,
};
pub use self::sale_service::SaleService;

/// Convenient result alias for domain operations.
pub type DomainResult<T> = Result<T, Error>;

//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the network-backed stores, the credential primitive). Each trait exposes
//! strongly typed errors so adapters map their failures into predictable
//! variants instead of returning `anyhow::Result`. Transports may be
//! asynchronous internally, but the services await every call before the
//! next dependent step.

mod password_hasher;
mod principal_store;
mod product_store;
mod sale_store;

#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{FixturePasswordHasher, PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use principal_store::MockPrincipalStore;
pub use principal_store::{FixturePrincipalStore, PrincipalStore, PrincipalStoreError};
#[cfg(test)]
pub use product_store::MockProductStore;
pub use product_store::{FixtureProductStore, ProductStore, ProductStoreError};
#[cfg(test)]
pub use sale_store::MockSaleStore;
pub use sale_store::{FixtureSaleStore, SaleStore, SaleStoreError};

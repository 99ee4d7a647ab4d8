//! In-memory store adapters.
//!
//! These back the domain ports with `tokio`-guarded maps. The deployment
//! swaps in the network database client at the same seams; tests and local
//! runs use these directly. Like every adapter, they only translate — the
//! stock invariant itself lives in the domain.

mod principal_store;
mod product_store;
mod sale_store;

pub use principal_store::MemoryPrincipalStore;
pub use product_store::MemoryProductStore;
pub use sale_store::MemorySaleStore;

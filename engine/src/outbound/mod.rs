//! Outbound adapters implementing domain ports for infrastructure.
//!
//! Adapters are thin translators between domain types and their backing
//! representation; they contain no business logic.
//!
//! - **memory**: in-process stores over `tokio` synchronisation primitives,
//!   standing in for the network database client the deployment wires in.
//! - **credentials**: the bcrypt-backed credential primitive.

pub mod credentials;
pub mod memory;

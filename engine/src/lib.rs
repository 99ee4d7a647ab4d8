//! Point-of-sale transaction engine.
//!
//! The crate hosts the transactional core of a point-of-sale system: a
//! permission-gated account roster, a product catalog owning the
//! non-negative stock invariant, and the sale pipeline that turns live
//! product state into immutable financial records.
//!
//! The domain layer only ever talks to storage through the port traits in
//! [`domain::ports`]; the adapters in [`outbound`] implement those ports for
//! in-process use. User interfaces, bootstrap, and the network database
//! client live outside this crate.

pub mod domain;
pub mod outbound;

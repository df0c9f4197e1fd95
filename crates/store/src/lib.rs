//! Reference in-memory index for component records
//!
//! This crate makes the contract's lifecycle rules concrete:
//! - ComponentIndex: durable records keyed by identity, last-timestamp-wins
//! - EphemeralStore: transient records with expiry-based eviction
//!
//! It is a reference consumer of the contract, not a storage engine: no
//! persistence, no query language, no transport.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ephemeral;
pub mod index;

pub use ephemeral::EphemeralStore;
pub use index::{ApplyOutcome, ComponentIndex};

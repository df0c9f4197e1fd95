//! Compindex - component-data record contract with a reference in-memory index
//!
//! The core of the crate is [`ComponentRecord`]: one observation of component
//! data for an entity, produced by a package, stamped with a millisecond
//! timestamp. Records are immutable values; an update is a new record with a
//! newer timestamp, never a mutation.
//!
//! # Quick Start
//!
//! ```
//! use compindex::{ComponentIndex, ComponentRecord, TimestampMs};
//! use std::time::Duration;
//!
//! let record = ComponentRecord::new(
//!     "pkgA",
//!     "Position",
//!     "e1",
//!     false,
//!     serde_json::json!({"x": 1, "y": 2}).into(),
//!     TimestampMs::from_millis(1_700_000_000_000),
//! )?;
//!
//! let index = ComponentIndex::new(Duration::from_secs(30));
//! index.apply(record.clone());
//! assert_eq!(index.get(&record.identity()), Some(record));
//! # Ok::<(), compindex::Error>(())
//! ```
//!
//! # Architecture
//!
//! The contract lives in `compindex-core`: record, identity, value model,
//! timestamp, errors, and the JSON wire codec. `compindex-store` is a
//! reference consumer that applies the lifecycle rules — last-timestamp-wins
//! supersession for durable records, expiry-based eviction for ephemeral
//! ones. Transport, query execution, and schema validation of payloads are
//! external collaborators and are not part of this crate.

// Re-export the public API from the member crates
pub use compindex_core::*;
pub use compindex_store::*;

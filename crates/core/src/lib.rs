//! Core contract types for component-data indexing
//!
//! This crate defines the foundational types shared by producers and
//! consumers of component data:
//! - ComponentRecord: one observation of component data for an entity
//! - RecordIdentity: the supersession key (package_id, schema_name, entity_key)
//! - Value: schema-agnostic payload carried by a record
//! - TimestampMs: millisecond-precision timestamp
//! - Error: error type hierarchy
//!
//! Everything here is a pure value type: construction, serialization, and
//! comparison are side-effect-free and safe to call from any thread.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod identity;
pub mod record;
pub mod timestamp;
pub mod value;

// Re-export commonly used types at the crate root
pub use error::{Error, Result};
pub use identity::RecordIdentity;
pub use record::ComponentRecord;
pub use timestamp::TimestampMs;
pub use value::Value;

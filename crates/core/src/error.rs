//! Error types for the component record contract
//!
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations. Both variants are terminal: a record that fails
//! construction or decoding is discarded, never partially returned. Retry
//! policy belongs to the transport layer, not here.
//!
//! Payload interpretation failures are deliberately absent: decoding `data`
//! against the shape named by `schema_name` is the schema registry's concern.

use thiserror::Error;

/// Result type alias for contract operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for record construction and decoding
#[derive(Debug, Error)]
pub enum Error {
    /// A required identity field is empty at construction or after decoding
    #[error("invalid record: {field} must be non-empty")]
    InvalidRecord {
        /// Name of the offending identity field
        field: &'static str,
    },

    /// The wire bytes could not be decoded into the expected shape
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::MalformedInput(e.to_string())
    }
}

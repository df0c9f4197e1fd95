//! Millisecond-precision timestamp type
//!
//! Records carry a producer-assigned observation time. The wire unit is
//! milliseconds since the Unix epoch, so that is the canonical unit here.
//!
//! ## Ordering
//!
//! Timestamps are only meaningfully ordered between records that share a
//! logical identity; that rule lives on `ComponentRecord`, not here. The
//! type itself is a plain orderable u64 wrapper.
//!
//! ## Usage
//!
//! Never expose raw arithmetic. Use explicit constructors:
//!
//! ```
//! use compindex_core::TimestampMs;
//!
//! let now = TimestampMs::now();
//! let from_secs = TimestampMs::from_secs(1000);
//! let from_millis = TimestampMs::from_millis(1_000_000);
//! ```

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Millisecond-precision timestamp
///
/// Represents a point in time as milliseconds since Unix epoch. Serializes
/// as a plain u64, matching the `timestamp_ms` wire field.
///
/// ## Invariants
///
/// - Timestamps are always non-negative (u64)
/// - Timestamps are always in milliseconds
/// - Timestamps are comparable and orderable
/// - The zero timestamp represents Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimestampMs(u64);

impl TimestampMs {
    /// Unix epoch (1970-01-01 00:00:00 UTC)
    pub const EPOCH: TimestampMs = TimestampMs(0);

    /// Maximum representable timestamp
    pub const MAX: TimestampMs = TimestampMs(u64::MAX);

    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a timestamp for the current moment
    ///
    /// Uses system time. Returns epoch (0) if the system clock is before the
    /// Unix epoch (e.g., clock went backwards due to NTP adjustment).
    pub fn now() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        TimestampMs(duration.as_millis() as u64)
    }

    /// Create a timestamp from milliseconds since epoch
    #[inline]
    pub const fn from_millis(millis: u64) -> Self {
        TimestampMs(millis)
    }

    /// Create a timestamp from seconds since epoch
    #[inline]
    pub const fn from_secs(secs: u64) -> Self {
        TimestampMs(secs.saturating_mul(1_000))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get milliseconds since Unix epoch
    #[inline]
    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Get seconds since Unix epoch (truncates)
    #[inline]
    pub const fn as_secs(&self) -> u64 {
        self.0 / 1_000
    }

    // =========================================================================
    // Duration Operations
    // =========================================================================

    /// Compute duration since an earlier timestamp
    ///
    /// Returns `None` if `earlier` is actually later than `self`.
    pub fn duration_since(&self, earlier: TimestampMs) -> Option<Duration> {
        if self.0 >= earlier.0 {
            Some(Duration::from_millis(self.0 - earlier.0))
        } else {
            None
        }
    }

    /// Add a duration to this timestamp
    ///
    /// Saturates at `TimestampMs::MAX` on overflow.
    pub fn saturating_add(&self, duration: Duration) -> Self {
        TimestampMs(self.0.saturating_add(duration.as_millis() as u64))
    }

    /// Subtract a duration from this timestamp
    ///
    /// Saturates at `TimestampMs::EPOCH` on underflow.
    pub fn saturating_sub(&self, duration: Duration) -> Self {
        TimestampMs(self.0.saturating_sub(duration.as_millis() as u64))
    }

    /// Check if this timestamp is before another
    #[inline]
    pub fn is_before(&self, other: TimestampMs) -> bool {
        self.0 < other.0
    }

    /// Check if this timestamp is after another
    #[inline]
    pub fn is_after(&self, other: TimestampMs) -> bool {
        self.0 > other.0
    }
}

impl Default for TimestampMs {
    fn default() -> Self {
        TimestampMs::EPOCH
    }
}

impl std::fmt::Display for TimestampMs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format as "seconds.milliseconds" for readability
        let secs = self.0 / 1_000;
        let millis = self.0 % 1_000;
        write!(f, "{}.{:03}", secs, millis)
    }
}

// ============================================================================
// From Implementations
// ============================================================================

impl From<u64> for TimestampMs {
    /// Create from raw milliseconds
    fn from(millis: u64) -> Self {
        TimestampMs::from_millis(millis)
    }
}

impl From<TimestampMs> for u64 {
    /// Extract raw milliseconds
    fn from(ts: TimestampMs) -> Self {
        ts.0
    }
}

// ============================================================================
// Tests
// ============================================================================

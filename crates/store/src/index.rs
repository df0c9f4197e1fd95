//! Durable component index
//!
//! Keyed by `RecordIdentity`, one authoritative record per identity.
//! Uses DashMap so readers are lock-free and writers only contend on the
//! target shard; the entry API makes the check-and-replace atomic per
//! identity, so a reader never observes a partially-applied record.
//!
//! Ephemeral records never touch the durable map — they are routed to the
//! [`EphemeralStore`], which owns its own retention policy.

use crate::ephemeral::EphemeralStore;
use compindex_core::{ComponentRecord, RecordIdentity, TimestampMs};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::time::Duration;
use tracing::debug;

/// What `apply` did with a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// No record existed for this identity; the record was stored
    Inserted,
    /// The record superseded an older incumbent
    Replaced,
    /// An incumbent with an equal or newer timestamp was retained
    Stale,
}

/// In-memory materialized index applying last-timestamp-wins per identity
///
/// Concurrent producers may submit records for the same identity from any
/// number of threads; the supersession check and the write happen under the
/// identity's shard lock, so updates are atomic and arrival order never
/// changes the outcome.
#[derive(Debug)]
pub struct ComponentIndex {
    durable: DashMap<RecordIdentity, ComponentRecord>,
    ephemeral: EphemeralStore,
}

impl ComponentIndex {
    /// Create an empty index
    ///
    /// `ephemeral_retention` is how long ephemeral records stay visible
    /// after arrival before [`evict_expired`](Self::evict_expired) removes
    /// them.
    pub fn new(ephemeral_retention: Duration) -> Self {
        Self {
            durable: DashMap::new(),
            ephemeral: EphemeralStore::new(ephemeral_retention),
        }
    }

    /// Apply a record, stamping ephemeral arrivals with the current time
    pub fn apply(&self, record: ComponentRecord) -> ApplyOutcome {
        self.apply_at(record, TimestampMs::now())
    }

    /// Apply a record with an explicit arrival time
    ///
    /// The arrival time only matters for ephemeral records, where it anchors
    /// the expiry; durable supersession looks at `timestamp_ms` alone. On an
    /// equal timestamp the incumbent is retained (first-writer-wins), so
    /// replaying a record is a no-op.
    pub fn apply_at(&self, record: ComponentRecord, now: TimestampMs) -> ApplyOutcome {
        if record.is_ephemeral() {
            return self.ephemeral.insert_at(record, now);
        }

        let identity = record.identity();
        let timestamp_ms = record.timestamp_ms().as_millis();
        let outcome = match self.durable.entry(identity.clone()) {
            Entry::Occupied(mut entry) => {
                if record.supersedes(entry.get()) {
                    entry.insert(record);
                    ApplyOutcome::Replaced
                } else {
                    ApplyOutcome::Stale
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(record);
                ApplyOutcome::Inserted
            }
        };
        debug!(identity = %identity, timestamp_ms, outcome = ?outcome, "applied durable record");
        outcome
    }

    /// Get the authoritative durable record for an identity
    pub fn get(&self, identity: &RecordIdentity) -> Option<ComponentRecord> {
        self.durable.get(identity).map(|entry| entry.value().clone())
    }

    /// Get the live ephemeral record for an identity, if it has not expired
    pub fn get_ephemeral(&self, identity: &RecordIdentity) -> Option<ComponentRecord> {
        self.ephemeral.get(identity)
    }

    /// Evict ephemeral records whose expiry is at or before `now`
    ///
    /// Returns the number of records removed. Durable records are never
    /// evicted.
    pub fn evict_expired(&self, now: TimestampMs) -> usize {
        self.ephemeral.evict_expired(now)
    }

    /// Number of durable identities currently indexed
    pub fn len(&self) -> usize {
        self.durable.len()
    }

    /// Whether the durable index is empty
    pub fn is_empty(&self) -> bool {
        self.durable.is_empty()
    }

    /// Number of live ephemeral identities
    pub fn ephemeral_len(&self) -> usize {
        self.ephemeral.len()
    }
}

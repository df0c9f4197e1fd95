//! Ephemeral record store with expiry-based eviction
//!
//! Ephemeral records represent live signals, not stored facts, so they get
//! their own retention policy: every arrival is stamped with an expiry
//! (arrival time + retention) and [`evict_expired`](EphemeralStore::evict_expired)
//! removes everything at or past its expiry.
//!
//! An expiry index maps expiry timestamp → identities using a BTreeMap for
//! sorted order, so eviction costs O(expired count) instead of scanning the
//! whole store.
//!
//! One RwLock guards both the live map and the expiry index, so a
//! supersession and its expiry re-stamp are observed together.

use crate::index::ApplyOutcome;
use compindex_core::{ComponentRecord, RecordIdentity, TimestampMs};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::Duration;
use tracing::debug;

#[derive(Debug)]
struct StoredEphemeral {
    record: ComponentRecord,
    expires_at: TimestampMs,
}

#[derive(Debug, Default)]
struct Inner {
    live: HashMap<RecordIdentity, StoredEphemeral>,
    /// Expiry index: expiry timestamp → identities expiring then
    expiry: BTreeMap<TimestampMs, HashSet<RecordIdentity>>,
}

/// Short-lived, evictable store for ephemeral records
///
/// Applies the same last-timestamp-wins rule as the durable index; replacing
/// a record re-stamps its expiry from the new arrival time.
#[derive(Debug)]
pub struct EphemeralStore {
    retention: Duration,
    inner: RwLock<Inner>,
}

impl EphemeralStore {
    /// Create an empty store with the given retention window
    pub fn new(retention: Duration) -> Self {
        Self {
            retention,
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Insert a record, stamping its expiry from the current time
    pub fn insert(&self, record: ComponentRecord) -> ApplyOutcome {
        self.insert_at(record, TimestampMs::now())
    }

    /// Insert a record with an explicit arrival time
    ///
    /// The record expires at `now + retention`. On an equal timestamp the
    /// incumbent is retained, matching the durable index.
    pub fn insert_at(&self, record: ComponentRecord, now: TimestampMs) -> ApplyOutcome {
        let identity = record.identity();
        let expires_at = now.saturating_add(self.retention);

        let mut inner = self.inner.write();

        let incumbent_expiry = match inner.live.get(&identity) {
            Some(incumbent) => {
                if !record.supersedes(&incumbent.record) {
                    return ApplyOutcome::Stale;
                }
                Some(incumbent.expires_at)
            }
            None => None,
        };

        // Superseding a record re-stamps its expiry; drop the stale entry
        if let Some(old_expiry) = incumbent_expiry {
            if let Some(identities) = inner.expiry.get_mut(&old_expiry) {
                identities.remove(&identity);
                if identities.is_empty() {
                    inner.expiry.remove(&old_expiry);
                }
            }
        }

        inner
            .expiry
            .entry(expires_at)
            .or_default()
            .insert(identity.clone());
        inner.live.insert(identity, StoredEphemeral { record, expires_at });

        match incumbent_expiry {
            Some(_) => ApplyOutcome::Replaced,
            None => ApplyOutcome::Inserted,
        }
    }

    /// Get the live record for an identity as of the current time
    pub fn get(&self, identity: &RecordIdentity) -> Option<ComponentRecord> {
        self.get_at(identity, TimestampMs::now())
    }

    /// Get the live record for an identity as of `now`
    ///
    /// A record past its expiry is invisible even before eviction runs.
    pub fn get_at(&self, identity: &RecordIdentity, now: TimestampMs) -> Option<ComponentRecord> {
        let inner = self.inner.read();
        inner
            .live
            .get(identity)
            .filter(|stored| stored.expires_at.is_after(now))
            .map(|stored| stored.record.clone())
    }

    /// Remove all records whose expiry is at or before `now`
    ///
    /// Returns the number of records removed. O(expired count) via the
    /// expiry index, not O(total data).
    pub fn evict_expired(&self, now: TimestampMs) -> usize {
        let mut inner = self.inner.write();

        let expired_timestamps: Vec<TimestampMs> =
            inner.expiry.range(..=now).map(|(ts, _)| *ts).collect();

        let mut count = 0;
        for ts in expired_timestamps {
            if let Some(identities) = inner.expiry.remove(&ts) {
                for identity in identities {
                    if inner.live.remove(&identity).is_some() {
                        count += 1;
                    }
                }
            }
        }

        if count > 0 {
            debug!(count, "evicted expired ephemeral records");
        }
        count
    }

    /// Number of identities currently held (expired-but-unevicted included)
    pub fn len(&self) -> usize {
        self.inner.read().live.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.inner.read().live.is_empty()
    }
}

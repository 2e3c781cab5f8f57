//! Time-decaying memory of which news items the reader has opened.
//!
//! Records live under a single key of a [`KeyValueStore`] as a JSON array of
//! [`ReadRecord`]s. A record counts as read for 24 hours after the item was
//! first opened; re-opening never extends that window. Expired records are
//! swept when the cache loads, and the store is rewritten only if the sweep
//! removed something.
//!
//! The cache is an annotation layer, not a source of truth: storage that is
//! missing, corrupt or failing degrades to "nothing is read" and is logged,
//! never returned as an error.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::domain::ReadRecord;
use crate::store::KeyValueStore;

/// Storage key holding the serialized record list.
pub const SEEN_NEWS_KEY: &str = "seenNews";

/// How long an item stays read after it was first opened.
pub const READ_WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

pub struct ReadStateCache<S: KeyValueStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    window_ms: i64,
    /// Every record this session knows about, in persisted order.
    records: Vec<ReadRecord>,
    /// Ids from `records` that were unexpired at load or marked since, with their read time.
    active: HashMap<String, i64>,
    loaded: bool,
}

impl<S: KeyValueStore> ReadStateCache<S, SystemClock> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> ReadStateCache<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            window_ms: READ_WINDOW_MS,
            records: Vec::new(),
            active: HashMap::new(),
            loaded: false,
        }
    }

    /// Read the persisted records, drop expired ones and rebuild the active set.
    ///
    /// Returns the ids that are currently read.
    pub fn load(&mut self) -> HashSet<String> {
        let now = self.clock.now_millis();
        let stored = self.read_persisted();
        let stored_len = stored.len();

        let mut survivors: Vec<ReadRecord> = Vec::with_capacity(stored_len);
        for record in stored {
            if record.is_expired(now, self.window_ms) {
                continue;
            }
            // Keep the earliest read if duplicates slipped in.
            if survivors.iter().any(|r| r.id == record.id) {
                continue;
            }
            survivors.push(record);
        }

        if survivors.len() != stored_len {
            debug!(
                "Swept {} read records ({} remain)",
                stored_len - survivors.len(),
                survivors.len()
            );
            self.write_persisted(&survivors);
        }

        self.active = survivors
            .iter()
            .map(|r| (r.id.clone(), r.read_at_ms))
            .collect();
        self.records = survivors;
        self.loaded = true;

        self.active_ids()
    }

    /// Whether `id` was opened within the window. Pure lookup, no I/O.
    pub fn is_read(&self, id: &str) -> bool {
        let now = self.clock.now_millis();
        self.active
            .get(id)
            .is_some_and(|&read_at| now.saturating_sub(read_at) < self.window_ms)
    }

    /// Remember that `id` was opened now.
    ///
    /// Returns `false` when the id was already read, in which case nothing is
    /// written and the original read time is kept.
    pub fn mark_read(&mut self, id: &str) -> bool {
        if !self.loaded {
            self.load();
        }
        if self.is_read(id) {
            return false;
        }

        let now = self.clock.now_millis();
        self.records.retain(|r| r.id != id);
        self.records.push(ReadRecord::new(id, now));
        self.active.insert(id.to_string(), now);

        self.write_persisted(&self.records);

        true
    }

    /// Ids that are read right now.
    pub fn active_ids(&self) -> HashSet<String> {
        let now = self.clock.now_millis();
        self.active
            .iter()
            .filter(|&(_, &read_at)| now.saturating_sub(read_at) < self.window_ms)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Records as they were last loaded or written, in persisted order.
    pub fn records(&self) -> &[ReadRecord] {
        &self.records
    }

    fn read_persisted(&self) -> Vec<ReadRecord> {
        let raw = match self.store.get(SEEN_NEWS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read stored read state: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<ReadRecord>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!("Discarding unreadable read state: {}", e);
                Vec::new()
            }
        }
    }

    fn write_persisted(&self, records: &[ReadRecord]) {
        let json = match serde_json::to_string(records) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize read state: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(SEEN_NEWS_KEY, &json) {
            warn!("Failed to persist read state: {}", e);
        }
    }
}

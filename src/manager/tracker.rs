//! In-flight load tracking
//!
//! A store read can come back after the player has already moved on, or
//! after a newer profile was saved under the same key. Applying it then
//! would overwrite fresher state, so every dispatched load carries a ticket
//! and the result is only applied while that ticket is still current.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::profile::{EntityId, ProfileKey};

/// Issued when a load is dispatched to the background
#[derive(Debug, Clone)]
pub struct LoadTicket {
    key: ProfileKey,
    seq: u64,
    generation: u64,
}

impl LoadTicket {
    pub fn key(&self) -> &ProfileKey {
        &self.key
    }
}

/// What to do with a load result arriving on the foreground
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadVerdict {
    Current,
    /// A save for the same key happened after dispatch
    SupersededBySave,
    /// The entity issued a newer load after dispatch
    SupersededByLoad,
    /// Settings were reloaded after dispatch
    SupersededByReload,
}

#[derive(Debug, Default)]
struct PendingKey {
    loads: usize,
    /// Sequence number of the last save recorded while loads were pending
    saved_at: Option<u64>,
}

#[derive(Debug, Default)]
struct TrackerState {
    next_seq: u64,
    /// Bumped on every settings reload
    generation: u64,
    latest_load: HashMap<EntityId, u64>,
    pending: HashMap<ProfileKey, PendingKey>,
}

impl TrackerState {
    fn bump(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}

/// Tracks loads in flight; memory is bounded by the number of pending loads
#[derive(Debug, Default)]
pub struct LoadTracker {
    state: Mutex<TrackerState>,
}

impl LoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_load(&self, key: &ProfileKey) -> LoadTicket {
        let mut state = self.state.lock();
        let seq = state.bump();
        state.latest_load.insert(key.entity(), seq);
        state.pending.entry(key.clone()).or_default().loads += 1;
        LoadTicket {
            key: key.clone(),
            seq,
            generation: state.generation,
        }
    }

    /// Note a save; only matters to loads already in flight for the key
    pub fn record_save(&self, key: &ProfileKey) {
        let mut state = self.state.lock();
        if !state.pending.contains_key(key) {
            return;
        }
        let seq = state.bump();
        if let Some(pending) = state.pending.get_mut(key) {
            pending.saved_at = Some(seq);
        }
    }

    /// Mark every load in flight for `entity` as stale.
    ///
    /// Used when the entity was loaded without dispatch (cache hit, shutdown).
    pub fn supersede(&self, entity: EntityId) {
        self.state.lock().latest_load.remove(&entity);
    }

    /// Mark every load in flight as stale
    pub fn begin_generation(&self) {
        self.state.lock().generation += 1;
    }

    /// Settle a ticket and decide whether its result may be applied
    pub fn finish(&self, ticket: &LoadTicket) -> LoadVerdict {
        let mut state = self.state.lock();

        let saved_since = match state.pending.get_mut(&ticket.key) {
            Some(pending) => {
                pending.loads = pending.loads.saturating_sub(1);
                let saved_since = pending.saved_at.map_or(false, |at| at > ticket.seq);
                if pending.loads == 0 {
                    state.pending.remove(&ticket.key);
                }
                saved_since
            }
            None => false,
        };

        let entity = ticket.key.entity();
        let newest = state.latest_load.get(&entity).copied();
        if newest == Some(ticket.seq) {
            state.latest_load.remove(&entity);
        }

        if ticket.generation != state.generation {
            LoadVerdict::SupersededByReload
        } else if newest != Some(ticket.seq) {
            LoadVerdict::SupersededByLoad
        } else if saved_since {
            LoadVerdict::SupersededBySave
        } else {
            LoadVerdict::Current
        }
    }

    /// Number of loads still waiting for `finish`
    pub fn in_flight(&self) -> usize {
        self.state.lock().pending.values().map(|p| p.loads).sum()
    }
}

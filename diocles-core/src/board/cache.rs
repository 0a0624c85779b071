//! In-memory last-death cache
//!
//! One [`DeathRecord`] per player, last-write-wins. Entries live for the
//! whole process; there is no eviction and nothing is persisted across
//! restarts. The host scoreboard remains the authority for counts — this
//! cache only supplements it with detail the scoreboard does not retain.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::types::DeathRecord;

/// Concurrent map of player name to last-known death record.
#[derive(Debug, Default)]
pub struct DeathCache {
    inner: RwLock<HashMap<String, DeathRecord>>,
}

impl DeathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert a player's record, replacing any prior entry wholesale.
    pub fn record(&self, player: &str, record: DeathRecord) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(player.to_string(), record);
    }

    /// Last-known record for a player, if any death was observed.
    pub fn get(&self, player: &str) -> Option<DeathRecord> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(player)
            .cloned()
    }

    /// Copy of the whole cache, for payload merging.
    pub fn snapshot(&self) -> HashMap<String, DeathRecord> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of players with a cached record.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

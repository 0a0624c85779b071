//! Core domain types for diocles
//!
//! These types model the deathboard's view of the world:
//!
//! | Term | Definition |
//! |------|------------|
//! | **Player** | A tracked subject, identified by its unique display name |
//! | **Death count** | The host scoreboard's authoritative running counter, read on demand |
//! | **Death record** | The cached detail of a player's most recent death |
//! | **Server day** | Host clock divided by the day length in ticks |
//! | **Collector** | The external HTTP service receiving event and sync payloads |
//!
//! The cache only ever holds the single most recent [`DeathRecord`] per
//! player; the death count inside a record is a snapshot taken at death time,
//! never incremented independently of the host scoreboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of host clock ticks in one in-game day.
pub const TICKS_PER_DAY: i64 = 24_000;

/// Block position at death time, in host-space coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Location {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Last-known death detail for a single player.
///
/// Created or wholly overwritten by the death-intake path; never merged
/// field-by-field with a prior record. Field order matches the collector's
/// wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeathRecord {
    /// When the death happened (RFC 3339)
    pub last_death_time: DateTime<Utc>,
    /// Server day the death happened on
    pub last_death_day: i64,
    /// Scoreboard death count at death time (snapshot, never negative)
    pub death_count: i64,
    /// Block position at death time, if the host reported one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// World/dimension identifier at death time, if the host reported one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub world: Option<String>,
}

/// A death as delivered by the host's death callback.
#[derive(Debug, Clone)]
pub struct DeathEvent {
    /// Player display name
    pub player: String,
    /// Scoreboard death count at event time (authoritative)
    pub death_count: i64,
    /// Wall-clock time of the death
    pub timestamp: DateTime<Utc>,
    /// Block position, if known
    pub location: Option<Location>,
    /// World identifier, if known
    pub world: Option<String>,
}

/// One player's entry in a full-board sync payload.
///
/// `death_count` always comes from the live scoreboard read; the remaining
/// fields are best-effort detail copied from the cache when present. For a
/// player with no cached record, `last_death_day` falls back to the current
/// server day and location/world are omitted entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardEntry {
    pub death_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_death_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_death_day: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub world: Option<String>,
}

/// JSON object mapping player names to their entries, in host order.
pub type Payload = serde_json::Map<String, serde_json::Value>;

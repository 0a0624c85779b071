//! Outbound payload construction
//!
//! Pure merge logic: live scoreboard counts are authoritative and always win;
//! cached death detail is best-effort and copied in when present. Payloads
//! preserve the host's player presentation order for deterministic
//! diagnostic display (the collector attaches no meaning to it).

use std::collections::HashMap;

use crate::types::{BoardEntry, DeathRecord, Payload};

/// Wrap one freshly-recorded death as a standalone payload.
pub fn single_payload(player: &str, record: &DeathRecord) -> Payload {
    let mut out = Payload::new();
    match serde_json::to_value(record) {
        Ok(value) => {
            out.insert(player.to_string(), value);
        }
        Err(e) => {
            // A record that fails to serialize is a data-model bug.
            tracing::error!(player, error = %e, "Failed to serialize death record");
        }
    }
    out
}

/// Merge live counts with cached detail into a full-board payload.
///
/// `counters` carries every currently-present player with its authoritative
/// count, in host order. A cached record contributes time/day/location/world
/// but never its count; a player with no cached record gets `current_day` as
/// its day and no location/world. The sync path always knows the current
/// day; diagnostic callers may not, in which case the day is omitted rather
/// than fabricated.
pub fn full_payload(
    counters: &[(String, i64)],
    cache: &HashMap<String, DeathRecord>,
    current_day: Option<i64>,
) -> Payload {
    let mut out = Payload::new();
    for (player, count) in counters {
        let entry = match cache.get(player) {
            Some(record) => BoardEntry {
                death_count: *count,
                last_death_time: Some(record.last_death_time),
                last_death_day: Some(record.last_death_day),
                location: record.location,
                world: record.world.clone(),
            },
            None => BoardEntry {
                death_count: *count,
                last_death_time: None,
                last_death_day: current_day,
                location: None,
                world: None,
            },
        };
        match serde_json::to_value(&entry) {
            Ok(value) => {
                out.insert(player.clone(), value);
            }
            Err(e) => {
                tracing::error!(player = %player, error = %e, "Failed to serialize board entry");
            }
        }
    }
    out
}

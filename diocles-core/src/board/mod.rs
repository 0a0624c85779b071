//! Deathboard engine
//!
//! The [`Deathboard`] service object ties the pieces together: the host
//! calls [`Deathboard::handle_death`] once per player death and
//! [`Deathboard::check_day`] once per server tick; everything else is
//! read-only accessors for operator commands. No public entry point may
//! panic or return an error into the host's control flow — failures are
//! logged and the affected step is skipped.

mod cache;
mod day;
mod payload;

pub use cache::DeathCache;
pub use day::DayCursor;
pub use payload::{full_payload, single_payload};

use std::collections::HashMap;
use std::time::Duration;

use crate::collector::{probe, Dispatcher, ProbeReport};
use crate::config::CollectorConfig;
use crate::error::Result;
use crate::host::GameHost;
use crate::types::{DeathEvent, DeathRecord, Payload};

/// Endpoint receiving single-death payloads.
pub const DEATHBOARD_ENDPOINT: &str = "/api/deathboard";

/// Endpoint receiving full-board sync payloads.
pub const SYNC_ENDPOINT: &str = "/api/sync";

/// Per-server deathboard state and collector plumbing.
///
/// Constructed once at server start and handed to every entry point; holding
/// the only mutable state (cache and day cursor) in one explicit object keeps
/// instances isolated for tests.
pub struct Deathboard {
    config: CollectorConfig,
    cache: DeathCache,
    day: DayCursor,
    dispatcher: Option<Dispatcher>,
}

impl Deathboard {
    /// Build the deathboard from a resolved configuration.
    ///
    /// An unconfigured collector yields a fully functional offline board:
    /// deaths are tracked, nothing is dispatched.
    pub fn new(config: CollectorConfig) -> Result<Self> {
        let dispatcher = Dispatcher::new(&config)?;
        tracing::info!(
            base = config.base_url.as_deref().unwrap_or("none"),
            "Deathboard initialized"
        );
        Ok(Self {
            config,
            cache: DeathCache::new(),
            day: DayCursor::new(),
            dispatcher,
        })
    }

    /// Handle one player death reported by the host.
    ///
    /// Records the death in the cache and dispatches a single-player payload.
    /// If the host clock is unavailable the event is dropped (logged) rather
    /// than recorded with an invented day.
    pub fn handle_death(&self, host: &dyn GameHost, event: DeathEvent) {
        let day = match host.current_day_index() {
            Ok(day) => day,
            Err(e) => {
                tracing::warn!(player = %event.player, error = %e, "Host clock unavailable, dropping death event");
                return;
            }
        };

        // Scoreboard counts cannot meaningfully be negative; clamp rather
        // than let a bad read poison the cache invariant.
        let death_count = if event.death_count < 0 {
            tracing::warn!(player = %event.player, count = event.death_count, "Negative death count from host, clamping to 0");
            0
        } else {
            event.death_count
        };

        let record = DeathRecord {
            last_death_time: event.timestamp,
            last_death_day: day,
            death_count,
            location: event.location,
            world: event.world,
        };

        self.cache.record(&event.player, record.clone());
        tracing::debug!(player = %event.player, deaths = death_count, day, "Recorded death");

        if let Some(dispatcher) = &self.dispatcher {
            dispatcher.dispatch(&single_payload(&event.player, &record), DEATHBOARD_ENDPOINT);
        }
    }

    /// Per-tick day-rollover check.
    ///
    /// The first successful check only seeds the cursor. Each later strict
    /// day change dispatches exactly one full-board sync. Clock failures make
    /// this tick a no-op; they must never crash the host's tick loop.
    pub fn check_day(&self, host: &dyn GameHost) {
        let current_day = match host.current_day_index() {
            Ok(day) => day,
            Err(e) => {
                tracing::debug!(error = %e, "Host clock unavailable, skipping day check");
                return;
            }
        };

        if self.day.observe(current_day) {
            tracing::info!(day = current_day, "Server day changed, syncing full board");
            let payload = self.build_full_board(host, Some(current_day));
            if let Some(dispatcher) = &self.dispatcher {
                dispatcher.dispatch(&payload, SYNC_ENDPOINT);
            }
        }
    }

    /// Merge live scoreboard counts for all online players with cached death
    /// detail, in host presentation order.
    fn build_full_board(&self, host: &dyn GameHost, current_day: Option<i64>) -> Payload {
        let counters: Vec<(String, i64)> = host
            .online_players()
            .into_iter()
            .map(|player| {
                let count = host.death_count(&player);
                (player, count)
            })
            .collect();
        full_payload(&counters, &self.cache.snapshot(), current_day)
    }

    /// Diagnostic view of the full board, built but not sent.
    ///
    /// When the host clock is unavailable the last cursor value stands in;
    /// with neither available, uncached players simply carry no day rather
    /// than a fabricated one.
    pub fn full_board(&self, host: &dyn GameHost) -> Payload {
        let current_day = host
            .current_day_index()
            .ok()
            .or_else(|| self.day.current());
        self.build_full_board(host, current_day)
    }

    /// Last-known death record for a player.
    pub fn last_death(&self, player: &str) -> Option<DeathRecord> {
        self.cache.get(player)
    }

    /// Copy of every cached death record.
    pub fn snapshot(&self) -> HashMap<String, DeathRecord> {
        self.cache.snapshot()
    }

    /// Last server day observed by the rollover detector, if any tick has
    /// run yet.
    pub fn server_day(&self) -> Option<i64> {
        self.day.current()
    }

    /// Whether a collector base URL is configured.
    pub fn is_online(&self) -> bool {
        self.config.is_online()
    }

    /// The resolved collector configuration.
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Blocking collector health check, for operator diagnostics only.
    pub fn probe(&self) -> ProbeReport {
        probe(&self.config)
    }

    /// Stop dispatching and give queued deliveries up to `grace` to drain.
    pub fn shutdown(self, grace: Duration) {
        if let Some(dispatcher) = self.dispatcher {
            dispatcher.shutdown(grace);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::Location;
    use chrono::Utc;
    use std::collections::HashMap;

    /// Host stub: a fixed day (or a failing clock), counts, and player order.
    struct StubHost {
        day: Option<i64>,
        counts: HashMap<String, i64>,
        players: Vec<String>,
    }

    impl StubHost {
        fn with_day(day: i64) -> Self {
            Self {
                day: Some(day),
                counts: HashMap::new(),
                players: Vec::new(),
            }
        }

        fn broken_clock() -> Self {
            Self {
                day: None,
                counts: HashMap::new(),
                players: Vec::new(),
            }
        }
    }

    impl GameHost for StubHost {
        fn current_day_index(&self) -> Result<i64> {
            self.day
                .ok_or_else(|| Error::Host("world not loaded".to_string()))
        }

        fn death_count(&self, player: &str) -> i64 {
            self.counts.get(player).copied().unwrap_or(0)
        }

        fn online_players(&self) -> Vec<String> {
            self.players.clone()
        }
    }

    fn event(player: &str, count: i64) -> DeathEvent {
        DeathEvent {
            player: player.to_string(),
            death_count: count,
            timestamp: Utc::now(),
            location: Some(Location::new(10, 64, -5)),
            world: Some("minecraft:overworld".to_string()),
        }
    }

    fn offline_board() -> Deathboard {
        Deathboard::new(CollectorConfig::default()).unwrap()
    }

    #[test]
    fn test_offline_board_tracks_deaths() {
        let board = offline_board();
        assert!(!board.is_online());

        let host = StubHost::with_day(5);
        board.handle_death(&host, event("Alice", 3));

        let record = board.last_death("Alice").unwrap();
        assert_eq!(record.last_death_day, 5);
        assert_eq!(record.death_count, 3);
        assert_eq!(record.location, Some(Location::new(10, 64, -5)));
    }

    #[test]
    fn test_broken_clock_drops_death_event() {
        let board = offline_board();
        board.handle_death(&StubHost::broken_clock(), event("Alice", 1));
        assert!(board.last_death("Alice").is_none());
    }

    #[test]
    fn test_negative_count_clamped() {
        let board = offline_board();
        board.handle_death(&StubHost::with_day(0), event("Alice", -2));
        assert_eq!(board.last_death("Alice").unwrap().death_count, 0);
    }

    #[test]
    fn test_check_day_seeds_then_tracks() {
        let board = offline_board();
        assert!(board.server_day().is_none());

        board.check_day(&StubHost::with_day(5));
        assert_eq!(board.server_day(), Some(5));

        board.check_day(&StubHost::with_day(6));
        assert_eq!(board.server_day(), Some(6));
    }

    #[test]
    fn test_check_day_broken_clock_is_noop() {
        let board = offline_board();
        board.check_day(&StubHost::with_day(5));
        board.check_day(&StubHost::broken_clock());
        assert_eq!(board.server_day(), Some(5));
    }

    #[test]
    fn test_full_board_merges_cache_and_counts() {
        let board = offline_board();
        let mut host = StubHost::with_day(9);
        host.players = vec!["Alice".to_string(), "Bob".to_string()];
        host.counts.insert("Alice".to_string(), 7);

        // Alice died earlier on day 5 with a stale count of 3.
        board.handle_death(&StubHost::with_day(5), event("Alice", 3));

        let payload = board.full_board(&host);
        let keys: Vec<&String> = payload.keys().collect();
        assert_eq!(keys, ["Alice", "Bob"]);

        // Live count wins over the cached snapshot.
        assert_eq!(payload["Alice"]["death_count"], 7);
        assert_eq!(payload["Alice"]["last_death_day"], 5);

        // Bob never died: current day fallback, no location/world.
        assert_eq!(payload["Bob"]["death_count"], 0);
        assert_eq!(payload["Bob"]["last_death_day"], 9);
        assert!(payload["Bob"].get("world").is_none());
    }

    #[test]
    fn test_full_board_without_any_day_source() {
        let board = offline_board();
        let mut host = StubHost::broken_clock();
        host.players = vec!["Bob".to_string()];

        // No clock, no seeded cursor: no day is invented for Bob.
        let payload = board.full_board(&host);
        assert_eq!(payload["Bob"]["death_count"], 0);
        assert!(payload["Bob"].get("last_death_day").is_none());
    }

    #[test]
    fn test_full_board_falls_back_to_cursor_day() {
        let board = offline_board();
        board.check_day(&StubHost::with_day(7));

        let mut host = StubHost::broken_clock();
        host.players = vec!["Bob".to_string()];

        let payload = board.full_board(&host);
        assert_eq!(payload["Bob"]["last_death_day"], 7);
    }

    #[test]
    fn test_shutdown_offline_board() {
        offline_board().shutdown(Duration::from_millis(10));
    }
}

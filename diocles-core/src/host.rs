//! Host server abstraction
//!
//! The deathboard never owns a clock or a counter store; both belong to the
//! game server it runs inside. This trait is the seam through which the core
//! reads them, and the seam tests use to drive the engine without a server.

use crate::error::Result;
use crate::types::TICKS_PER_DAY;

/// Read-only view of the host game server.
///
/// All three reads are expected to be cheap; `current_day_index` is the only
/// fallible one because the host world may not be loaded yet during startup
/// or shutdown.
pub trait GameHost {
    /// Current server day: host clock ticks divided by [`TICKS_PER_DAY`].
    /// Non-decreasing over the life of the process.
    fn current_day_index(&self) -> Result<i64>;

    /// Authoritative death count for a player, creating the scoreboard slot
    /// if it does not exist yet.
    fn death_count(&self, player: &str) -> i64;

    /// Names of all currently-connected players, in the host's own
    /// presentation order.
    fn online_players(&self) -> Vec<String>;
}

/// Convert a raw host clock value (time of day in ticks) to a day index.
pub fn day_index_from_ticks(ticks: i64) -> i64 {
    ticks / TICKS_PER_DAY
}

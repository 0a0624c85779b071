//! # diocles-core
//!
//! Core library for diocles — a per-player death tracker that lives inside a
//! long-running game server and forwards state to an external HTTP collector
//! ("the deathboard").
//!
//! This library provides:
//! - The death-intake path and an in-memory last-death cache
//! - A day-rollover detector that triggers a full-board resync
//! - Merge logic reconciling live scoreboard counts with cached detail
//! - An asynchronous, fire-and-forget delivery pool and a health prober
//!
//! ## Architecture
//!
//! The host server remains authoritative for the clock and the per-player
//! death counters; diocles only reads them (through the [`GameHost`] trait)
//! and supplements them with detail they do not retain — death time,
//! location, and world. Delivery is best-effort: network failures never
//! block the host's tick loop or death handling, and a dropped payload is
//! simply superseded by the next complete snapshot.
//!
//! ## Example
//!
//! ```rust,no_run
//! use diocles_core::{CollectorConfig, Deathboard};
//! use std::path::Path;
//!
//! // Resolve collector config from env, falling back to the install's
//! // config/diocles.json, then build the board once at server start.
//! let config = CollectorConfig::resolve(Path::new("/srv/minecraft"));
//! let board = Deathboard::new(config).expect("failed to build deathboard");
//! ```

// Re-export commonly used items at the crate root
pub use board::{Deathboard, DEATHBOARD_ENDPOINT, SYNC_ENDPOINT};
pub use collector::{probe, ProbeReport};
pub use config::CollectorConfig;
pub use error::{Error, Result};
pub use host::GameHost;
pub use types::*;

// Public modules
pub mod board;
pub mod collector;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod types;

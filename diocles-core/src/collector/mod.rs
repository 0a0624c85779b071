//! Deathboard collector client
//!
//! Outbound HTTP to the external collector, split in two halves:
//!
//! - [`Dispatcher`]: asynchronous, fire-and-forget POST delivery of death
//!   and sync payloads, decoupled from the host's tick and death paths.
//! - [`probe`]: a synchronous, ordered-fallback health check used only for
//!   operator diagnostics.
//!
//! Delivery is best-effort and at-most-once: each payload is a complete
//! snapshot at send time, so the collector self-corrects on out-of-order or
//! dropped deliveries.

mod dispatcher;
mod probe;

pub use dispatcher::Dispatcher;
pub use probe::{probe, ProbeReport, PROBE_PATHS};

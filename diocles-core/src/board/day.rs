//! Server-day rollover detection
//!
//! A single cursor tracks the last observed day index. The first observation
//! after process start only seeds the cursor — triggering a sync there would
//! fire a spurious full sync on every server restart.

use std::sync::atomic::{AtomicI64, Ordering};

/// Sentinel for "no day observed yet".
const UNINITIALIZED: i64 = i64::MIN;

/// Edge-detector over the host's day index.
///
/// Ticks are serialized by the host, but the cursor is also read by
/// diagnostic paths, so all access goes through one atomic.
#[derive(Debug)]
pub struct DayCursor {
    last_day: AtomicI64,
}

impl Default for DayCursor {
    fn default() -> Self {
        Self {
            last_day: AtomicI64::new(UNINITIALIZED),
        }
    }
}

impl DayCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current day index; returns `true` exactly when a rollover is
    /// detected (a strict change from the previously stored day). The first
    /// observation seeds the cursor and never reports a rollover.
    pub fn observe(&self, day: i64) -> bool {
        let prev = self.last_day.swap(day, Ordering::SeqCst);
        prev != UNINITIALIZED && prev != day
    }

    /// Last observed day, if any.
    pub fn current(&self) -> Option<i64> {
        match self.last_day.load(Ordering::SeqCst) {
            UNINITIALIZED => None,
            day => Some(day),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_observation_never_rolls() {
        let cursor = DayCursor::new();
        assert!(cursor.current().is_none());
        assert!(!cursor.observe(5));
        assert_eq!(cursor.current(), Some(5));
    }

    #[test]
    fn test_unchanged_day_never_rolls() {
        let cursor = DayCursor::new();
        cursor.observe(5);
        assert!(!cursor.observe(5));
        assert!(!cursor.observe(5));
        assert_eq!(cursor.current(), Some(5));
    }

    #[test]
    fn test_strict_change_rolls_exactly_once() {
        let cursor = DayCursor::new();
        cursor.observe(5);
        assert!(cursor.observe(6));
        assert!(!cursor.observe(6));
        assert_eq!(cursor.current(), Some(6));
    }

    #[test]
    fn test_any_strict_difference_counts() {
        // The host day should not regress, but the detector is a plain
        // inequality check either way.
        let cursor = DayCursor::new();
        cursor.observe(5);
        assert!(cursor.observe(4));
        assert_eq!(cursor.current(), Some(4));
    }
}

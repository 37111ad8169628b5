//! Engine counters.
//!
//! Tracks how many intents the worker resolved or discarded and how many
//! battles ran, for monitoring and debugging.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters updated by the battle worker.
///
/// Uses atomics for lock-free reads from any handle.
#[derive(Debug, Default)]
pub struct EngineMetrics {
    /// Triggers that produced a combat event
    resolved: AtomicU64,

    /// Triggers that arrived but changed nothing (dead combatant, game over,
    /// engine stopped)
    ignored: AtomicU64,

    /// Intents dropped because they belonged to an earlier battle
    stale: AtomicU64,

    battles_started: AtomicU64,
    battles_finished: AtomicU64,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_resolved(&self) {
        self.resolved.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_ignored(&self) {
        self.ignored.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_stale(&self) {
        self.stale.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_started(&self) {
        self.battles_started.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_finished(&self) {
        self.battles_finished.fetch_add(1, Ordering::Relaxed);
    }

    pub fn resolved(&self) -> u64 {
        self.resolved.load(Ordering::Relaxed)
    }

    pub fn ignored(&self) -> u64 {
        self.ignored.load(Ordering::Relaxed)
    }

    pub fn stale(&self) -> u64 {
        self.stale.load(Ordering::Relaxed)
    }

    pub fn battles_started(&self) -> u64 {
        self.battles_started.load(Ordering::Relaxed)
    }

    pub fn battles_finished(&self) -> u64 {
        self.battles_finished.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let metrics = EngineMetrics::new();
        metrics.record_resolved();
        metrics.record_resolved();
        metrics.record_stale();
        metrics.record_started();

        assert_eq!(metrics.resolved(), 2);
        assert_eq!(metrics.stale(), 1);
        assert_eq!(metrics.ignored(), 0);
        assert_eq!(metrics.battles_started(), 1);
        assert_eq!(metrics.battles_finished(), 0);
    }
}

//! Running command counters.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::time::Instant;

/// Lifetime totals plus a smoothed execution duration.
///
/// Every recorded start must be matched by exactly one recorded end;
/// [`CommandStats::track`] returns a guard that does this on drop.
#[derive(Debug, Default)]
pub struct CommandStats {
    inner: Mutex<StatsSnapshot>,
}

/// Point-in-time copy of [`CommandStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    /// Commands admitted since startup.
    pub total: u64,
    /// Commands admitted and not yet finished.
    pub active: u64,
    /// Halved toward each new non-zero duration.
    pub average: Duration,
}

impl CommandStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_start(&self) {
        let mut s = self.inner.lock().unwrap();
        s.total += 1;
        s.active += 1;
    }

    /// Zero durations leave the average unchanged.
    pub fn record_end(&self, elapsed: Duration) {
        let mut s = self.inner.lock().unwrap();
        s.active = s.active.saturating_sub(1);
        if !elapsed.is_zero() {
            s.average = (s.average + elapsed) / 2;
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        *self.inner.lock().unwrap()
    }

    /// Record a start now and the matching end when the guard drops.
    pub fn track(self: &Arc<Self>) -> StatsGuard {
        self.record_start();
        StatsGuard {
            stats: Arc::clone(self),
            started: Instant::now(),
        }
    }
}

pub struct StatsGuard {
    stats: Arc<CommandStats>,
    started: Instant,
}

impl StatsGuard {
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Drop for StatsGuard {
    fn drop(&mut self) {
        self.stats.record_end(self.started.elapsed());
    }
}

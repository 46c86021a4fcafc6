//! Clock implementations

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use lipsync_core::PlaybackTime;

/// Source of playback time
pub trait Clock {
    /// Current time. MUST be monotonically non-decreasing.
    fn now(&self) -> PlaybackTime;
}

/// Wall clock backed by the OS monotonic clock
///
/// Unlike a frame-smoothing clock this never clamps jumps: after the host
/// was suspended, elapsed-time driven playback is expected to skip ahead.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    reference: Instant,
}

impl MonotonicClock {
    /// Clock starting at zero now
    pub fn new() -> Self {
        MonotonicClock {
            reference: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> PlaybackTime {
        PlaybackTime::from_micros(self.reference.elapsed().as_micros() as u64)
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    micros: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(t: PlaybackTime) -> Self {
        ManualClock {
            micros: Arc::new(AtomicU64::new(t.as_micros())),
        }
    }

    /// Move forward by `dt`, returning the new time
    pub fn advance(&self, dt: Duration) -> PlaybackTime {
        let dt = dt.as_micros() as u64;
        let prev = self.micros.fetch_add(dt, Ordering::SeqCst);
        PlaybackTime::from_micros(prev.saturating_add(dt))
    }

    /// Jump to `t`. Only allowed to move forward.
    pub fn set(&self, t: PlaybackTime) {
        self.micros.fetch_max(t.as_micros(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> PlaybackTime {
        PlaybackTime::from_micros(self.micros.load(Ordering::SeqCst))
    }
}

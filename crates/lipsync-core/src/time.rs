//! Time primitives for playback
//!
//! All animation timing is expressed as `PlaybackTime`: monotonic
//! microseconds since the owning clock's epoch. Time is always passed in
//! explicitly, never read from a global clock.

use std::ops::{Add, Sub};
use std::time::Duration;

/// Playback time - monotonic, local-driven
/// Represented as microseconds since clock epoch
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PlaybackTime(pub u64);

impl PlaybackTime {
    pub const ZERO: PlaybackTime = PlaybackTime(0);

    #[inline]
    pub fn from_micros(micros: u64) -> Self {
        PlaybackTime(micros)
    }

    #[inline]
    pub fn from_millis(millis: u64) -> Self {
        PlaybackTime(millis * 1000)
    }

    #[inline]
    pub fn from_secs_f64(secs: f64) -> Self {
        PlaybackTime((secs.max(0.0) * 1_000_000.0) as u64)
    }

    #[inline]
    pub fn as_micros(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_millis(self) -> u64 {
        self.0 / 1000
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    #[inline]
    pub fn saturating_add(self, duration: Duration) -> Self {
        PlaybackTime(self.0.saturating_add(duration.as_micros() as u64))
    }

    /// Time elapsed since `earlier`, zero if `earlier` is in the future
    #[inline]
    pub fn since(self, earlier: PlaybackTime) -> Duration {
        self - earlier
    }
}

impl Add<Duration> for PlaybackTime {
    type Output = PlaybackTime;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl Sub<PlaybackTime> for PlaybackTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: PlaybackTime) -> Self::Output {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

impl std::fmt::Debug for PlaybackTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t({:.3}ms)", self.0 as f64 / 1000.0)
    }
}

/// Scale a duration by the inverse of a speed multiplier.
///
/// `speed` must already be clamped to a positive range by the caller.
#[inline]
pub fn scale_by_speed(duration: Duration, speed: f32) -> Duration {
    let micros = duration.as_micros() as f64 / speed as f64;
    Duration::from_micros(micros.round() as u64)
}

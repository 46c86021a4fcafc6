//! Speech synchronization configuration
//!
//! The duration constants are empirical. They are kept as overridable
//! fields rather than derived.

use std::time::Duration;

use lipsync_core::{LipSyncError, LipSyncResult};

/// Slowest / fastest engine rate taken into account
const RATE_RANGE: (f32, f32) = (0.1, 10.0);

/// Speech synchronization configuration
#[derive(Clone, Debug)]
pub struct SyncConfig {
    /// Uniform per-phoneme duration estimate at rate 1.0
    pub phoneme_estimate: Duration,
    /// Multiplier applied to the estimate (0.8 = 20% shorter)
    pub estimate_reduction: f32,
    /// How long after speech goes quiet the session is allowed to live
    pub end_grace: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            phoneme_estimate: Duration::from_millis(100),
            estimate_reduction: 0.8,
            end_grace: Duration::from_millis(50),
        }
    }
}

impl SyncConfig {
    /// Close sessions almost as soon as speech stops
    pub fn strict() -> Self {
        SyncConfig {
            end_grace: Duration::from_millis(20),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> LipSyncResult<()> {
        if self.phoneme_estimate.is_zero() {
            return Err(LipSyncError::InvalidConfig(
                "phoneme_estimate must be non-zero".into(),
            ));
        }
        if !(self.estimate_reduction > 0.0 && self.estimate_reduction <= 1.0) {
            return Err(LipSyncError::InvalidConfig(format!(
                "estimate_reduction {} outside (0, 1]",
                self.estimate_reduction
            )));
        }
        Ok(())
    }

    /// Estimated duration of one phoneme at engine `rate`
    pub fn per_phoneme_estimate(&self, rate: f32) -> Duration {
        let rate = if rate.is_nan() {
            1.0
        } else {
            rate.clamp(RATE_RANGE.0, RATE_RANGE.1)
        };
        let micros =
            self.phoneme_estimate.as_micros() as f64 * self.estimate_reduction as f64 / rate as f64;
        Duration::from_micros((micros.round() as u64).max(1))
    }

    /// Expected total duration of `count` phonemes at engine `rate`
    pub fn expected_duration(&self, count: usize, rate: f32) -> Duration {
        self.per_phoneme_estimate(rate) * count as u32
    }
}

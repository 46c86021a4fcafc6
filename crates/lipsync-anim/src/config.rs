//! Animation configuration

use std::time::Duration;

use lipsync_core::{LipSyncError, LipSyncResult};
use lipsync_time::Easing;

/// Slowest allowed animation speed multiplier
pub const MIN_SPEED: f32 = 0.1;
/// Fastest allowed animation speed multiplier
pub const MAX_SPEED: f32 = 3.0;

/// Animation driver configuration
#[derive(Clone, Debug)]
pub struct AnimationConfig {
    /// Blend window between consecutive poses
    pub blend_window: Duration,
    /// Decay to neutral when a session ends or is stopped
    pub decay_window: Duration,
    /// Decay to neutral when the speech engine fails
    pub error_decay_window: Duration,
    /// Weight of the generic open pose shown during pauses and unknown phonemes
    pub pause_weight: f32,
    /// Candidate shape names for the pause pose
    pub pause_targets: Vec<String>,
    /// Step duration for phonemes with no viseme
    pub default_phoneme_duration: Duration,
    /// Speed multiplier [MIN_SPEED - MAX_SPEED]
    pub speed: f32,
    /// Blend curve
    pub easing: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            blend_window: Duration::from_millis(40),
            decay_window: Duration::from_millis(180),
            error_decay_window: Duration::from_millis(100),
            pause_weight: 0.2,
            pause_targets: vec!["mouthOpen".into(), "jawOpen".into(), "A".into()],
            default_phoneme_duration: Duration::from_millis(120),
            speed: 1.0,
            easing: Easing::EaseInOutQuad,
        }
    }
}

impl AnimationConfig {
    /// Short blends for fast, crisp mouth movement
    pub fn snappy() -> Self {
        AnimationConfig {
            blend_window: Duration::from_millis(20),
            decay_window: Duration::from_millis(150),
            ..Default::default()
        }
    }

    /// Long blends for a softer, lazier mouth
    pub fn relaxed() -> Self {
        AnimationConfig {
            blend_window: Duration::from_millis(70),
            decay_window: Duration::from_millis(200),
            pause_weight: 0.3,
            ..Default::default()
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = clamp_speed(speed);
        self
    }

    pub fn validate(&self) -> LipSyncResult<()> {
        if !(0.0..=1.0).contains(&self.pause_weight) {
            return Err(LipSyncError::InvalidConfig(format!(
                "pause_weight {} outside [0, 1]",
                self.pause_weight
            )));
        }
        if !(MIN_SPEED..=MAX_SPEED).contains(&self.speed) {
            return Err(LipSyncError::InvalidConfig(format!(
                "speed {} outside [{MIN_SPEED}, {MAX_SPEED}]",
                self.speed
            )));
        }
        if self.default_phoneme_duration.is_zero() {
            return Err(LipSyncError::InvalidConfig(
                "default_phoneme_duration must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Clamp a speed multiplier into the supported range
pub fn clamp_speed(speed: f32) -> f32 {
    if speed.is_nan() {
        1.0
    } else {
        speed.clamp(MIN_SPEED, MAX_SPEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        assert!(AnimationConfig::default().validate().is_ok());
        assert!(AnimationConfig::snappy().validate().is_ok());
        assert!(AnimationConfig::relaxed().validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let cfg = AnimationConfig {
            pause_weight: 1.5,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(LipSyncError::InvalidConfig(_))));

        let cfg = AnimationConfig {
            speed: 9.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_clamp_speed() {
        assert_eq!(clamp_speed(0.0), MIN_SPEED);
        assert_eq!(clamp_speed(10.0), MAX_SPEED);
        assert_eq!(clamp_speed(f32::NAN), 1.0);
        assert_eq!(AnimationConfig::default().with_speed(5.0).speed, MAX_SPEED);
    }
}

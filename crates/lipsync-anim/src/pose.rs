//! Target pose construction

use std::time::Duration;

use lipsync_core::{scale_by_speed, WeightVector};
use lipsync_morph::TargetIndex;
use lipsync_phoneme::{lookup, Alphabet, Phoneme, VisemeDescriptor};

use crate::AnimationConfig;

/// Viseme for a phoneme. The pause sentinel never has one.
pub fn viseme_for(alphabet: Alphabet, phoneme: &Phoneme) -> Option<&'static VisemeDescriptor> {
    if phoneme.is_pause() {
        None
    } else {
        lookup(alphabet, phoneme.as_str())
    }
}

/// Target weights for one phoneme on a rig exposing `targets`.
///
/// Pauses and unknown phonemes get a small open pose instead of silence.
/// Candidates that resolve to nothing are dropped; the rest still apply.
pub fn target_pose(
    alphabet: Alphabet,
    phoneme: &Phoneme,
    targets: &TargetIndex,
    config: &AnimationConfig,
) -> WeightVector {
    let mut pose = WeightVector::neutral();

    match viseme_for(alphabet, phoneme) {
        Some(viseme) => {
            if let Some(name) = targets.resolve(viseme.primary_targets) {
                pose.raise(name, viseme.primary_weight());
            }
            if !viseme.secondary_targets.is_empty() {
                if let Some(name) = targets.resolve(viseme.secondary_targets) {
                    pose.raise(name, viseme.secondary_weight());
                }
            }
        }
        None => {
            if let Some(name) = targets.resolve(config.pause_targets.as_slice()) {
                pose.raise(name, config.pause_weight);
            }
        }
    }

    pose
}

/// Unscaled duration of one phoneme
pub fn phoneme_duration(alphabet: Alphabet, phoneme: &Phoneme, config: &AnimationConfig) -> Duration {
    viseme_for(alphabet, phoneme)
        .map(VisemeDescriptor::duration)
        .unwrap_or(config.default_phoneme_duration)
}

/// Delay before the step after `phoneme`, at `speed`
pub fn step_delay(
    alphabet: Alphabet,
    phoneme: &Phoneme,
    config: &AnimationConfig,
    speed: f32,
) -> Duration {
    scale_by_speed(phoneme_duration(alphabet, phoneme, config), speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig(names: &[&str]) -> TargetIndex {
        TargetIndex::new(names.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_vowel_pose() {
        let targets = rig(&["mouthOpen", "A", "I", "ee"]);
        let pose = target_pose(
            Alphabet::Latin,
            &Phoneme::from_static("i"),
            &targets,
            &AnimationConfig::default(),
        );
        assert!((pose.get("I") - 0.85).abs() < 1e-6);
        assert!(pose.get("mouthOpen") > 0.0);
        assert_eq!(pose.get("ee"), 0.0);
    }

    #[test]
    fn test_pause_pose_is_small_open() {
        let targets = rig(&["mouthOpen", "A"]);
        let cfg = AnimationConfig::default();
        let pose = target_pose(Alphabet::Latin, &Phoneme::PAUSE, &targets, &cfg);
        assert_eq!(pose.get("mouthOpen"), cfg.pause_weight);
        assert_eq!(pose.len(), 1);
    }

    #[test]
    fn test_unknown_phoneme_uses_pause_pose() {
        let targets = rig(&["mouthOpen"]);
        let cfg = AnimationConfig::default();
        let pose = target_pose(Alphabet::Latin, &Phoneme::new("é"), &targets, &cfg);
        assert_eq!(pose.get("mouthOpen"), cfg.pause_weight);
    }

    #[test]
    fn test_unresolved_contribution_dropped() {
        // "i" has primary I-shapes and secondary mouthOpen; only the secondary resolves
        let targets = rig(&["mouthOpen"]);
        let pose = target_pose(
            Alphabet::Latin,
            &Phoneme::from_static("i"),
            &targets,
            &AnimationConfig::default(),
        );
        assert_eq!(pose.len(), 1);
        assert!((pose.get("mouthOpen") - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_step_delay_scales_with_speed() {
        let cfg = AnimationConfig::default();
        let p = Phoneme::from_static("a");
        let normal = step_delay(Alphabet::Latin, &p, &cfg, 1.0);
        let double = step_delay(Alphabet::Latin, &p, &cfg, 2.0);
        assert_eq!(normal, Duration::from_millis(140));
        assert_eq!(double, normal / 2);
    }

    #[test]
    fn test_pause_uses_default_duration() {
        let cfg = AnimationConfig::default();
        assert_eq!(
            phoneme_duration(Alphabet::Ipa, &Phoneme::PAUSE, &cfg),
            cfg.default_phoneme_duration
        );
    }
}

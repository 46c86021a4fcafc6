//! Easing curves for pose blending

/// Interpolation curve, mapping progress in [0, 1] to blend factor in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Symmetric quadratic: accelerate through the first half, decelerate
    /// through the second
    #[default]
    EaseInOutQuad,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::EaseInOutQuad => ease_in_out_quad(t),
        }
    }
}

/// Quadratic ease-in/ease-out
#[inline]
pub fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert_eq!(ease_in_out_quad(1.0), 1.0);
        assert!((ease_in_out_quad(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_slow_start_and_finish() {
        // accelerating first half stays under linear
        assert!(ease_in_out_quad(0.25) < 0.25);
        // decelerating second half stays over linear
        assert!(ease_in_out_quad(0.75) > 0.75);
    }

    #[test]
    fn test_apply_clamps() {
        assert_eq!(Easing::EaseInOutQuad.apply(-1.0), 0.0);
        assert_eq!(Easing::EaseInOutQuad.apply(2.0), 1.0);
        assert_eq!(Easing::Linear.apply(0.3), 0.3);
    }

    proptest! {
        #[test]
        fn ease_is_monotonic(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(ease_in_out_quad(lo) <= ease_in_out_quad(hi) + 1e-6);
        }

        #[test]
        fn ease_is_symmetric(t in 0.0f32..=1.0) {
            let s = ease_in_out_quad(t) + ease_in_out_quad(1.0 - t);
            prop_assert!((s - 1.0).abs() < 1e-5);
        }
    }
}

//! Sparse morph weight vectors
//!
//! A `WeightVector` maps resolved morph target names to influences in
//! `[0.0, 1.0]`. Absent entries are zero.

use std::collections::BTreeMap;

/// Influences below this are treated as zero when pruning
pub const WEIGHT_EPSILON: f32 = 1e-4;

/// Sparse name -> weight map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightVector {
    weights: BTreeMap<String, f32>,
}

impl WeightVector {
    /// Neutral pose (every weight zero)
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Weight for `name`, zero if absent
    pub fn get(&self, name: &str) -> f32 {
        self.weights.get(name).copied().unwrap_or(0.0)
    }

    /// Set a weight, clamped to `[0.0, 1.0]`
    pub fn set(&mut self, name: impl Into<String>, value: f32) {
        self.weights.insert(name.into(), clamp_weight(value));
    }

    /// Raise a weight to at least `value`.
    ///
    /// Used when several contributions resolve to the same target.
    pub fn raise(&mut self, name: impl Into<String>, value: f32) {
        let value = clamp_weight(value);
        let entry = self.weights.entry(name.into()).or_insert(0.0);
        if value > *entry {
            *entry = value;
        }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Every weight is (effectively) zero
    pub fn is_neutral(&self) -> bool {
        self.weights.values().all(|w| *w <= WEIGHT_EPSILON)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }

    /// Drop entries that have decayed to zero
    pub fn prune(&mut self) {
        self.weights.retain(|_, w| *w > WEIGHT_EPSILON);
    }

    /// Interpolate towards `target` by `t` in `[0.0, 1.0]`.
    ///
    /// Names present on either side are carried; a name missing on one side
    /// counts as zero there.
    pub fn lerp(&self, target: &WeightVector, t: f32) -> WeightVector {
        let t = t.clamp(0.0, 1.0);
        let mut out = BTreeMap::new();

        for name in self.weights.keys().chain(target.weights.keys()) {
            if out.contains_key(name) {
                continue;
            }
            let a = self.get(name);
            let b = target.get(name);
            out.insert(name.clone(), a + (b - a) * t);
        }

        WeightVector { weights: out }
    }
}

impl<S: Into<String>> FromIterator<(S, f32)> for WeightVector {
    fn from_iter<I: IntoIterator<Item = (S, f32)>>(iter: I) -> Self {
        let mut v = WeightVector::neutral();
        for (name, value) in iter {
            v.set(name, value);
        }
        v
    }
}

#[inline]
fn clamp_weight(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_absent_is_zero() {
        let v = WeightVector::neutral();
        assert_eq!(v.get("mouthOpen"), 0.0);
        assert!(v.is_neutral());
    }

    #[test]
    fn test_set_clamps() {
        let mut v = WeightVector::neutral();
        v.set("A", 1.7);
        v.set("B", -0.3);
        v.set("C", f32::NAN);
        assert_eq!(v.get("A"), 1.0);
        assert_eq!(v.get("B"), 0.0);
        assert_eq!(v.get("C"), 0.0);
    }

    #[test]
    fn test_raise_keeps_max() {
        let mut v = WeightVector::neutral();
        v.raise("A", 0.4);
        v.raise("A", 0.2);
        assert_eq!(v.get("A"), 0.4);
        v.raise("A", 0.9);
        assert_eq!(v.get("A"), 0.9);
    }

    #[test]
    fn test_lerp_union_of_names() {
        let from: WeightVector = [("A", 1.0)].into_iter().collect();
        let to: WeightVector = [("I", 0.8)].into_iter().collect();

        let mid = from.lerp(&to, 0.5);
        assert!((mid.get("A") - 0.5).abs() < 1e-6);
        assert!((mid.get("I") - 0.4).abs() < 1e-6);

        let end = from.lerp(&to, 1.0);
        assert_eq!(end.get("A"), 0.0);
        assert_eq!(end.get("I"), 0.8);
    }

    #[test]
    fn test_prune() {
        let mut v: WeightVector = [("A", 0.0), ("B", 0.5)].into_iter().collect();
        v.prune();
        assert_eq!(v.len(), 1);
        assert_eq!(v.names().collect::<Vec<_>>(), vec!["B"]);
    }

    proptest! {
        #[test]
        fn lerp_stays_in_unit_range(a in -2.0f32..2.0, b in -2.0f32..2.0, t in -1.0f32..2.0) {
            let from: WeightVector = [("X", a)].into_iter().collect();
            let to: WeightVector = [("X", b)].into_iter().collect();
            let w = from.lerp(&to, t).get("X");
            prop_assert!((0.0..=1.0).contains(&w));
        }
    }
}

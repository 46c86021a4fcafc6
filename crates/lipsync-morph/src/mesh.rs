//! Morph target meshes
//!
//! A morph target set is simply `[M]` where `M: MorphMesh`. The core
//! borrows it for the duration of one call and never keeps it.

use std::collections::HashMap;

use lipsync_core::WeightVector;

/// A mesh exposing named morph targets
pub trait MorphMesh {
    /// Index of the target called `name` (exact, case-sensitive)
    fn target_index(&self, name: &str) -> Option<usize>;

    /// All target names on this mesh
    fn target_names(&self) -> Vec<&str>;

    /// Influence values, indexed by target index
    fn influences(&self) -> &[f32];

    /// Writable influence values, indexed by target index
    fn influences_mut(&mut self) -> &mut [f32];
}

/// Plain in-memory mesh: a dictionary plus a parallel influence array
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshHandle {
    dictionary: HashMap<String, usize>,
    influences: Vec<f32>,
}

impl MeshHandle {
    /// Mesh with one target per name, in order, all at zero
    pub fn with_targets<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut mesh = MeshHandle::default();
        for name in names {
            mesh.add_target(name);
        }
        mesh
    }

    /// Append a target, returning its index. Existing names keep theirs.
    pub fn add_target(&mut self, name: impl Into<String>) -> usize {
        let next = self.influences.len();
        let index = *self.dictionary.entry(name.into()).or_insert(next);
        if index == next {
            self.influences.push(0.0);
        }
        index
    }

    /// Influence of a target by name
    pub fn influence(&self, name: &str) -> Option<f32> {
        self.dictionary
            .get(name)
            .and_then(|i| self.influences.get(*i))
            .copied()
    }
}

impl MorphMesh for MeshHandle {
    fn target_index(&self, name: &str) -> Option<usize> {
        self.dictionary.get(name).copied()
    }

    fn target_names(&self) -> Vec<&str> {
        let mut names: Vec<(&str, usize)> =
            self.dictionary.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        names.sort_by_key(|(_, i)| *i);
        names.into_iter().map(|(k, _)| k).collect()
    }

    fn influences(&self) -> &[f32] {
        &self.influences
    }

    fn influences_mut(&mut self) -> &mut [f32] {
        &mut self.influences
    }
}

/// Union of target names across all meshes, first-seen order, no duplicates
pub fn available_names<M: MorphMesh>(meshes: &[M]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for mesh in meshes {
        for name in mesh.target_names() {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}

/// True when there is nothing to animate (model not loaded yet)
pub fn is_inert<M: MorphMesh>(meshes: &[M]) -> bool {
    meshes.iter().all(|m| m.influences().is_empty())
}

/// Set `name` to `value` on every mesh that has it.
///
/// Returns how many meshes were written. Values are clamped to [0.0 - 1.0].
pub fn set_influence<M: MorphMesh>(meshes: &mut [M], name: &str, value: f32) -> usize {
    let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    let mut written = 0;
    for mesh in meshes.iter_mut() {
        if let Some(index) = mesh.target_index(name) {
            if let Some(slot) = mesh.influences_mut().get_mut(index) {
                *slot = value;
                written += 1;
            }
        }
    }
    written
}

/// Write a whole weight vector. Names absent from the vector are untouched.
pub fn apply_weights<M: MorphMesh>(meshes: &mut [M], weights: &WeightVector) {
    for (name, value) in weights.iter() {
        set_influence(meshes, name, value);
    }
}

/// Force every influence on every mesh to exactly zero
pub fn reset_all<M: MorphMesh>(meshes: &mut [M]) {
    for mesh in meshes.iter_mut() {
        mesh.influences_mut().iter_mut().for_each(|v| *v = 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_handle_targets() {
        let mut mesh = MeshHandle::with_targets(["mouthOpen", "A"]);
        assert_eq!(mesh.target_index("A"), Some(1));
        assert_eq!(mesh.add_target("A"), 1);
        assert_eq!(mesh.add_target("I"), 2);
        assert_eq!(mesh.target_names(), vec!["mouthOpen", "A", "I"]);
        assert_eq!(mesh.influences().len(), 3);
    }

    #[test]
    fn test_available_names_union() {
        let meshes = vec![
            MeshHandle::with_targets(["A", "I"]),
            MeshHandle::with_targets(["I", "U"]),
        ];
        assert_eq!(available_names(&meshes), vec!["A", "I", "U"]);
    }

    #[test]
    fn test_set_influence_all_meshes() {
        let mut meshes = vec![
            MeshHandle::with_targets(["A", "I"]),
            MeshHandle::with_targets(["A"]),
        ];
        assert_eq!(set_influence(&mut meshes, "A", 1.5), 2);
        assert_eq!(meshes[0].influence("A"), Some(1.0));
        assert_eq!(meshes[1].influence("A"), Some(1.0));
        assert_eq!(set_influence(&mut meshes, "missing", 0.5), 0);
    }

    #[test]
    fn test_reset_all() {
        let mut meshes = vec![MeshHandle::with_targets(["A", "I"])];
        set_influence(&mut meshes, "A", 0.7);
        set_influence(&mut meshes, "I", 0.2);
        reset_all(&mut meshes);
        assert!(meshes[0].influences().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_inert_sets() {
        let none: Vec<MeshHandle> = vec![];
        assert!(is_inert(&none));
        assert!(is_inert(&[MeshHandle::default()]));
        assert!(!is_inert(&[MeshHandle::with_targets(["A"])]));
    }
}

//! Simulated 3D viewer
//!
//! Owns a set of meshes the way a model loader would, with a few common
//! blend shape naming schemes, and keeps a per-frame influence history.

use lipsync_morph::{available_names, MeshHandle, MorphMesh};

/// Blend shape naming scheme of a simulated model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigKind {
    /// Abstract names used by the viseme tables
    Basic,
    /// ARKit-style face blend shapes
    ArKit,
    /// VRM vowel expressions with a prefixed mouth group
    Vrm,
    /// Model not loaded yet
    Unloaded,
}

impl RigKind {
    /// Target names per mesh
    pub fn meshes(self) -> Vec<Vec<&'static str>> {
        match self {
            RigKind::Basic => vec![vec!["mouthOpen", "A", "I", "ee"]],
            RigKind::ArKit => vec![
                vec![
                    "jawOpen",
                    "mouthClose",
                    "mouthFunnel",
                    "mouthPucker",
                    "mouthSmile_L",
                    "mouthSmile_R",
                    "mouthPress_L",
                    "mouthRollLower",
                    "tongueOut",
                ],
                // teeth mesh shares the jaw
                vec!["jawOpen"],
            ],
            RigKind::Vrm => vec![vec![
                "Fcl_MTH_A",
                "Fcl_MTH_I",
                "Fcl_MTH_U",
                "Fcl_MTH_E",
                "Fcl_MTH_O",
                "Fcl_MTH_Close",
                "Fcl_EYE_Close",
            ]],
            RigKind::Unloaded => Vec::new(),
        }
    }
}

/// One recorded frame
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    /// (target name, influence) for every target of every mesh
    pub influences: Vec<(String, f32)>,
}

impl FrameSnapshot {
    pub fn get(&self, name: &str) -> Option<f32> {
        self.influences
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn is_neutral(&self) -> bool {
        self.influences.iter().all(|(_, v)| *v == 0.0)
    }
}

/// Stand-in for the viewer that owns the morph targets
#[derive(Debug, Clone)]
pub struct SimulatedViewer {
    kind: RigKind,
    meshes: Vec<MeshHandle>,
    history: Vec<FrameSnapshot>,
}

impl SimulatedViewer {
    pub fn new(kind: RigKind) -> Self {
        let meshes = kind.meshes().into_iter().map(MeshHandle::with_targets).collect();
        SimulatedViewer {
            kind,
            meshes,
            history: Vec::new(),
        }
    }

    pub fn basic() -> Self {
        Self::new(RigKind::Basic)
    }

    pub fn arkit() -> Self {
        Self::new(RigKind::ArKit)
    }

    pub fn vrm() -> Self {
        Self::new(RigKind::Vrm)
    }

    pub fn unloaded() -> Self {
        Self::new(RigKind::Unloaded)
    }

    /// Swap the model, as a loader finishing would
    pub fn load(&mut self, kind: RigKind) {
        *self = Self::new(kind);
    }

    pub fn kind(&self) -> RigKind {
        self.kind
    }

    pub fn meshes(&self) -> &[MeshHandle] {
        &self.meshes
    }

    pub fn meshes_mut(&mut self) -> &mut [MeshHandle] {
        &mut self.meshes
    }

    pub fn target_names(&self) -> Vec<String> {
        available_names(&self.meshes)
    }

    /// Largest influence of `name` on any mesh right now
    pub fn influence(&self, name: &str) -> Option<f32> {
        self.meshes
            .iter()
            .filter_map(|m| m.influence(name))
            .reduce(f32::max)
    }

    pub fn is_neutral(&self) -> bool {
        self.meshes
            .iter()
            .all(|m| m.influences().iter().all(|v| *v == 0.0))
    }

    /// All influences within [0, 1]
    pub fn in_range(&self) -> bool {
        self.meshes
            .iter()
            .all(|m| m.influences().iter().all(|v| (0.0..=1.0).contains(v)))
    }

    /// Append the current influences to the history
    pub fn record(&mut self) {
        let influences = self
            .meshes
            .iter()
            .flat_map(|m| {
                m.target_names()
                    .into_iter()
                    .filter_map(|n| m.influence(n).map(|v| (n.to_string(), v)))
                    .collect::<Vec<_>>()
            })
            .collect();
        self.history.push(FrameSnapshot { influences });
    }

    pub fn history(&self) -> &[FrameSnapshot] {
        &self.history
    }

    /// Highest value `name` reached over the recorded history
    pub fn peak(&self, name: &str) -> f32 {
        self.history
            .iter()
            .filter_map(|f| f.get(name))
            .fold(0.0, f32::max)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

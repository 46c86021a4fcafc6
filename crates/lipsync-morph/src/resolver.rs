//! Shape name resolution
//!
//! Visemes name abstract shapes ("mouthOpen", "A"). Rigs name their blend
//! shapes however they like. Resolution is two passes over the candidate
//! list, both case-insensitive:
//!
//! 1. exact match, first candidate that has one wins;
//! 2. substring match in either direction, first candidate that has one
//!    wins, returning the first available name that matches it.
//!
//! An exact match for a later candidate beats a partial match for an
//! earlier one.

use crate::{available_names, MorphMesh};

/// Resolve `candidates` against `available`, returning the available name.
pub fn find_best_match<'a, C, A>(candidates: &[C], available: &'a [A]) -> Option<&'a str>
where
    C: AsRef<str>,
    A: AsRef<str>,
{
    let lowered: Vec<String> = available.iter().map(|a| a.as_ref().to_lowercase()).collect();
    best_match_index(candidates, &lowered).map(|i| available[i].as_ref())
}

/// Available target names of one morph target set, prepared for repeated
/// resolution during a session
#[derive(Debug, Clone, Default)]
pub struct TargetIndex {
    names: Vec<String>,
    lowered: Vec<String>,
}

impl TargetIndex {
    pub fn new(names: Vec<String>) -> Self {
        let lowered = names.iter().map(|n| n.to_lowercase()).collect();
        TargetIndex { names, lowered }
    }

    /// Snapshot the names exposed by `meshes`
    pub fn from_meshes<M: MorphMesh>(meshes: &[M]) -> Self {
        Self::new(available_names(meshes))
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Same policy as [`find_best_match`]
    pub fn resolve<C: AsRef<str>>(&self, candidates: &[C]) -> Option<&str> {
        best_match_index(candidates, &self.lowered).map(|i| self.names[i].as_str())
    }
}

fn best_match_index<C: AsRef<str>>(candidates: &[C], lowered: &[String]) -> Option<usize> {
    let wanted: Vec<String> = candidates
        .iter()
        .map(|c| c.as_ref().to_lowercase())
        .filter(|c| !c.is_empty())
        .collect();

    for candidate in &wanted {
        if let Some(i) = lowered.iter().position(|name| name == candidate) {
            return Some(i);
        }
    }

    for candidate in &wanted {
        if let Some(i) = lowered
            .iter()
            .position(|name| {
                !name.is_empty()
                    && (name.contains(candidate.as_str()) || candidate.contains(name.as_str()))
            })
        {
            return Some(i);
        }
    }

    None
}

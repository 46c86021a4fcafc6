//! Lip-sync Morph Targets
//!
//! The 3D viewer owns the meshes. This crate only describes what the
//! animation core needs from them (a name -> index dictionary and a
//! writable influence array) and how abstract shape names are matched to
//! whatever a particular rig happens to call its blend shapes.

pub mod mesh;
pub mod resolver;

pub use mesh::*;
pub use resolver::*;

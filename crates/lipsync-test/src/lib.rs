//! Lip-sync Test Harness - simulated hosts and end-to-end scenarios
//!
//! This crate provides:
//! - A simulated 3D viewer with common rig naming schemes
//! - A scripted speech engine following a timed lifecycle
//! - Frame chaos: jittery and stalling host frame schedulers
//! - A harness tying them to an animator on a manual clock
//! - End-to-end scenarios for the engine's observable properties

pub mod chaos;
pub mod engine;
pub mod harness;
pub mod scenarios;
pub mod viewer;

pub use chaos::*;
pub use engine::*;
pub use harness::*;
pub use scenarios::*;
pub use viewer::*;

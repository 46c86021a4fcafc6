//! Lip-sync Time - clocks and cooperative scheduling
//!
//! This crate implements the timing primitives the animation core runs on:
//! - Clocks: a monotonic wall clock and a manually advanced clock
//! - Timer queue: deferred continuations tagged with their owning session
//! - Easing curves for pose blending
//!
//! Everything is single-threaded and cooperative. The host calls in with
//! the current time; nothing here sleeps or spawns.

pub mod clock;
pub mod easing;
pub mod timer;

pub use clock::*;
pub use easing::*;
pub use timer::*;

//! Lip-sync Runtime - the animator and its host loop
//!
//! [`Animator`] puts every public operation behind one handle: silent
//! animation, spoken animation, stop, hard reset, manual target writes and
//! the animation speed. The host owns the meshes and passes them into each
//! call; the animator only ever borrows them.
//!
//! Each frame the host calls [`Animator::tick`], which:
//! 1. Reads the clock
//! 2. Picks up speech engine notifications
//! 3. Pushes the current spoken phoneme to the driver
//! 4. Runs due self-paced continuations
//! 5. Samples the blend and writes the influences
//!
//! Hosts without their own frame callback can use
//! [`Animator::run_until_idle`] on a tokio runtime.

pub mod animator;
pub mod logging;

pub use animator::*;
pub use logging::*;

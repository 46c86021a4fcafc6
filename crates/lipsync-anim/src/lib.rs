//! Lip-sync Animation - the viseme driver
//!
//! The driver walks a phoneme sequence over time and poses a borrowed
//! morph target set:
//!
//! ```text
//! Idle --start--> Playing --advance--> Playing
//!                    |                    |
//!                 stop()          sequence exhausted
//!                    v                    v
//!                 StoppingTransition (decay to neutral) --> Idle
//! ```
//!
//! Every step resolves the phoneme's viseme to a target weight vector and
//! blends the live weights toward it with an ease-in/ease-out curve.
//! Advancing is either self-paced (each step schedules the next on the
//! timer queue) or externally paced by the speech synchronization layer.
//!
//! At most one session is live. Starting a new one cancels the previous
//! session's pending continuations before anything else happens.

pub mod config;
pub mod driver;
pub mod pose;

pub use config::*;
pub use driver::*;
pub use pose::*;

//! Lip-sync Core - Fundamental types and primitives
//!
//! This crate defines the core types shared by every lip-sync component:
//! - Identifiers (SessionToken, UtteranceId)
//! - Time primitives (PlaybackTime)
//! - Sparse morph weight vectors
//! - Error types

pub mod error;
pub mod id;
pub mod time;
pub mod weights;

pub use error::*;
pub use id::*;
pub use time::*;
pub use weights::*;

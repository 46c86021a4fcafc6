//! Lip-sync Speech - keeping the mouth on the voice
//!
//! This is NOT audio analysis. No waveform is inspected; timing comes
//! from phoneme duration tables and the speech engine's lifecycle.
//!
//! # Modes
//!
//! - **Estimated** (`speak_text`): uniform per-phoneme estimate scaled by
//!   the engine rate, clock anchored at the utterance start, closed early
//!   when the engine's liveness query says it went quiet.
//! - **Timeline** (`speak_ipa`): per-phoneme durations from the IPA table,
//!   laid out up front, current entry found by interval containment,
//!   closed when the engine reports the end.
//!
//! Both modes stop advancing once speech has ended plus a short grace
//! period, close fast on engine errors, and cancel the previous utterance
//! before starting a new one.

pub mod config;
pub mod engine;
pub mod sync;
pub mod timeline;

pub use config::*;
pub use engine::*;
pub use sync::*;
pub use timeline::*;

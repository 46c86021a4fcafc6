//! Lip-sync Phonemes - from text to mouth shapes
//!
//! Two static tables describe the mouth pose (viseme) for each phoneme
//! symbol:
//!
//! - **Latin**: letters and common digraphs. Approximate, works on any text.
//! - **IPA**: International Phonetic Alphabet symbols. Phonetically exact,
//!   used whenever a transcription is available.
//!
//! The tables are never merged: their key spaces mean different things
//! (`"e"` is a letter in one and a close-mid vowel in the other). The
//! decomposers turn raw input into a sequence of symbols for one table,
//! with explicit pause markers between words. Decoding never fails; unknown
//! input degrades to a neutral mouth.

pub mod decompose;
pub mod phoneme;
pub mod tables;

pub use decompose::*;
pub use phoneme::*;
pub use tables::*;

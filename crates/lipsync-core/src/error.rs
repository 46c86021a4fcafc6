//! Error types for the lip-sync engine
//!
//! Only genuine external failures are errors. Unknown symbols, unresolved
//! morph targets, an unloaded model and superseded sessions are absorbed
//! where they happen.

use thiserror::Error;

/// Core lip-sync errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LipSyncError {
    // Speech engine errors
    #[error("Speech engine error: {0}")]
    SpeechEngine(String),

    #[error("Speech engine unavailable")]
    SpeechUnavailable,

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// Result type for lip-sync operations
pub type LipSyncResult<T> = Result<T, LipSyncError>;

//! Tracing subscriber setup

use lipsync_core::{LipSyncError, LipSyncResult};
use tracing_subscriber::EnvFilter;

/// Log output configuration
#[derive(Clone, Debug)]
pub struct LogConfig {
    /// Filter directive, overridden by `RUST_LOG` when set
    pub filter: String,
    /// One JSON object per line instead of human-readable output
    pub json: bool,
    /// Include the emitting module path
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            filter: "info".into(),
            json: false,
            with_target: true,
        }
    }
}

impl LogConfig {
    /// Per-session and per-phoneme detail from the lip-sync crates
    pub fn verbose() -> Self {
        LogConfig {
            filter: "info,lipsync_anim=trace,lipsync_speech=debug,lipsync_runtime=debug".into(),
            ..Default::default()
        }
    }

    /// Machine-readable output for log shipping
    pub fn json() -> Self {
        LogConfig {
            json: true,
            ..Default::default()
        }
    }

    /// Filter to install: `RUST_LOG` if set, else `self.filter`
    pub fn env_filter(&self) -> LipSyncResult<EnvFilter> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.filter)
                .map_err(|e| LipSyncError::InvalidConfig(format!("log filter: {e}"))),
        }
    }
}

/// Install the global tracing subscriber.
///
/// Fails if the filter does not parse or a subscriber is already installed.
pub fn init_tracing(config: &LogConfig) -> LipSyncResult<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.env_filter()?)
        .with_target(config.with_target);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| LipSyncError::Logging(e.to_string()))
}

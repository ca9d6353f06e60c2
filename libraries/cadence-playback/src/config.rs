//! Playback configuration
//!
//! Settings are layered the same way the server loads its own: built-in
//! defaults, then an optional TOML file, then `CADENCE_*` environment
//! variables (e.g. `CADENCE_FLUSH_THRESHOLD_SECS=45`).

use crate::error::{PlaybackError, Result};
use cadence_core::LoopMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the playback controller and session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Accumulated listening seconds that trigger a soft flush (default: 30)
    #[serde(default = "default_flush_threshold_secs")]
    pub flush_threshold_secs: f64,

    /// Largest tick-to-tick advance still counted as continuous playback (default: 5)
    #[serde(default = "default_max_tick_delta_secs")]
    pub max_tick_delta_secs: f64,

    /// Initial loop mode (default: none)
    #[serde(default)]
    pub loop_mode: LoopMode,

    /// Initial shuffle flag (default: false)
    #[serde(default)]
    pub shuffle: bool,

    /// Capacity of the session command queue (default: 64)
    #[serde(default = "default_command_queue_capacity")]
    pub command_queue_capacity: usize,

    /// Capacity of the session event queue (default: 256)
    #[serde(default = "default_event_queue_capacity")]
    pub event_queue_capacity: usize,
}

impl PlaybackConfig {
    /// Load configuration from an optional file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if path.exists() {
                settings = settings.add_source(config::File::from(path));
            }
        }

        settings = settings.add_source(config::Environment::with_prefix("CADENCE").try_parsing(true));

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.flush_threshold_secs.is_nan() || self.flush_threshold_secs <= 0.0 {
            return Err(PlaybackError::Config(format!(
                "flush_threshold_secs must be positive, got {}",
                self.flush_threshold_secs
            )));
        }

        if self.max_tick_delta_secs.is_nan() || self.max_tick_delta_secs <= 0.0 {
            return Err(PlaybackError::Config(format!(
                "max_tick_delta_secs must be positive, got {}",
                self.max_tick_delta_secs
            )));
        }

        if self.max_tick_delta_secs > self.flush_threshold_secs {
            return Err(PlaybackError::Config(
                "max_tick_delta_secs cannot exceed flush_threshold_secs".to_string(),
            ));
        }

        if self.command_queue_capacity == 0 || self.event_queue_capacity == 0 {
            return Err(PlaybackError::Config(
                "queue capacities must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

fn default_flush_threshold_secs() -> f64 {
    30.0
}

fn default_max_tick_delta_secs() -> f64 {
    5.0
}

fn default_command_queue_capacity() -> usize {
    64
}

fn default_event_queue_capacity() -> usize {
    256
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            flush_threshold_secs: default_flush_threshold_secs(),
            max_tick_delta_secs: default_max_tick_delta_secs(),
            loop_mode: LoopMode::None,
            shuffle: false,
            command_queue_capacity: default_command_queue_capacity(),
            event_queue_capacity: default_event_queue_capacity(),
        }
    }
}

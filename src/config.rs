//! Playback tuning loaded from an optional TOML file
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! stock behaviour: 100ms timer ticks, a 100ms seek debounce window, a 3s
//! restart threshold for "previous", and no autoplay or auto-advance.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;
pub const DEFAULT_SEEK_DEBOUNCE_MS: u64 = 100;
pub const DEFAULT_RESTART_THRESHOLD_SECS: f64 = 3.0;
pub const DEFAULT_VOLUME: f32 = 0.6;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaybackConfig {
    /// Period of the progress timer
    pub tick_interval_ms: u64,
    /// Window in which a newer seek replaces a pending one
    pub seek_debounce_ms: u64,
    /// "Previous" restarts the current track once more than this has elapsed
    pub restart_threshold_secs: f64,
    /// Start playing on next/previous even when paused
    pub autoplay_on_skip: bool,
    /// Move on to the next track when the current one finishes
    pub auto_advance: bool,
    pub initial_volume: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seek_debounce_ms: DEFAULT_SEEK_DEBOUNCE_MS,
            restart_threshold_secs: DEFAULT_RESTART_THRESHOLD_SECS,
            autoplay_on_skip: false,
            auto_advance: false,
            initial_volume: DEFAULT_VOLUME,
        }
    }
}

impl PlaybackConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PlaybackConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), "Loaded playback configuration");
        Ok(config)
    }

    /// Load `path` when given, otherwise fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                tracing::debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "tick_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if !self.restart_threshold_secs.is_finite() || self.restart_threshold_secs < 0.0 {
            return Err(ConfigError::Invalid {
                field: "restart_threshold_secs",
                reason: format!("{} is not a non-negative number", self.restart_threshold_secs),
            });
        }
        if !(0.0..=1.0).contains(&self.initial_volume) {
            return Err(ConfigError::Invalid {
                field: "initial_volume",
                reason: format!("{} is outside 0.0..=1.0", self.initial_volume),
            });
        }
        Ok(())
    }

    /// Never zero, even for a config built by hand that skipped `validate`
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn seek_debounce(&self) -> Duration {
        Duration::from_millis(self.seek_debounce_ms)
    }

    /// Negative, NaN or overflowing values fall back to the default threshold
    pub fn restart_threshold(&self) -> Duration {
        Duration::try_from_secs_f64(self.restart_threshold_secs)
            .unwrap_or(Duration::from_secs_f64(DEFAULT_RESTART_THRESHOLD_SECS))
    }
}

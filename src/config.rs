//! Player configuration, read from the bundled `assets/player.json`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::playback::{default_cues, LyricCue};

const EMBEDDED_CONFIG: &str = include_str!("../assets/player.json");

/// User-facing notification texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMessages {
    #[serde(default = "default_play_rejected")]
    pub play_rejected: String,
    #[serde(default = "default_load_failed")]
    pub load_failed: String,
}

impl Default for PlayerMessages {
    fn default() -> Self {
        Self {
            play_rejected: default_play_rejected(),
            load_failed: default_load_failed(),
        }
    }
}

fn default_play_rejected() -> String {
    "Click anywhere on the page, then try playing again.".to_string()
}

fn default_load_failed() -> String {
    "The music failed to load. Check the audio file path.".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// URL of the track. The file is not bundled: drop it into the app's
    /// public `assets/` directory so the dev server serves it at this path.
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_autoplay")]
    pub autoplay: bool,
    #[serde(default = "default_sample_interval_ms")]
    pub sample_interval_ms: u32,
    #[serde(default = "default_skip_seconds")]
    pub skip_seconds: f64,
    #[serde(default = "default_notification_ms")]
    pub notification_ms: u32,
    #[serde(default)]
    pub captions_enabled: bool,
    #[serde(default)]
    pub captions: Vec<String>,
    #[serde(default = "default_cues")]
    pub cues: Vec<LyricCue>,
    #[serde(default)]
    pub messages: PlayerMessages,
}

fn default_source() -> String {
    "/assets/music.mp3".to_string()
}

fn default_autoplay() -> bool {
    true
}

fn default_sample_interval_ms() -> u32 {
    1000
}

fn default_skip_seconds() -> f64 {
    10.0
}

fn default_notification_ms() -> u32 {
    3000
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            autoplay: default_autoplay(),
            sample_interval_ms: default_sample_interval_ms(),
            skip_seconds: default_skip_seconds(),
            notification_ms: default_notification_ms(),
            captions_enabled: false,
            captions: Vec::new(),
            cues: default_cues(),
            messages: PlayerMessages::default(),
        }
    }
}

impl PlayerConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Config shipped with the app.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_json(EMBEDDED_CONFIG)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_interval_ms == 0 {
            return Err(ConfigError::NonPositive("sample_interval_ms"));
        }
        if self.notification_ms == 0 {
            return Err(ConfigError::NonPositive("notification_ms"));
        }
        if !(self.skip_seconds.is_finite() && self.skip_seconds > 0.0) {
            return Err(ConfigError::NonPositive("skip_seconds"));
        }

        let mut previous = f64::NEG_INFINITY;
        for (position, cue) in self.cues.iter().enumerate() {
            if !cue.time.is_finite() || cue.time < previous {
                return Err(ConfigError::CueOrder {
                    position,
                    time: cue.time,
                });
            }
            previous = cue.time;

            if !self.captions.is_empty() && cue.index >= self.captions.len() {
                return Err(ConfigError::CueOutOfRange {
                    position,
                    line: cue.index,
                    available: self.captions.len(),
                });
            }
        }

        Ok(())
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.sample_interval_ms))
    }

    pub fn notification_lifetime(&self) -> Duration {
        Duration::from_millis(u64::from(self.notification_ms))
    }
}

//! Error types for the player.
//!
//! Playback errors never leave the controller; they decide which paused
//! display and which notification (if any) the user sees.

use thiserror::Error;

/// Why a `play()` request or the media element failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The browser refused unsolicited playback. Expected before the first
    /// user interaction.
    #[error("autoplay blocked by the browser: {0}")]
    AutoplayBlocked(String),

    /// Decode, network or source failure reported by the media element.
    #[error("media error: {0}")]
    Media(MediaErrorKind),
}

impl PlaybackError {
    /// Classify a rejected `play()` promise by its `DOMException` name.
    pub fn from_rejection(name: &str, message: &str) -> Self {
        match name {
            "NotAllowedError" => Self::AutoplayBlocked(message.to_string()),
            "NotSupportedError" => Self::Media(MediaErrorKind::SourceNotSupported),
            "AbortError" => Self::Media(MediaErrorKind::Aborted),
            _ => Self::Media(MediaErrorKind::Unknown),
        }
    }

    pub fn is_autoplay_blocked(&self) -> bool {
        matches!(self, Self::AutoplayBlocked(_))
    }
}

/// `MediaError.code` values exposed by `HTMLMediaElement`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MediaErrorKind {
    #[error("playback was aborted before the stream loaded")]
    Aborted,
    #[error("network error while loading this track")]
    Network,
    #[error("audio playback failed due to a decode error")]
    Decode,
    #[error("no supported audio source was found")]
    SourceNotSupported,
    #[error("unable to load this audio source")]
    Unknown,
}

impl MediaErrorKind {
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::Aborted,
            2 => Self::Network,
            3 => Self::Decode,
            4 => Self::SourceNotSupported,
            _ => Self::Unknown,
        }
    }
}

/// Rejected player configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid player config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0} must be greater than zero")]
    NonPositive(&'static str),

    #[error("cue {position} at {time}s is out of order or not a finite time")]
    CueOrder { position: usize, time: f64 },

    #[error("cue {position} points at caption line {line}, but only {available} lines are configured")]
    CueOutOfRange {
        position: usize,
        line: usize,
        available: usize,
    },
}

//! Melodeck: a single-track web audio player with lyric cues.

pub mod components;
pub mod config;
pub mod error;
pub mod playback;

//! The components module contains the player widget and its audio backend.

mod app;
mod audio_manager;
mod player;

pub use app::*;
pub use audio_manager::*;
pub use player::*;

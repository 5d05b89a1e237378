//! Playback core: the controller and the small value types it works with.
//! Nothing in here touches the DOM; the browser side lives in
//! `components::audio_manager`.

mod controller;
mod cues;
mod notification;
mod ports;
mod shortcuts;
mod state;
mod time;

#[cfg(test)]
mod fakes;

pub use controller::*;
pub use cues::*;
pub use notification::*;
pub use ports::*;
pub use shortcuts::*;
pub use state::*;
pub use time::*;

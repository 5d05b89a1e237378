//! Seams between the controller and the platform.

use std::time::Duration;

use super::{NotificationId, PlayerDisplay};

/// Tags one outstanding `play()` request so its completion can be matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayRequestId(pub(crate) u64);

/// The media element being controlled.
pub trait MediaResource {
    /// Start playback. The outcome must be reported later through
    /// `PlaybackController::on_play_settled` with the same `request`, never
    /// from inside this call.
    fn play(&mut self, request: PlayRequestId);
    fn pause(&mut self);
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, seconds: f64);
    /// Raw duration; NaN until metadata is available.
    fn duration(&self) -> f64;
}

/// Output sink for the widget.
pub trait PlayerView {
    fn render(&mut self, display: &PlayerDisplay);
}

/// Work a scheduler fires back into the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Sample,
    DismissNotification(NotificationId),
}

/// Timers. Dropping a returned handle cancels its timer.
pub trait Scheduler {
    type Handle;

    fn every(&mut self, period: Duration, task: Task) -> Self::Handle;
    fn after(&mut self, delay: Duration, task: Task) -> Self::Handle;
}

//! The playback controller maps user, media and page events to state
//! transitions and display updates. It is the only owner of `PlaybackState`.

use tracing::{debug, error, trace, warn};

use super::{
    active_cue_index, format_time, known_duration, Banner, MediaResource, NotificationKind,
    PlayRequestId, PlaybackState, PlayerDisplay, PlayerView, Scheduler, Shortcut, Task,
    TransportState,
};
use crate::config::PlayerConfig;
use crate::error::{MediaErrorKind, PlaybackError};

/// Who asked for playback. Decides how a rejection is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOrigin {
    Autoplay,
    User,
    FirstInteraction,
}

/// Commands the widget UI sends to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerCommand {
    TogglePlayPause,
    SeekToFraction(f64),
    SeekToOffset(f64),
    Skip(f64),
    Shutdown,
}

#[derive(Debug, Clone, Copy)]
struct PendingPlay {
    request: PlayRequestId,
    origin: PlayOrigin,
}

pub struct PlaybackController<M, V, S: Scheduler> {
    media: M,
    view: V,
    scheduler: S,
    config: PlayerConfig,
    state: PlaybackState,
    display: PlayerDisplay,
    sampling: Option<S::Handle>,
    banner: Banner<S::Handle>,
    pending: Option<PendingPlay>,
    next_request: u64,
    autoplay_blocked: bool,
    interaction_handled: bool,
}

impl<M, V, S> PlaybackController<M, V, S>
where
    M: MediaResource,
    V: PlayerView,
    S: Scheduler,
{
    pub fn new(media: M, view: V, scheduler: S, config: PlayerConfig) -> Self {
        Self {
            media,
            view,
            scheduler,
            config,
            state: PlaybackState::default(),
            display: PlayerDisplay::default(),
            sampling: None,
            banner: Banner::default(),
            pending: None,
            next_request: 0,
            autoplay_blocked: false,
            interaction_handled: false,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn display(&self) -> &PlayerDisplay {
        &self.display
    }

    pub fn is_sampling(&self) -> bool {
        self.sampling.is_some()
    }

    pub fn has_pending_play(&self) -> bool {
        self.pending.is_some()
    }

    /// Push the initial display and make the optimistic autoplay attempt.
    pub fn start(&mut self) {
        if let Some(duration) = known_duration(self.media.duration()) {
            self.state.duration_seconds = Some(duration);
            self.display.total = format_time(duration);
        }
        self.render();

        if self.config.autoplay {
            self.request_play(PlayOrigin::Autoplay);
        }
    }

    pub fn toggle_play_pause(&mut self) {
        if self.state.is_playing {
            self.pause_playback();
        } else if self.pending.is_some() {
            debug!("play request already in flight, ignoring toggle");
        } else {
            self.request_play(PlayOrigin::User);
        }
    }

    /// Completion of a `MediaResource::play` call.
    pub fn on_play_settled(&mut self, request: PlayRequestId, outcome: Result<(), PlaybackError>) {
        let pending = match self.pending {
            Some(pending) if pending.request == request => pending,
            _ => {
                debug!(?request, "dropping stale play completion");
                return;
            }
        };
        self.pending = None;

        match outcome {
            Ok(()) => {
                debug!(origin = ?pending.origin, "playback started");
                self.enter_playing();
            }
            Err(err) => {
                self.enter_paused();
                match pending.origin {
                    PlayOrigin::Autoplay if err.is_autoplay_blocked() => {
                        warn!(%err, "autoplay was blocked, waiting for user interaction");
                        self.autoplay_blocked = true;
                    }
                    PlayOrigin::Autoplay => {
                        error!(%err, "autoplay failed");
                    }
                    PlayOrigin::User => {
                        error!(%err, "playback failed");
                        if err.is_autoplay_blocked() {
                            self.autoplay_blocked = true;
                        }
                        let message = self.config.messages.play_rejected.clone();
                        self.notify(NotificationKind::Info, message);
                    }
                    PlayOrigin::FirstInteraction => {
                        error!(%err, "playback failed after first interaction");
                    }
                }
            }
        }
    }

    pub fn seek_to(&mut self, fraction: f64) {
        if fraction.is_nan() {
            return;
        }
        let Some(duration) = self.refresh_duration() else {
            debug!("seek ignored, duration not known yet");
            return;
        };
        self.seek_to_offset(fraction.clamp(0.0, 1.0) * duration);
    }

    pub fn seek_to_offset(&mut self, seconds: f64) {
        self.refresh_duration();
        let Some(target) = self.state.clamp_position(seconds) else {
            debug!(seconds, "seek ignored");
            return;
        };
        self.media.set_current_time(target);
        self.sample();
    }

    pub fn skip(&mut self, delta_seconds: f64) {
        let position = self.media.current_time();
        self.seek_to_offset(position + delta_seconds);
    }

    pub fn on_metadata_ready(&mut self) {
        let Some(duration) = self.refresh_duration() else {
            debug!("metadata loaded without a usable duration");
            return;
        };
        self.display.total = format_time(duration);
        self.render();
    }

    /// The element halts at the end on its own; only the display and the
    /// sampling timer need to follow.
    pub fn on_playback_ended(&mut self) {
        debug!("playback ended");
        self.pending = None;
        self.enter_paused();
        self.sample();
    }

    pub fn on_playback_error(&mut self, kind: MediaErrorKind) {
        error!(%kind, "audio playback error");
        self.pending = None;
        self.enter_paused();
        let message = self.config.messages.load_failed.clone();
        self.notify(NotificationKind::Error, message);
    }

    pub fn on_visibility_hidden(&mut self) {
        if self.state.is_playing {
            debug!("page hidden, pausing");
            self.pause_playback();
        } else if self.pending.take().is_some() {
            debug!("page hidden while a play request was in flight, cancelling it");
            self.media.pause();
        }
    }

    /// One-shot retry of a blocked autoplay attempt on the first click,
    /// touch or key press. An interaction that lands while the autoplay
    /// attempt is still unresolved does not use up the retry.
    pub fn handle_first_user_interaction(&mut self) {
        if self.interaction_handled {
            return;
        }
        if matches!(self.pending, Some(pending) if pending.origin == PlayOrigin::Autoplay) {
            debug!("autoplay still unresolved, keeping the interaction retry armed");
            return;
        }
        self.interaction_handled = true;

        if self.autoplay_blocked && !self.state.is_playing && self.pending.is_none() {
            debug!("first user interaction, retrying blocked autoplay");
            self.request_play(PlayOrigin::FirstInteraction);
        }
    }

    pub fn on_page_unload(&mut self) {
        if self.state.is_playing {
            self.media.pause();
        }
        self.pending = None;
        self.banner.clear();
        self.display.notification = None;
        self.enter_paused();
    }

    pub fn on_viewport_resize(&mut self) {
        trace!("viewport resized");
    }

    pub fn run_task(&mut self, task: Task) {
        match task {
            Task::Sample => {
                if self.state.is_playing {
                    self.sample();
                }
            }
            Task::DismissNotification(id) => {
                if self.banner.dismiss(id) {
                    self.display.notification = None;
                    self.render();
                }
            }
        }
    }

    pub fn dispatch(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::TogglePlayPause => self.toggle_play_pause(),
            PlayerCommand::SeekToFraction(fraction) => self.seek_to(fraction),
            PlayerCommand::SeekToOffset(seconds) => self.seek_to_offset(seconds),
            PlayerCommand::Skip(delta) => self.skip(delta),
            PlayerCommand::Shutdown => self.on_page_unload(),
        }
    }

    pub fn handle_shortcut(&mut self, shortcut: Shortcut) {
        let step = self.config.skip_seconds;
        match shortcut {
            Shortcut::TogglePlayPause => self.toggle_play_pause(),
            Shortcut::SkipForward => self.skip(step),
            Shortcut::SkipBackward => self.skip(-step),
        }
    }

    fn request_play(&mut self, origin: PlayOrigin) {
        self.next_request += 1;
        let request = PlayRequestId(self.next_request);
        self.pending = Some(PendingPlay { request, origin });
        self.media.play(request);
    }

    fn pause_playback(&mut self) {
        self.media.pause();
        self.enter_paused();
    }

    fn enter_playing(&mut self) {
        self.state.is_playing = true;
        self.autoplay_blocked = false;
        self.start_sampling();
        self.display.transport = TransportState::Playing;
        self.render();
    }

    fn enter_paused(&mut self) {
        self.state.is_playing = false;
        self.stop_sampling();
        self.display.transport = TransportState::Paused;
        self.render();
    }

    fn start_sampling(&mut self) {
        self.stop_sampling();
        let period = self.config.sample_interval();
        self.sampling = Some(self.scheduler.every(period, Task::Sample));
    }

    fn stop_sampling(&mut self) {
        self.sampling = None;
    }

    fn refresh_duration(&mut self) -> Option<f64> {
        let duration = known_duration(self.media.duration());
        self.state.duration_seconds = duration;
        duration
    }

    /// Read position and duration from the element and refresh every output.
    fn sample(&mut self) {
        let Some(duration) = self.refresh_duration() else {
            return;
        };
        let position = self
            .state
            .clamp_position(self.media.current_time())
            .unwrap_or(0.0);
        self.state.position_seconds = position;

        self.display.progress = self.state.progress_fraction().unwrap_or(0.0);
        self.display.elapsed = format_time(position);
        self.display.total = format_time(duration);
        if let Some(cue) = active_cue_index(&self.config.cues, position) {
            self.display.active_cue = cue;
        }
        self.render();
    }

    fn notify(&mut self, kind: NotificationKind, message: String) {
        let lifetime = self.config.notification_lifetime();
        let scheduler = &mut self.scheduler;
        let shown = self.banner.show(kind, message, |id| {
            scheduler.after(lifetime, Task::DismissNotification(id))
        });
        self.display.notification = Some(shown.clone());
        self.render();
    }

    fn render(&mut self) {
        self.view.render(&self.display);
    }
}

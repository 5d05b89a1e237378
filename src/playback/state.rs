use super::Notification;

/// Placeholder shown for the total time until metadata arrives.
pub const UNKNOWN_TIME_LABEL: &str = "--:--";

/// What the transport button currently represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportState {
    Playing,
    #[default]
    Paused,
}

impl TransportState {
    /// The button names the action it will perform.
    pub fn button_label(self) -> &'static str {
        match self {
            Self::Playing => "Pause",
            Self::Paused => "Play",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }
}

/// Ephemeral playback state owned by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub position_seconds: f64,
    pub duration_seconds: Option<f64>,
}

impl PlaybackState {
    /// Clamp a target time into `[0, duration]`. `None` while the duration is
    /// unknown or the target is NaN.
    pub fn clamp_position(&self, seconds: f64) -> Option<f64> {
        let duration = self.duration_seconds?;
        if seconds.is_nan() {
            return None;
        }
        Some(seconds.clamp(0.0, duration))
    }

    pub fn progress_fraction(&self) -> Option<f64> {
        let duration = self.duration_seconds?;
        Some((self.position_seconds / duration).clamp(0.0, 1.0))
    }
}

/// Media elements report NaN before metadata, 0 for empty sources and
/// +inf for live streams. Only a finite positive value is usable.
pub fn known_duration(raw: f64) -> Option<f64> {
    (raw.is_finite() && raw > 0.0).then_some(raw)
}

/// Everything the widget renders, pushed to the view as one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerDisplay {
    pub transport: TransportState,
    pub progress: f64,
    pub elapsed: String,
    pub total: String,
    pub active_cue: usize,
    pub notification: Option<Notification>,
}

impl Default for PlayerDisplay {
    fn default() -> Self {
        Self {
            transport: TransportState::Paused,
            progress: 0.0,
            elapsed: "0:00".to_string(),
            total: UNKNOWN_TIME_LABEL.to_string(),
            active_cue: 0,
            notification: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unusable_durations_are_unknown() {
        assert_eq!(known_duration(f64::NAN), None);
        assert_eq!(known_duration(0.0), None);
        assert_eq!(known_duration(f64::INFINITY), None);
        assert_eq!(known_duration(-3.0), None);
        assert_eq!(known_duration(182.5), Some(182.5));
    }

    #[test]
    fn clamp_position_requires_duration() {
        let mut state = PlaybackState::default();
        assert_eq!(state.clamp_position(4.0), None);

        state.duration_seconds = Some(30.0);
        assert_eq!(state.clamp_position(-1.0), Some(0.0));
        assert_eq!(state.clamp_position(31.0), Some(30.0));
        assert_eq!(state.clamp_position(12.5), Some(12.5));
        assert_eq!(state.clamp_position(f64::NAN), None);
    }

    #[test]
    fn transport_labels_name_the_next_action() {
        assert_eq!(TransportState::Playing.button_label(), "Pause");
        assert_eq!(TransportState::Paused.button_label(), "Play");
        assert_eq!(TransportState::default(), TransportState::Paused);
    }

    #[test]
    fn default_display_uses_placeholder_total() {
        let display = PlayerDisplay::default();
        assert_eq!(display.total, UNKNOWN_TIME_LABEL);
        assert_eq!(display.elapsed, "0:00");
        assert!(display.notification.is_none());
    }
}

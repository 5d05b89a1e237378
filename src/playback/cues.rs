use serde::{Deserialize, Serialize};

/// A caption trigger: line `index` becomes active at `time` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LyricCue {
    pub time: f64,
    pub index: usize,
}

impl LyricCue {
    pub const fn new(time: f64, index: usize) -> Self {
        Self { time, index }
    }
}

pub fn default_cues() -> Vec<LyricCue> {
    vec![
        LyricCue::new(0.0, 0),
        LyricCue::new(5.0, 1),
        LyricCue::new(10.0, 2),
        LyricCue::new(15.0, 3),
        LyricCue::new(20.0, 4),
    ]
}

/// Caption line active at `position`: the last cue whose trigger is at or
/// before it, or the first cue when playback hasn't reached any trigger.
/// `cues` must be sorted by time.
pub fn active_cue_index(cues: &[LyricCue], position: f64) -> Option<usize> {
    let first = cues.first()?;
    let reached = cues.partition_point(|cue| cue.time <= position);
    match reached {
        0 => Some(first.index),
        n => Some(cues[n - 1].index),
    }
}

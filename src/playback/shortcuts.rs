/// The parts of a `keydown` event that decide whether it is a player shortcut.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub code: String,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub composing: bool,
    pub default_prevented: bool,
    /// Focus is inside an input, textarea, select or contenteditable element.
    pub editable_target: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    TogglePlayPause,
    SkipForward,
    SkipBackward,
}

pub fn shortcut_for_key(input: &KeyInput) -> Option<Shortcut> {
    if input.default_prevented || input.composing || input.editable_target {
        return None;
    }

    let key = input.key.as_str();
    let code = input.code.as_str();

    if key == "MediaPlayPause" || code == "MediaPlayPause" {
        return Some(Shortcut::TogglePlayPause);
    }

    if input.ctrl || input.meta || input.alt {
        return None;
    }

    if code == "Space" || key == " " || key == "Spacebar" {
        return Some(Shortcut::TogglePlayPause);
    }
    if code == "ArrowRight" || key == "ArrowRight" {
        return Some(Shortcut::SkipForward);
    }
    if code == "ArrowLeft" || key == "ArrowLeft" {
        return Some(Shortcut::SkipBackward);
    }

    None
}

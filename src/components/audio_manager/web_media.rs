// Browser implementations of the controller's media and timer ports.
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::{Interval, Timeout};
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{window, HtmlAudioElement};

use crate::error::{MediaErrorKind, PlaybackError};
use crate::playback::{MediaResource, PlayRequestId, Scheduler, Task};

const AUDIO_ELEMENT_ID: &str = "melodeck-audio";

pub(super) type SettleFn = Rc<dyn Fn(PlayRequestId, Result<(), PlaybackError>)>;
pub(super) type TaskFn = Rc<dyn Fn(Task)>;

/// Initialize the page's audio element once.
pub(super) fn get_or_create_audio_element(source: &str) -> Option<HtmlAudioElement> {
    let document = window()?.document()?;

    if let Some(existing) = document.get_element_by_id(AUDIO_ELEMENT_ID) {
        return existing.dyn_into::<HtmlAudioElement>().ok();
    }

    let audio: HtmlAudioElement = document.create_element("audio").ok()?.dyn_into().ok()?;
    audio.set_id(AUDIO_ELEMENT_ID);
    audio.set_attribute("preload", "metadata").ok()?;
    audio.set_src(source);
    document.body()?.append_child(&audio).ok()?;

    Some(audio)
}

/// `MediaError.code` of the element's current error, read reflectively.
pub(super) fn media_error_kind(audio: &HtmlAudioElement) -> MediaErrorKind {
    let audio_js = JsValue::from(audio.clone());
    let code = js_sys::Reflect::get(&audio_js, &"error".into())
        .ok()
        .filter(|error| !error.is_null() && !error.is_undefined())
        .and_then(|error| js_sys::Reflect::get(&error, &"code".into()).ok())
        .and_then(|code| code.as_f64())
        .unwrap_or(0.0) as u16;
    MediaErrorKind::from_code(code)
}

fn rejection_error(err: &JsValue) -> PlaybackError {
    let field = |name: &str| {
        js_sys::Reflect::get(err, &JsValue::from_str(name))
            .ok()
            .and_then(|value| value.as_string())
            .unwrap_or_default()
    };
    PlaybackError::from_rejection(&field("name"), &field("message"))
}

pub(super) struct HtmlMedia {
    audio: HtmlAudioElement,
    settle: SettleFn,
}

impl HtmlMedia {
    pub(super) fn new(audio: HtmlAudioElement, settle: SettleFn) -> Self {
        Self { audio, settle }
    }
}

impl MediaResource for HtmlMedia {
    fn play(&mut self, request: PlayRequestId) {
        let started = self.audio.play();
        let settle = self.settle.clone();
        spawn_local(async move {
            let outcome = match started {
                Ok(promise) => JsFuture::from(promise)
                    .await
                    .map(|_| ())
                    .map_err(|err| rejection_error(&err)),
                Err(err) => Err(rejection_error(&err)),
            };
            settle(request, outcome);
        });
    }

    fn pause(&mut self) {
        if let Err(err) = self.audio.pause() {
            warn!(?err, "audio element refused to pause");
        }
    }

    fn current_time(&self) -> f64 {
        self.audio.current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.audio.set_current_time(seconds);
    }

    fn duration(&self) -> f64 {
        self.audio.duration()
    }
}

/// Keeps a gloo timer alive; dropping it clears the timer.
pub(super) struct TimerGuard {
    _interval: Option<Interval>,
    _timeout: Option<Timeout>,
}

pub(super) struct WebScheduler {
    dispatch: TaskFn,
}

impl WebScheduler {
    pub(super) fn new(dispatch: TaskFn) -> Self {
        Self { dispatch }
    }

    /// Timer callbacks hand the task to a fresh microtask so the controller may
    /// drop the very timer that fired.
    fn deferred(&self, task: Task) -> impl Fn() + 'static {
        let dispatch = self.dispatch.clone();
        move || {
            let dispatch = dispatch.clone();
            spawn_local(async move { dispatch(task) });
        }
    }
}

fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

impl Scheduler for WebScheduler {
    type Handle = TimerGuard;

    fn every(&mut self, period: Duration, task: Task) -> TimerGuard {
        TimerGuard {
            _interval: Some(Interval::new(millis(period), self.deferred(task))),
            _timeout: None,
        }
    }

    fn after(&mut self, delay: Duration, task: Task) -> TimerGuard {
        TimerGuard {
            _interval: None,
            _timeout: Some(Timeout::new(millis(delay), self.deferred(task))),
        }
    }
}

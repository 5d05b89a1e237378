// DOM listeners that feed media, input and page lifecycle events to the
// controller. Registered once per page; closures are leaked on purpose.
use tracing::{error, warn};
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{
    window, Element, Event, EventTarget, HtmlAudioElement, KeyboardEvent, MouseEvent, TouchEvent,
};

use super::web_media::media_error_kind;
use super::ControllerLink;
use crate::components::PROGRESS_TRACK_ID;
use crate::playback::{shortcut_for_key, track_fraction, KeyInput};

fn listen<E>(target: &EventTarget, event: &str, handler: impl FnMut(E) + 'static)
where
    E: FromWasmAbi + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    if let Err(err) =
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
    {
        warn!(event, ?err, "failed to register listener");
    }
    callback.forget();
}

pub(super) fn bind(link: &ControllerLink, audio: &HtmlAudioElement) {
    let Some(win) = window() else {
        return;
    };
    let Some(doc) = win.document() else {
        return;
    };

    bind_media(link, audio);

    // Autoplay recovery: the first click, touch or key press anywhere.
    for event in ["click", "touchstart", "keydown"] {
        let link = link.clone();
        listen(&doc, event, move |_: Event| {
            link.with(|controller| controller.handle_first_user_interaction())
        });
    }

    {
        let link = link.clone();
        listen(&doc, "keydown", move |event: KeyboardEvent| {
            let Some(shortcut) = shortcut_for_key(&key_input(&event)) else {
                return;
            };
            event.prevent_default();
            link.with(|controller| controller.handle_shortcut(shortcut));
        });
    }

    {
        let link = link.clone();
        let visibility_doc = doc.clone();
        listen(&doc, "visibilitychange", move |_: Event| {
            if visibility_doc.hidden() {
                link.with(|controller| controller.on_visibility_hidden());
            }
        });
    }

    {
        let link = link.clone();
        listen(&win, "beforeunload", move |_: Event| {
            link.with(|controller| controller.on_page_unload())
        });
    }

    {
        let link = link.clone();
        listen(&win, "resize", move |_: Event| {
            link.with(|controller| controller.on_viewport_resize())
        });
    }

    match doc.get_element_by_id(PROGRESS_TRACK_ID) {
        Some(track) => bind_progress_track(link, &track),
        None => error!("progress track not found, scrubbing disabled"),
    }
}

fn bind_media(link: &ControllerLink, audio: &HtmlAudioElement) {
    {
        let link = link.clone();
        listen(audio, "loadedmetadata", move |_: Event| {
            link.with(|controller| controller.on_metadata_ready())
        });
    }

    {
        let link = link.clone();
        listen(audio, "ended", move |_: Event| {
            link.with(|controller| controller.on_playback_ended())
        });
    }

    {
        let link = link.clone();
        let element = audio.clone();
        listen(audio, "error", move |_: Event| {
            let kind = media_error_kind(&element);
            link.with(|controller| controller.on_playback_error(kind));
        });
    }
}

fn bind_progress_track(link: &ControllerLink, track: &Element) {
    {
        let link = link.clone();
        let element = track.clone();
        listen(track, "click", move |event: MouseEvent| {
            let width = f64::from(element.client_width());
            if let Some(fraction) = track_fraction(f64::from(event.offset_x()), width) {
                link.with(|controller| controller.seek_to(fraction));
            }
        });
    }

    {
        let link = link.clone();
        let element = track.clone();
        listen(track, "touchstart", move |event: TouchEvent| {
            let Some(touch) = event.touches().get(0) else {
                return;
            };
            let rect = element.get_bounding_client_rect();
            let offset = f64::from(touch.client_x()) - rect.left();
            if let Some(fraction) = track_fraction(offset, rect.width()) {
                link.with(|controller| controller.seek_to(fraction));
            }
        });
    }
}

fn key_input(event: &KeyboardEvent) -> KeyInput {
    KeyInput {
        key: event.key(),
        code: event.code(),
        ctrl: event.ctrl_key(),
        meta: event.meta_key(),
        alt: event.alt_key(),
        composing: event.is_composing(),
        default_prevented: event.default_prevented(),
        editable_target: is_editable_target(event),
    }
}

fn is_editable_target(event: &KeyboardEvent) -> bool {
    let Some(target) = event.target() else {
        return false;
    };

    let mut current = target.dyn_into::<Element>().ok();
    while let Some(element) = current {
        let tag = element.tag_name().to_ascii_lowercase();
        if tag == "input" || tag == "textarea" || tag == "select" {
            return true;
        }
        if element
            .get_attribute("contenteditable")
            .map(|value| value.to_ascii_lowercase() != "false")
            .unwrap_or(false)
        {
            return true;
        }
        current = element.parent_element();
    }

    false
}

//! Audio Manager - binds the playback controller to the page's audio element.
//! Runs outside the component render cycle so re-renders never restart audio.

use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
mod page_events;
#[cfg(target_arch = "wasm32")]
mod web_media;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::{Rc, Weak};

#[cfg(target_arch = "wasm32")]
use dioxus::core::{Runtime, RuntimeGuard};
#[cfg(target_arch = "wasm32")]
use tracing::{error, warn};

#[cfg(target_arch = "wasm32")]
use crate::components::{PlayerCommands, SignalView};
#[cfg(target_arch = "wasm32")]
use crate::config::PlayerConfig;
#[cfg(target_arch = "wasm32")]
use crate::error::PlaybackError;
#[cfg(target_arch = "wasm32")]
use crate::playback::{PlayRequestId, PlaybackController, PlayerCommand, PlayerDisplay, Task};
#[cfg(target_arch = "wasm32")]
use web_media::{get_or_create_audio_element, HtmlMedia, WebScheduler};

#[cfg(target_arch = "wasm32")]
type WebController = PlaybackController<HtmlMedia, SignalView, WebScheduler>;

/// Handle used by raw DOM callbacks to reach the controller. Holds it weakly
/// and re-enters the Dioxus runtime so signal writes land.
#[cfg(target_arch = "wasm32")]
#[derive(Clone)]
struct ControllerLink {
    controller: Weak<RefCell<WebController>>,
    runtime: Rc<Runtime>,
}

#[cfg(target_arch = "wasm32")]
impl ControllerLink {
    fn with(&self, f: impl FnOnce(&mut WebController)) {
        let Some(controller) = self.controller.upgrade() else {
            return;
        };
        let _guard = RuntimeGuard::new(self.runtime.clone());
        let Ok(mut controller) = controller.try_borrow_mut() else {
            warn!("player controller busy, dropping event");
            return;
        };
        f(&mut controller);
    }
}

#[cfg(target_arch = "wasm32")]
fn mount_controller(
    display: Signal<PlayerDisplay>,
    config: PlayerConfig,
) -> Option<Rc<RefCell<WebController>>> {
    let audio = get_or_create_audio_element(&config.source)?;
    let runtime = Runtime::current();

    let controller = Rc::new_cyclic(|weak: &Weak<RefCell<WebController>>| {
        let link = ControllerLink {
            controller: weak.clone(),
            runtime: runtime.clone(),
        };
        let settle_link = link.clone();
        let media = HtmlMedia::new(
            audio.clone(),
            Rc::new(
                move |request: PlayRequestId, outcome: Result<(), PlaybackError>| {
                    settle_link.with(|controller| controller.on_play_settled(request, outcome))
                },
            ),
        );
        let scheduler = WebScheduler::new(Rc::new(move |task: Task| {
            link.with(|controller| controller.run_task(task))
        }));
        RefCell::new(PlaybackController::new(
            media,
            SignalView::new(display),
            scheduler,
            config,
        ))
    });

    let link = ControllerLink {
        controller: Rc::downgrade(&controller),
        runtime,
    };
    page_events::bind(&link, &audio);
    controller.borrow_mut().start();

    Some(controller)
}

/// Audio controller component - owns the playback controller for the page.
#[cfg(target_arch = "wasm32")]
#[component]
pub fn AudioController() -> Element {
    let display = use_context::<Signal<PlayerDisplay>>();
    let config = use_context::<PlayerConfig>();
    let commands = use_context::<PlayerCommands>();

    {
        let commands = commands.clone();
        use_effect(move || {
            let Some(controller) = mount_controller(display, config.clone()) else {
                error!("could not create the audio element, player disabled");
                return;
            };
            commands.attach(Rc::new(move |command: PlayerCommand| {
                match controller.try_borrow_mut() {
                    Ok(mut controller) => controller.dispatch(command),
                    Err(_) => warn!(?command, "player controller busy, dropping command"),
                }
            }));
        });
    }

    use_drop(move || {
        commands.send(PlayerCommand::Shutdown);
        commands.detach();
    });

    rsx! {}
}

/// Audio controller component - no media backend outside the browser.
#[cfg(not(target_arch = "wasm32"))]
#[component]
pub fn AudioController() -> Element {
    rsx! {}
}

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use tracing::debug;

use crate::config::PlayerConfig;
use crate::playback::{PlayerCommand, PlayerDisplay, PlayerView};

pub const PROGRESS_TRACK_ID: &str = "progress-track";

type CommandSink = Rc<dyn Fn(PlayerCommand)>;

/// Route from UI event handlers to whichever audio backend is mounted.
#[derive(Clone, Default)]
pub struct PlayerCommands {
    sink: Rc<RefCell<Option<CommandSink>>>,
}

impl PlayerCommands {
    pub fn attach(&self, sink: CommandSink) {
        *self.sink.borrow_mut() = Some(sink);
    }

    pub fn detach(&self) {
        self.sink.borrow_mut().take();
    }

    pub fn send(&self, command: PlayerCommand) {
        // Clone out so the sink can reattach or detach while it runs.
        let sink = self.sink.borrow().clone();
        match sink {
            Some(sink) => sink(command),
            None => debug!(?command, "no audio backend attached"),
        }
    }
}

/// Writes controller snapshots into the signal the widget renders from.
#[derive(Clone, Copy)]
pub struct SignalView {
    display: Signal<PlayerDisplay>,
}

impl SignalView {
    pub fn new(display: Signal<PlayerDisplay>) -> Self {
        Self { display }
    }
}

impl PlayerView for SignalView {
    fn render(&mut self, display: &PlayerDisplay) {
        if *self.display.peek() != *display {
            self.display.set(display.clone());
        }
    }
}

#[component]
pub fn Player() -> Element {
    let display = use_context::<Signal<PlayerDisplay>>();
    let config = use_context::<PlayerConfig>();
    let commands = use_context::<PlayerCommands>();

    let snapshot = display();
    let progress_width = format!("{:.3}%", snapshot.progress * 100.0);
    let transport_class = format!("play-pause-btn {}", snapshot.transport.css_class());
    let transport_label = snapshot.transport.button_label();
    let banner = snapshot.notification.as_ref().map(|notification| {
        (
            format!("notification {} show", notification.kind.css_class()),
            notification.message.clone(),
        )
    });

    rsx! {
        section { class: "player-card",
            if config.captions_enabled {
                Captions {
                    lines: config.captions.clone(),
                    active: snapshot.active_cue,
                }
            }
            div { id: PROGRESS_TRACK_ID, class: "progress-bar",
                div { class: "progress", style: "width: {progress_width}" }
            }
            div { class: "time-row",
                span { id: "current-time", "{snapshot.elapsed}" }
                span { id: "total-time", "{snapshot.total}" }
            }
            button {
                id: "play-pause",
                r#type: "button",
                class: "{transport_class}",
                onclick: move |_| commands.send(PlayerCommand::TogglePlayPause),
                "{transport_label}"
            }
        }
        if let Some((class, message)) = banner {
            div { class: "{class}", role: "status", "{message}" }
        }
    }
}

#[component]
fn Captions(lines: Vec<String>, active: usize) -> Element {
    rsx! {
        ol { class: "lyrics",
            for (index, line) in lines.iter().enumerate() {
                li {
                    key: "{index}",
                    class: if index == active { "lyric-item active" } else { "lyric-item" },
                    "{line}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn commands_without_backend_are_dropped() {
        let commands = PlayerCommands::default();
        commands.send(PlayerCommand::TogglePlayPause);
    }

    #[test]
    fn attached_sink_receives_commands_until_detached() {
        let commands = PlayerCommands::default();
        let received = Rc::new(Cell::new(0));
        let counter = received.clone();
        commands.attach(Rc::new(move |command: PlayerCommand| {
            assert_eq!(command, PlayerCommand::Skip(10.0));
            counter.set(counter.get() + 1);
        }));

        let clone = commands.clone();
        clone.send(PlayerCommand::Skip(10.0));
        commands.send(PlayerCommand::Skip(10.0));
        assert_eq!(received.get(), 2);

        commands.detach();
        clone.send(PlayerCommand::Skip(10.0));
        assert_eq!(received.get(), 2);
    }
}

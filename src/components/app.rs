use dioxus::prelude::*;
use tracing::warn;

use crate::components::{AudioController, Player, PlayerCommands};
use crate::config::PlayerConfig;
use crate::playback::PlayerDisplay;

const PLAYER_CSS: Asset = asset!("/assets/styling/player.css");

fn load_player_config() -> PlayerConfig {
    PlayerConfig::embedded().unwrap_or_else(|err| {
        warn!(%err, "bundled player config rejected, using defaults");
        PlayerConfig::default()
    })
}

#[component]
pub fn App() -> Element {
    let config = use_hook(load_player_config);
    let display = use_signal(PlayerDisplay::default);

    // Provide state via context
    use_context_provider(|| display);
    use_context_provider(|| config.clone());
    use_context_provider(PlayerCommands::default);

    rsx! {
        document::Meta { name: "viewport", content: "width=device-width, initial-scale=1" }
        document::Stylesheet { href: PLAYER_CSS }

        main { class: "player-page", Player {} }
        AudioController {}
    }
}

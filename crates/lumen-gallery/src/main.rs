use dioxus::prelude::*;
use lumen_ui::{LumenConfig, LumenProvider};

mod sections;

use sections::{ButtonSection, ModalSection, SelectSection, TextFieldSection, ToggleSection};

#[cfg(not(feature = "desktop"))]
const EMBEDDED_CONFIG: &str = include_str!("../lumen.toml");

fn main() {
    dioxus::launch(App);
}

/// Desktop builds read `lumen.toml` from the working directory; web builds
/// carry it in the bundle.
fn gallery_config() -> LumenConfig {
    #[cfg(feature = "desktop")]
    {
        LumenConfig::load_or_default("lumen.toml")
    }
    #[cfg(not(feature = "desktop"))]
    {
        LumenConfig::from_toml_str(EMBEDDED_CONFIG).unwrap_or_else(|err| {
            tracing::warn!(%err, "embedded gallery configuration is invalid");
            LumenConfig::default()
        })
    }
}

#[component]
fn App() -> Element {
    let config = use_hook(gallery_config);

    rsx! {
        document::Title { "Lumen gallery" }
        LumenProvider { config,
            main { class: "gallery",
                h1 { "Lumen components" }
                ButtonSection {}
                ToggleSection {}
                TextFieldSection {}
                SelectSection {}
                ModalSection {}
            }
        }
    }
}

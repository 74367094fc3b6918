use dioxus::prelude::*;
use lumen_core::LumenConfig;

use crate::components::ModalLayer;

/// Publishes a [`LumenConfig`] to every component below it and mounts the
/// modal layer.
#[component]
pub fn LumenProvider(#[props(default)] config: LumenConfig, children: Element) -> Element {
    use_context_provider(|| config);

    rsx! {
        ModalLayer { {children} }
    }
}

/// Configuration from the nearest [`LumenProvider`], or defaults.
pub fn use_lumen_config() -> LumenConfig {
    try_use_context::<LumenConfig>().unwrap_or_default()
}

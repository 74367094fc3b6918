use std::sync::atomic::{AtomicU64, Ordering};

use dioxus::prelude::*;
use lumen_core::{FocusHost, ModalId, ScrollHost};

use crate::provider::use_lumen_config;

/// Host document bridge handed to every [`Modal`](super::Modal) below a
/// [`ModalLayer`].
///
/// The body overflow style lives in a signal and is rendered by the layer as
/// a document style element. Focus is remembered and restored in the page
/// itself, keyed by modal id.
#[derive(Clone, Copy, PartialEq)]
pub struct ModalLayerHandle {
    key: u64,
    overflow: Signal<String>,
    lock_style: Signal<String>,
}

static NEXT_LAYER: AtomicU64 = AtomicU64::new(0);

impl ScrollHost for ModalLayerHandle {
    fn overflow(&self) -> String {
        self.overflow.peek().clone()
    }

    fn set_overflow(&mut self, value: &str) {
        // The layer may already be gone when the last modal unmounts with it.
        if let Ok(mut overflow) = self.overflow.try_write() {
            *overflow = value.to_string();
        }
    }

    fn lock_key(&self) -> u64 {
        self.key
    }

    fn lock_style(&self) -> String {
        self.lock_style.peek().clone()
    }
}

impl FocusHost for ModalLayerHandle {
    fn remember_focus(&mut self, id: ModalId) {
        document::eval(&format!(
            r#"
            (function() {{
                window.__lumenFocus = window.__lumenFocus || {{}};
                window.__lumenFocus['{id}'] = document.activeElement;
            }})();
            "#,
        ));
    }

    fn restore_focus(&mut self, id: ModalId) {
        document::eval(&format!(
            r#"
            (function() {{
                var saved = window.__lumenFocus || {{}};
                var el = saved['{id}'];
                delete saved['{id}'];
                if (el && el.focus && document.contains(el)) {{
                    el.focus();
                }}
            }})();
            "#,
        ));
    }
}

/// Mount point for modals. Place it once near the application root;
/// [`LumenProvider`](crate::LumenProvider) already does.
///
/// A layer mounted below another one defers to the outer layer, so every
/// modal in the tree locks and restores the same body style.
#[component]
pub fn ModalLayer(children: Element) -> Element {
    let config = use_lumen_config();
    let outer = use_modal_layer();
    let overflow = use_signal(String::new);
    let lock_style = use_signal(|| config.modal.scroll_lock.clone());
    use_hook(move || {
        if outer.is_none() {
            provide_context(ModalLayerHandle {
                key: NEXT_LAYER.fetch_add(1, Ordering::Relaxed),
                overflow,
                lock_style,
            });
        } else {
            tracing::debug!("nested ModalLayer defers to the enclosing layer");
        }
    });

    if outer.is_some() {
        return rsx! { {children} };
    }

    let body = overflow.read().clone();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        if !body.is_empty() {
            document::Style { "body {{ overflow: {body}; }}" }
        }
        {children}
    }
}

/// The nearest [`ModalLayer`], if one is mounted.
pub fn use_modal_layer() -> Option<ModalLayerHandle> {
    try_use_context::<ModalLayerHandle>()
}

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use lumen_core::{with_modal_stack, FocusTicket, ModalKey, ModalSession};

use crate::dom::{self, use_window_listener};

use super::layer::use_modal_layer;

#[derive(Props, Clone, PartialEq)]
pub struct ModalProps {
    pub open: bool,
    #[props(default)]
    pub on_close: Option<EventHandler<()>>,
    #[props(default)]
    pub on_backdrop_click: Option<EventHandler<()>>,
    #[props(default = false)]
    pub disable_escape_key_down: bool,
    /// Keep the content in the document while closed.
    #[props(default = false)]
    pub keep_mounted: bool,
    #[props(default)]
    pub aria_labelledby: Option<String>,
    #[props(default)]
    pub aria_describedby: Option<String>,
    #[props(extends = GlobalAttributes)]
    pub attributes: Vec<Attribute>,
    pub children: Element,
}

/// Dialog rendered in a fixed layer above the page.
///
/// Open modals share one stack: only the most recently opened one reacts to
/// Escape, pressed anywhere in the window, and to backdrop clicks, and the body stays scroll-locked while any
/// of them is open. Requires a [`ModalLayer`](super::ModalLayer) ancestor.
#[component]
pub fn Modal(props: ModalProps) -> Element {
    let layer = use_modal_layer();
    let session = use_hook(|| Rc::new(RefCell::new(ModalSession::new())));
    let mut content = use_signal(|| None::<Rc<MountedData>>);
    let mut ticket = use_signal(|| None::<FocusTicket>);

    use_hook(|| {
        if layer.is_none() {
            tracing::warn!("Modal rendered without a ModalLayer ancestor; it will not be shown");
        }
    });

    let open = props.open;
    let keep_mounted = props.keep_mounted;
    let on_close = props.on_close;
    let on_backdrop_click = props.on_backdrop_click;
    let escape_disabled = props.disable_escape_key_down;

    {
        let session = session.clone();
        use_effect(use_reactive!(|(open, keep_mounted)| {
            let Some(mut host) = layer else {
                return;
            };
            let mut session = session.borrow_mut();
            if open {
                let issued = with_modal_stack(|stack| session.open(stack, &mut host));
                if issued.is_some() {
                    ticket.set(issued);
                }
            } else if with_modal_stack(|stack| session.close(stack, &mut host)) {
                ticket.set(None);
                if !keep_mounted {
                    content.set(None);
                }
            }
        }));
    }

    {
        let session = session.clone();
        use_drop(move || {
            if let Some(mut host) = layer {
                let mut session = session.borrow_mut();
                with_modal_stack(|stack| session.close(stack, &mut host));
            }
        });
    }

    {
        let session = session.clone();
        use_effect(move || {
            let (Some(node), Some(pending)) = (content(), ticket()) else {
                return;
            };
            if session.borrow_mut().take_focus(pending) {
                spawn(async move {
                    let _ = node.set_focus(true).await;
                });
            }
        });
    }

    let escape_key = use_hook(|| dom::instance_key("modal"));
    let on_escape = {
        let session = session.clone();
        use_callback(move |()| {
            let close = with_modal_stack(|stack| {
                session
                    .borrow()
                    .wants_close_on_key(stack, ModalKey::Escape, escape_disabled)
            });
            if close {
                if let Some(handler) = &on_close {
                    handler.call(());
                }
            }
        })
    };
    use_window_listener(
        &escape_key,
        dom::escape_key_script,
        open && layer.is_some(),
        on_escape,
    );

    if layer.is_none() || !ModalSession::should_render(open, keep_mounted) {
        return rsx! {};
    }

    let onbackdrop = {
        let session = session.clone();
        move |_: MouseEvent| {
            let close = with_modal_stack(|stack| session.borrow().wants_close_on_backdrop(stack));
            if close {
                if let Some(handler) = &on_backdrop_click {
                    handler.call(());
                }
                if let Some(handler) = &on_close {
                    handler.call(());
                }
            }
        }
    };

    let base = vec![Attribute::new("class", "lumen-modal-content", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, props.attributes]);
    let state = if open { "open" } else { "closed" };

    rsx! {
        div {
            class: "lumen-modal-root",
            "data-state": state,
            hidden: !open,
            div { class: "lumen-modal-backdrop", "data-state": state, onclick: onbackdrop,
                div {
                    role: "dialog",
                    "aria-modal": "true",
                    "aria-labelledby": props.aria_labelledby,
                    "aria-describedby": props.aria_describedby,
                    "data-state": state,
                    tabindex: "-1",
                    onmounted: move |evt: MountedEvent| content.set(Some(evt.data())),
                    onclick: move |evt: MouseEvent| evt.stop_propagation(),
                    ..merged,
                    {props.children}
                }
            }
        }
    }
}

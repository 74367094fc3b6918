use dioxus::prelude::*;
use lumen_core::{aria_bool, Color, LabelPlacement, Size, ValueSync};

use crate::classes;
use crate::dom::{self, use_field_reconcile};
use crate::event::{commit_and_notify, ChangeEvent, UiEvent};
use crate::provider::use_lumen_config;

#[derive(Props, Clone, PartialEq)]
pub struct SwitchProps {
    #[props(default)]
    pub checked: Option<bool>,
    #[props(default)]
    pub default_checked: Option<bool>,
    #[props(default)]
    pub on_change: Option<EventHandler<ChangeEvent<bool>>>,
    #[props(default = false)]
    pub disabled: bool,
    #[props(default = false)]
    pub required: bool,
    #[props(default)]
    pub label: Option<String>,
    #[props(default)]
    pub label_placement: LabelPlacement,
    #[props(default)]
    pub color: Option<Color>,
    #[props(default)]
    pub size: Option<Size>,
    #[props(default)]
    pub name: Option<String>,
    #[props(default)]
    pub value: Option<String>,
    #[props(default)]
    pub id: Option<String>,
    /// Receives the inner `<input>` once it is mounted.
    #[props(default)]
    pub on_input_mounted: Option<EventHandler<MountedEvent>>,
    #[props(extends = GlobalAttributes)]
    pub attributes: Vec<Attribute>,
}

/// On/off toggle exposed as `role="switch"`.
#[component]
pub fn Switch(props: SwitchProps) -> Element {
    let defaults = use_lumen_config().defaults;
    let size = props.size.unwrap_or(defaults.size);
    let color = props.color.unwrap_or(defaults.color);

    let sync = use_signal(|| ValueSync::new(props.checked.as_ref(), props.default_checked));
    let mut focus_visible = use_signal(|| false);

    let field_key = use_hook(|| dom::instance_key("switch"));

    let checked = sync.read().current(props.checked.as_ref());
    let mut edited = use_field_reconcile(&field_key, "checked", sync, checked);

    let base = vec![Attribute::new(
        "class",
        classes::toggle_container("lumen-switch", props.label_placement, props.disabled),
        None,
        false,
    )];
    let merged = dioxus_primitives::merge_attributes(vec![base, props.attributes]);

    let controlled = props.checked;
    let disabled = props.disabled;
    let on_change = props.on_change;
    let on_input_mounted = props.on_input_mounted;

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        label { ..merged,
            span { class: classes::switch_track(size, color, checked, focus_visible()),
                input {
                    r#type: "checkbox",
                    role: "switch",
                    class: "lumen-switch-input",
                    id: props.id,
                    name: props.name,
                    value: props.value,
                    "data-lumen-key": "{field_key}",
                    checked,
                    disabled,
                    required: props.required,
                    "aria-checked": aria_bool(checked),
                    onfocus: move |_| focus_visible.set(true),
                    onblur: move |_| focus_visible.set(false),
                    onchange: move |evt: FormEvent| {
                        if disabled {
                            return;
                        }
                        let next = !sync.peek().current(controlled.as_ref());
                        if sync.peek().is_controlled() {
                            edited.set(Some(next));
                        }
                        commit_and_notify(sync, next, UiEvent::Form(evt), on_change);
                    },
                    onmounted: move |evt: MountedEvent| {
                        if let Some(handler) = &on_input_mounted {
                            handler.call(evt);
                        }
                    },
                }
                span { class: "lumen-switch-thumb", "aria-hidden": "true" }
            }
            if let Some(label) = props.label {
                span { class: classes::toggle_label("lumen-switch-label", size), "{label}" }
            }
        }
    }
}

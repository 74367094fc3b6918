use dioxus::prelude::*;
use lumen_core::{aria_checked, shows_indeterminate, Color, LabelPlacement, Size, ValueSync};

use crate::classes;
use crate::dom::{self, use_field_reconcile};
use crate::event::{commit_and_notify, ChangeEvent, UiEvent};
use crate::provider::use_lumen_config;

#[derive(Props, Clone, PartialEq)]
pub struct CheckboxProps {
    /// Controlled value. Supplying it on first render fixes the mode.
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
    /// Visual mixed state, shown only while unchecked.
    #[props(default = false)]
    pub indeterminate: bool,
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

#[component]
pub fn Checkbox(props: CheckboxProps) -> Element {
    let defaults = use_lumen_config().defaults;
    let size = props.size.unwrap_or(defaults.size);
    let color = props.color.unwrap_or(defaults.color);

    let sync = use_signal(|| ValueSync::new(props.checked.as_ref(), props.default_checked));
    let mut hovered = use_signal(|| false);

    let field_key = use_hook(|| dom::instance_key("checkbox"));

    let checked = sync.read().current(props.checked.as_ref());
    let mut edited = use_field_reconcile(&field_key, "checked", sync, checked);
    let mixed = shows_indeterminate(checked, props.indeterminate);

    let container = classes::toggle_container("lumen-checkbox", props.label_placement, props.disabled);
    let container = if hovered() && !props.disabled {
        format!("{container} hovered")
    } else {
        container
    };
    let base = vec![Attribute::new("class", container, None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, props.attributes]);

    let controlled = props.checked;
    let disabled = props.disabled;
    let on_change = props.on_change;
    let on_input_mounted = props.on_input_mounted;

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        label {
            onmouseenter: move |_| hovered.set(true),
            onmouseleave: move |_| hovered.set(false),
            ..merged,
            span { class: classes::checkbox_box(size, color, checked),
                input {
                    r#type: "checkbox",
                    class: "lumen-checkbox-input",
                    id: props.id,
                    name: props.name,
                    value: props.value,
                    "data-lumen-key": "{field_key}",
                    checked,
                    disabled,
                    required: props.required,
                    "aria-checked": aria_checked(checked, props.indeterminate),
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
                span { class: "lumen-checkbox-icon", "aria-hidden": "true",
                    if mixed {
                        span { class: "lumen-checkbox-indeterminate" }
                    } else if checked {
                        svg {
                            class: "lumen-checkbox-checkmark",
                            view_box: "0 0 24 24",
                            fill: "none",
                            stroke: "currentColor",
                            stroke_width: "3",
                            stroke_linecap: "round",
                            stroke_linejoin: "round",
                            path { d: "M20 6L9 17l-5-5" }
                        }
                    }
                }
            }
            if let Some(label) = props.label {
                span {
                    class: classes::toggle_label("lumen-checkbox-label", size),
                    onmousedown: move |evt: MouseEvent| evt.prevent_default(),
                    "{label}"
                }
            }
        }
    }
}

use dioxus::prelude::*;
use lumen_core::{aria_bool, ButtonVariant, Color, Size, Slot};

use crate::classes::{self, ButtonLook};
use crate::provider::use_lumen_config;

/// Native `type` of the rendered button.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ButtonType {
    #[default]
    Button,
    Submit,
    Reset,
}

impl ButtonType {
    fn as_str(&self) -> &'static str {
        match self {
            ButtonType::Button => "button",
            ButtonType::Submit => "submit",
            ButtonType::Reset => "reset",
        }
    }
}

/// What occupies an adornment slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotContent {
    Empty,
    Icon,
    Spinner,
}

/// Resolve both adornment slots. The spinner takes the configured slot and
/// hides that slot's icon; the other slot keeps its icon.
pub fn button_slots(
    loading: bool,
    position: Slot,
    has_start_icon: bool,
    has_end_icon: bool,
) -> (SlotContent, SlotContent) {
    let resolve = |slot: Slot, has_icon: bool| {
        if loading && position == slot {
            SlotContent::Spinner
        } else if has_icon {
            SlotContent::Icon
        } else {
            SlotContent::Empty
        }
    };
    (
        resolve(Slot::Start, has_start_icon),
        resolve(Slot::End, has_end_icon),
    )
}

#[derive(Props, Clone, PartialEq)]
pub struct ButtonProps {
    #[props(default)]
    pub variant: Option<ButtonVariant>,
    #[props(default)]
    pub size: Option<Size>,
    #[props(default)]
    pub color: Option<Color>,
    #[props(default = false)]
    pub disabled: bool,
    #[props(default = false)]
    pub loading: bool,
    #[props(default)]
    pub loading_position: Slot,
    #[props(default)]
    pub start_icon: Option<Element>,
    #[props(default)]
    pub end_icon: Option<Element>,
    #[props(default = false)]
    pub full_width: bool,
    #[props(default)]
    pub button_type: ButtonType,
    #[props(default)]
    pub aria_label: Option<String>,
    #[props(default)]
    pub tab_index: Option<i32>,
    #[props(default)]
    pub onclick: Option<EventHandler<MouseEvent>>,
    #[props(extends = GlobalAttributes)]
    pub attributes: Vec<Attribute>,
    pub children: Element,
}

/// A button with variant/size/color styling, a loading state and optional
/// start/end icons.
#[component]
pub fn Button(props: ButtonProps) -> Element {
    let defaults = use_lumen_config().defaults;
    let look = ButtonLook {
        variant: props.variant.unwrap_or(defaults.button_variant),
        size: props.size.unwrap_or(defaults.size),
        color: props.color.unwrap_or(defaults.color),
        disabled: props.disabled,
        loading: props.loading,
        full_width: props.full_width,
    };
    let inert = props.disabled || props.loading;
    let tab_index = if props.disabled {
        Some(-1)
    } else {
        props.tab_index
    };
    let (start, end) = button_slots(
        props.loading,
        props.loading_position,
        props.start_icon.is_some(),
        props.end_icon.is_some(),
    );

    let base = vec![Attribute::new("class", classes::button(&look), None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, props.attributes]);
    let onclick = props.onclick;

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        button {
            r#type: props.button_type.as_str(),
            disabled: inert,
            "aria-disabled": aria_bool(props.disabled),
            "aria-busy": aria_bool(props.loading),
            "aria-label": props.aria_label,
            tabindex: tab_index,
            onclick: move |evt: MouseEvent| {
                if inert {
                    evt.prevent_default();
                    evt.stop_propagation();
                    return;
                }
                if let Some(handler) = &onclick {
                    handler.call(evt);
                }
            },
            ..merged,
            {render_slot(start, Slot::Start, props.start_icon)}
            span { class: "lumen-button-content", {props.children} }
            {render_slot(end, Slot::End, props.end_icon)}
        }
    }
}

fn render_slot(content: SlotContent, slot: Slot, icon: Option<Element>) -> Element {
    let class = match slot {
        Slot::Start => "lumen-button-icon start",
        Slot::End => "lumen-button-icon end",
    };
    match (content, icon) {
        (SlotContent::Spinner, _) => rsx! { Spinner {} },
        (SlotContent::Icon, Some(icon)) => rsx! {
            span { class, "aria-hidden": "true", {icon} }
        },
        _ => rsx! {},
    }
}

#[component]
fn Spinner() -> Element {
    rsx! {
        span { class: "lumen-button-spinner", "aria-hidden": "true",
            svg { class: "lumen-button-spinner-svg", view_box: "0 0 24 24",
                circle {
                    cx: "12",
                    cy: "12",
                    r: "10",
                    fill: "none",
                    stroke: "currentColor",
                    stroke_width: "2",
                    stroke_linecap: "round",
                    stroke_dasharray: "31.416",
                    stroke_dashoffset: "31.416",
                }
            }
        }
    }
}

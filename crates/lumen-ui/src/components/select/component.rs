use std::rc::Rc;

use dioxus::prelude::*;
use lumen_core::{
    aria_bool, derived_id, Change, Color, FieldVariant, MenuWidth, NavKey, SelectBehavior,
    SelectEngine, SelectFrame, SelectKey, SelectOption, Selection, Size,
};

use crate::classes::{self, FieldLook};
use crate::dom::{self, use_window_listener};
use crate::event::{ChangeEvent, UiEvent};
use crate::provider::use_lumen_config;

/// Payload of [`Select`]'s `on_change`.
pub type SelectChange<K> = ChangeEvent<Selection<K>>;

#[derive(Props, Clone, PartialEq)]
pub struct SelectProps<K: SelectKey> {
    pub options: Vec<SelectOption<K>>,
    /// Controlled selection. Supplying it on first render fixes the mode.
    #[props(default)]
    pub value: Option<Selection<K>>,
    #[props(default)]
    pub default_value: Option<Selection<K>>,
    #[props(default)]
    pub on_change: Option<EventHandler<SelectChange<K>>>,
    #[props(default = false)]
    pub multiple: bool,
    #[props(default)]
    pub id: Option<String>,
    /// Adds a hidden form input carrying the selected keys.
    #[props(default)]
    pub name: Option<String>,
    #[props(default)]
    pub label: Option<String>,
    #[props(default)]
    pub helper_text: Option<String>,
    #[props(default)]
    pub placeholder: Option<String>,
    #[props(default = false)]
    pub disabled: bool,
    #[props(default = false)]
    pub required: bool,
    #[props(default = false)]
    pub read_only: bool,
    #[props(default = false)]
    pub auto_focus: bool,
    #[props(default = false)]
    pub full_width: bool,
    /// CSS length exposed as `--select-width`.
    #[props(default)]
    pub width: Option<String>,
    #[props(default)]
    pub size: Option<Size>,
    #[props(default)]
    pub color: Option<Color>,
    #[props(default)]
    pub variant: Option<FieldVariant>,
    #[props(default = false)]
    pub error: bool,
    /// Size the menu by its content instead of the control.
    #[props(default = false)]
    pub auto_width: bool,
    /// Show multiple selections as removable chips.
    #[props(default = false)]
    pub chip_display: bool,
    #[props(default = false)]
    pub with_checkmarks: bool,
    /// Custom display for a non-empty selection.
    #[props(default)]
    pub render_value: Option<Callback<SelectValue<K>, Element>>,
    #[props(extends = GlobalAttributes)]
    pub attributes: Vec<Attribute>,
}

/// Argument of [`Select`]'s `render_value`: the current selection together
/// with every option, so renderers can look labels up.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectValue<K> {
    pub selection: Selection<K>,
    pub options: Vec<SelectOption<K>>,
}

impl<K: SelectKey> SelectValue<K> {
    /// Selected options in selection order. Keys without an option are skipped.
    pub fn selected_options(&self) -> Vec<&SelectOption<K>> {
        self.selection
            .keys()
            .iter()
            .filter_map(|key| self.options.iter().find(|o| &o.value == key))
            .collect()
    }

    /// The default comma-joined label text.
    pub fn text(&self) -> String {
        selection_text(&self.options, &self.selection)
    }
}

/// Everything the event handlers need from the render that created them.
struct SelectSource<K> {
    options: Vec<SelectOption<K>>,
    controlled: Option<Selection<K>>,
    behavior: SelectBehavior,
}

impl<K: SelectKey> SelectSource<K> {
    fn frame(&self) -> SelectFrame<'_, K> {
        SelectFrame::new(&self.options, self.controlled.as_ref(), self.behavior)
    }
}

/// Keyboard keys the menu reacts to.
fn nav_key(key: &Key) -> Option<NavKey> {
    match key {
        Key::ArrowUp => Some(NavKey::ArrowUp),
        Key::ArrowDown => Some(NavKey::ArrowDown),
        Key::Home => Some(NavKey::Home),
        Key::End => Some(NavKey::End),
        Key::Enter => Some(NavKey::Enter),
        Key::Escape => Some(NavKey::Escape),
        Key::Character(c) if c == " " => Some(NavKey::Space),
        _ => None,
    }
}

/// Labels of the selected keys, comma-joined. Keys without a matching
/// option fall back to their display form.
fn selection_text<K: SelectKey>(options: &[SelectOption<K>], selection: &Selection<K>) -> String {
    selection
        .keys()
        .iter()
        .map(|key| {
            options
                .iter()
                .find(|o| &o.value == key)
                .map(|o| o.label.clone())
                .unwrap_or_else(|| key.to_string())
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn notify<K: SelectKey>(
    on_change: Option<EventHandler<SelectChange<K>>>,
    change: Option<Selection<K>>,
    event: UiEvent,
) {
    if let (Some(handler), Some(value)) = (on_change, change) {
        handler.call(Change::new(event, value));
    }
}

/// Dropdown selecting one or several keys from `options`.
#[component]
pub fn Select<K: SelectKey>(props: SelectProps<K>) -> Element {
    let config = use_lumen_config();
    let mut engine = use_signal(|| {
        SelectEngine::new(
            props.multiple,
            props.value.as_ref(),
            props.default_value.clone(),
        )
    });
    let mut control = use_signal(|| None::<Rc<MountedData>>);
    let root_key = use_hook(|| dom::instance_key("select"));

    use_effect(move || {
        if engine.read().menu_width() != MenuWidth::Pending {
            return;
        }
        let Some(node) = control() else {
            return;
        };
        spawn(async move {
            if let Ok(rect) = node.get_client_rect().await {
                engine.write().measure(rect.size.width);
            }
        });
    });

    let behavior = SelectBehavior {
        multiple: props.multiple,
        disabled: props.disabled,
        read_only: props.read_only,
        auto_width: props.auto_width,
    };
    let source = Rc::new(SelectSource {
        options: props.options.clone(),
        controlled: props.value.clone(),
        behavior,
    });

    let (open, focused, highlighted, menu_width) = {
        let engine = engine.read();
        (
            engine.is_open(),
            engine.is_focused(),
            engine.highlighted(),
            engine.menu_width(),
        )
    };
    let selection = engine.read().selection(&source.frame());
    let has_value = selection.has_value();

    let dismiss = use_callback(move |()| {
        engine.write().dismiss_outside();
    });
    use_window_listener(&root_key, dom::outside_pointer_script, open, dismiss);

    let defaults = config.defaults;
    let look = FieldLook {
        variant: props.variant.unwrap_or(defaults.field_variant),
        size: props.size.unwrap_or(defaults.size),
        color: props.color.unwrap_or(defaults.color),
        error: props.error,
        disabled: props.disabled,
        has_label: props.label.is_some(),
        focused,
        has_value,
    };
    let label_class = if look.shrink() {
        "lumen-field-label shrink"
    } else {
        "lumen-field-label"
    };
    let id = props.id.as_deref();
    let listbox_id = derived_id(id, "listbox");
    let label_id = props.label.as_ref().and_then(|_| derived_id(id, "label"));
    let helper_id = props
        .helper_text
        .as_ref()
        .and_then(|_| derived_id(id, "helper-text"));
    let root_style = props
        .width
        .as_ref()
        .map(|width| format!("--select-width: {width};"));

    let base = vec![Attribute::new(
        "class",
        classes::field_root("lumen-select-root", props.full_width),
        None,
        false,
    )];
    let merged = dioxus_primitives::merge_attributes(vec![base, props.attributes]);

    let state = if open { "open" } else { "closed" };
    let tab_index = if props.disabled { "-1" } else { "0" };
    let no_options = config.select.no_options_text.clone();
    let on_change = props.on_change;
    let auto_focus = props.auto_focus;
    let multiple = props.multiple;

    let onclick = {
        let source = source.clone();
        move |_: MouseEvent| engine.write().toggle_menu(&source.frame())
    };
    let onkeydown = {
        let source = source.clone();
        move |evt: KeyboardEvent| {
            let Some(key) = nav_key(&evt.key()) else {
                return;
            };
            let outcome = engine.write().key_down(&source.frame(), key);
            if outcome.prevent_default {
                evt.prevent_default();
            }
            notify(on_change, outcome.change, UiEvent::Keyboard(evt));
        }
    };
    let onmounted = move |evt: MountedEvent| async move {
        let node = evt.data();
        control.set(Some(node.clone()));
        if auto_focus {
            let _ = node.set_focus(true).await;
        }
    };

    let display = if !has_value {
        match props.placeholder.as_ref() {
            Some(placeholder) => rsx! {
                span { class: "lumen-select-placeholder", "{placeholder}" }
            },
            None => rsx! {},
        }
    } else if let Some(render) = props.render_value {
        render.call(SelectValue {
            selection: selection.clone(),
            options: source.options.clone(),
        })
    } else if multiple && props.chip_display {
        let chips: Vec<(String, K, String)> = engine
            .read()
            .selected_options(&source.frame())
            .into_iter()
            .map(|o| (o.value.to_string(), o.value.clone(), o.label.clone()))
            .collect();
        rsx! {
            span { class: "lumen-select-chips",
                for (chip_key, key, label) in chips {
                    span { key: "{chip_key}", class: "lumen-select-chip",
                        span { class: "lumen-select-chip-label", "{label}" }
                        button {
                            r#type: "button",
                            class: "lumen-select-chip-remove",
                            "aria-label": "Remove",
                            disabled: props.disabled || props.read_only,
                            onclick: {
                                let source = source.clone();
                                move |evt: MouseEvent| {
                                    evt.stop_propagation();
                                    let change = engine.write().remove(&source.frame(), &key);
                                    notify(on_change, change, UiEvent::Mouse(evt));
                                }
                            },
                            "×"
                        }
                    }
                }
            }
        }
    } else {
        let text = selection_text(&source.options, &selection);
        rsx! { span { class: "lumen-select-value", "{text}" } }
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            "data-state": state,
            "data-lumen-key": "{root_key}",
            style: root_style,
            ..merged,
            if let Some(label) = props.label.as_ref() {
                label {
                    class: label_class,
                    id: label_id.clone(),
                    r#for: props.id.clone(),
                    "{label}"
                    if props.required {
                        span { class: "lumen-field-asterisk", "aria-hidden": "true", " *" }
                    }
                }
            }
            div {
                class: classes::field("lumen-select", &look),
                id: props.id.clone(),
                role: "combobox",
                tabindex: tab_index,
                "aria-haspopup": "listbox",
                "aria-expanded": aria_bool(open),
                "aria-controls": listbox_id.clone(),
                "aria-labelledby": label_id.clone(),
                "aria-describedby": helper_id.clone(),
                "aria-invalid": aria_bool(props.error),
                "aria-disabled": aria_bool(props.disabled),
                "aria-required": aria_bool(props.required),
                "aria-readonly": aria_bool(props.read_only),
                onclick,
                onkeydown,
                onfocus: move |_| engine.write().focus(),
                onblur: move |_| engine.write().blur(),
                onmounted,
                div { class: "lumen-select-display", {display} }
                span { class: "lumen-select-arrow", "aria-hidden": "true",
                    svg {
                        view_box: "0 0 24 24",
                        width: "16",
                        height: "16",
                        fill: "none",
                        stroke: "currentColor",
                        stroke_width: "2",
                        stroke_linecap: "round",
                        stroke_linejoin: "round",
                        path { d: "M6 9l6 6 6-6" }
                    }
                }
            }
            if open {
                ul {
                    class: "lumen-select-menu",
                    id: listbox_id.clone(),
                    role: "listbox",
                    "aria-multiselectable": aria_bool(multiple),
                    style: menu_width.style(),
                    onmousedown: move |evt: MouseEvent| evt.prevent_default(),
                    if source.options.is_empty() {
                        li {
                            class: "lumen-select-option lumen-select-empty",
                            role: "option",
                            "aria-disabled": "true",
                            "{no_options}"
                        }
                    }
                    for (index, option) in source.options.iter().enumerate() {
                        SelectMenuItem {
                            key: "{option.value}",
                            label: option.label.clone(),
                            disabled: option.disabled,
                            selected: selection.contains(&option.value),
                            highlighted: highlighted == Some(index),
                            checkmark: multiple && props.with_checkmarks,
                            on_hover: move |_| engine.write().hover(index),
                            on_choose: {
                                let source = source.clone();
                                move |evt: MouseEvent| {
                                    let change = engine.write().choose(&source.frame(), index);
                                    notify(on_change, change, UiEvent::Mouse(evt));
                                }
                            },
                        }
                    }
                }
            }
            if let Some(name) = props.name.as_ref() {
                input { r#type: "hidden", name: "{name}", value: selection.form_value() }
            }
            if let Some(helper) = props.helper_text.as_ref() {
                p { class: classes::helper_text(props.error), id: helper_id.clone(), "{helper}" }
            }
        }
    }
}

#[component]
fn SelectMenuItem(
    label: String,
    disabled: bool,
    selected: bool,
    highlighted: bool,
    checkmark: bool,
    on_hover: EventHandler<MouseEvent>,
    on_choose: EventHandler<MouseEvent>,
) -> Element {
    rsx! {
        li {
            class: classes::select_option(disabled, highlighted, selected),
            role: "option",
            "aria-selected": aria_bool(selected),
            "aria-disabled": aria_bool(disabled),
            onmouseenter: move |evt| on_hover.call(evt),
            onclick: move |evt| on_choose.call(evt),
            if checkmark {
                span { class: "lumen-select-check", "aria-hidden": "true",
                    if selected {
                        svg {
                            view_box: "0 0 24 24",
                            width: "14",
                            height: "14",
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
            "{label}"
        }
    }
}

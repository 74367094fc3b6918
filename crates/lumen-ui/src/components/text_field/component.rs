use dioxus::prelude::*;
use lumen_core::{aria_bool, derived_id, Color, FieldVariant, Size, ValueSync};

use crate::classes::{self, FieldLook};
use crate::dom::{self, use_field_reconcile};
use crate::event::{commit_and_notify, ChangeEvent, UiEvent};
use crate::provider::use_lumen_config;

#[derive(Props, Clone, PartialEq)]
pub struct TextFieldProps {
    #[props(default)]
    pub value: Option<String>,
    #[props(default)]
    pub default_value: Option<String>,
    #[props(default)]
    pub on_change: Option<EventHandler<ChangeEvent<String>>>,
    #[props(default)]
    pub on_focus: Option<EventHandler<FocusEvent>>,
    #[props(default)]
    pub on_blur: Option<EventHandler<FocusEvent>>,
    #[props(default)]
    pub id: Option<String>,
    #[props(default)]
    pub name: Option<String>,
    #[props(default = "text".to_string())]
    pub input_type: String,
    #[props(default)]
    pub label: Option<String>,
    #[props(default)]
    pub placeholder: Option<String>,
    #[props(default)]
    pub helper_text: Option<String>,
    #[props(default = false)]
    pub error: bool,
    #[props(default = false)]
    pub disabled: bool,
    #[props(default = false)]
    pub required: bool,
    #[props(default = false)]
    pub read_only: bool,
    #[props(default = false)]
    pub auto_focus: bool,
    #[props(default)]
    pub auto_complete: Option<String>,
    #[props(default = false)]
    pub full_width: bool,
    #[props(default)]
    pub size: Option<Size>,
    #[props(default)]
    pub color: Option<Color>,
    #[props(default)]
    pub variant: Option<FieldVariant>,
    #[props(default)]
    pub start_adornment: Option<Element>,
    #[props(default)]
    pub end_adornment: Option<Element>,
    /// Render a `<textarea>` instead of an `<input>`.
    #[props(default = false)]
    pub multiline: bool,
    #[props(default = 3)]
    pub rows: u32,
    /// Receives the inner `<input>` or `<textarea>` once it is mounted.
    #[props(default)]
    pub on_input_mounted: Option<EventHandler<MountedEvent>>,
    #[props(extends = GlobalAttributes)]
    pub attributes: Vec<Attribute>,
}

/// Text input with a floating label, helper text and optional adornments.
#[component]
pub fn TextField(props: TextFieldProps) -> Element {
    let defaults = use_lumen_config().defaults;
    let sync = use_signal(|| ValueSync::new(props.value.as_ref(), props.default_value.clone()));
    let mut focused = use_signal(|| false);
    let field_key = use_hook(|| dom::instance_key("field"));

    let value = sync.read().current(props.value.as_ref());
    let mut edited = use_field_reconcile(&field_key, "value", sync, value.clone());
    let look = FieldLook {
        variant: props.variant.unwrap_or(defaults.field_variant),
        size: props.size.unwrap_or(defaults.size),
        color: props.color.unwrap_or(defaults.color),
        error: props.error,
        disabled: props.disabled,
        has_label: props.label.is_some(),
        focused: focused(),
        has_value: !value.is_empty(),
    };
    let label_class = if look.shrink() {
        "lumen-field-label shrink"
    } else {
        "lumen-field-label"
    };
    let helper_id = props
        .helper_text
        .as_ref()
        .and_then(|_| derived_id(props.id.as_deref(), "helper-text"));

    let base = vec![Attribute::new(
        "class",
        classes::field_root("lumen-text-field", props.full_width),
        None,
        false,
    )];
    let merged = dioxus_primitives::merge_attributes(vec![base, props.attributes]);

    let on_change = props.on_change;
    let on_focus = props.on_focus;
    let on_blur = props.on_blur;
    let auto_focus = props.auto_focus;
    let on_input_mounted = props.on_input_mounted;

    let oninput = move |evt: FormEvent| {
        let next = evt.value();
        if sync.peek().is_controlled() {
            edited.set(Some(next.clone()));
        }
        commit_and_notify(sync, next, UiEvent::Form(evt), on_change);
    };
    let onfocus = move |evt: FocusEvent| {
        focused.set(true);
        if let Some(handler) = &on_focus {
            handler.call(evt);
        }
    };
    let onblur = move |evt: FocusEvent| {
        focused.set(false);
        if let Some(handler) = &on_blur {
            handler.call(evt);
        }
    };
    let onmounted = move |evt: MountedEvent| async move {
        let node = evt.data();
        if let Some(handler) = &on_input_mounted {
            handler.call(evt);
        }
        if auto_focus {
            let _ = node.set_focus(true).await;
        }
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { ..merged,
            if let Some(label) = props.label.as_ref() {
                label {
                    class: label_class,
                    r#for: props.id.clone(),
                    "{label}"
                    if props.required {
                        span { class: "lumen-field-asterisk", "aria-hidden": "true", " *" }
                    }
                }
            }
            div { class: classes::field("lumen-field", &look),
                if let Some(adornment) = props.start_adornment {
                    span { class: "lumen-adornment start", {adornment} }
                }
                if props.multiline {
                    textarea {
                        class: "lumen-field-input",
                        id: props.id.clone(),
                        name: props.name.clone(),
                        rows: "{props.rows}",
                        "data-lumen-key": "{field_key}",
                        value: "{value}",
                        placeholder: props.placeholder.clone(),
                        disabled: props.disabled,
                        required: props.required,
                        readonly: props.read_only,
                        "aria-invalid": aria_bool(props.error),
                        "aria-describedby": helper_id.clone(),
                        oninput,
                        onfocus,
                        onblur,
                        onmounted,
                    }
                } else {
                    input {
                        class: "lumen-field-input",
                        r#type: "{props.input_type}",
                        id: props.id.clone(),
                        name: props.name.clone(),
                        "data-lumen-key": "{field_key}",
                        value: "{value}",
                        placeholder: props.placeholder.clone(),
                        autocomplete: props.auto_complete.clone(),
                        disabled: props.disabled,
                        required: props.required,
                        readonly: props.read_only,
                        "aria-invalid": aria_bool(props.error),
                        "aria-describedby": helper_id.clone(),
                        oninput,
                        onfocus,
                        onblur,
                        onmounted,
                    }
                }
                if let Some(adornment) = props.end_adornment {
                    span { class: "lumen-adornment end", {adornment} }
                }
            }
            if let Some(helper) = props.helper_text.as_ref() {
                p { class: classes::helper_text(props.error), id: helper_id.clone(), "{helper}" }
            }
        }
    }
}

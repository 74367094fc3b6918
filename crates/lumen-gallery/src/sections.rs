use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdMail, LdSave, LdSearch, LdTrash2};
use dioxus_free_icons::Icon;
use lumen_ui::*;

const TOPPINGS: &[&str] = &["Cheese", "Basil", "Olives"];

#[component]
fn Section(title: String, children: Element) -> Element {
    rsx! {
        section { class: "gallery-section",
            h2 { "{title}" }
            div { class: "gallery-row", {children} }
        }
    }
}

#[component]
pub fn ButtonSection() -> Element {
    let mut saving = use_signal(|| false);
    let mut clicks = use_signal(|| 0u32);

    rsx! {
        Section { title: "Buttons",
            Button { onclick: move |_| clicks += 1, "Clicked {clicks} times" }
            Button { variant: ButtonVariant::Outlined, color: Color::Secondary, "Outlined" }
            Button { variant: ButtonVariant::Text, color: Color::Inherit, "Text" }
            Button { disabled: true, "Disabled" }
            Button {
                loading: saving(),
                start_icon: rsx! { Icon { icon: LdSave, width: 16, height: 16 } },
                onclick: move |_| saving.set(true),
                "Save"
            }
            Button {
                color: Color::Error,
                loading: saving(),
                loading_position: Slot::End,
                end_icon: rsx! { Icon { icon: LdTrash2, width: 16, height: 16 } },
                onclick: move |_| saving.set(false),
                "Reset"
            }
            Button { full_width: true, size: Size::Large, "Full width" }
        }
    }
}

#[component]
pub fn ToggleSection() -> Element {
    let mut toppings = use_signal(|| [true, false, false]);
    let chosen = toppings();
    let all = chosen.iter().all(|on| *on);
    let some = chosen.iter().any(|on| *on);

    rsx! {
        Section { title: "Checkboxes and switches",
            div { class: "gallery-column",
                Checkbox {
                    checked: all,
                    indeterminate: some && !all,
                    label: "All toppings",
                    on_change: move |change: ChangeEvent<bool>| toppings.set([change.value; 3]),
                }
                for (index, name) in TOPPINGS.iter().enumerate() {
                    Checkbox {
                        key: "{name}",
                        checked: chosen[index],
                        label: name.to_string(),
                        on_change: move |change: ChangeEvent<bool>| toppings.write()[index] = change.value,
                    }
                }
            }
            div { class: "gallery-column",
                Switch { default_checked: true, label: "Notifications" }
                Switch { label: "Dark mode", label_placement: LabelPlacement::Start, color: Color::Secondary }
                Switch { disabled: true, label: "Locked" }
            }
        }
    }
}

#[component]
pub fn TextFieldSection() -> Element {
    let mut name = use_signal(String::new);
    let missing = name.read().trim().is_empty();
    let helper = if missing {
        "Please enter a name".to_string()
    } else {
        "Looks good".to_string()
    };

    rsx! {
        Section { title: "Text fields",
            TextField {
                id: "gallery-name",
                label: "Name",
                required: true,
                value: name(),
                error: missing,
                helper_text: helper,
                on_change: move |change: ChangeEvent<String>| name.set(change.value),
            }
            TextField {
                id: "gallery-email",
                label: "Email",
                input_type: "email",
                variant: FieldVariant::Filled,
                start_adornment: rsx! { Icon { icon: LdMail, width: 16, height: 16 } },
            }
            TextField {
                placeholder: "Search",
                variant: FieldVariant::Standard,
                end_adornment: rsx! { Icon { icon: LdSearch, width: 16, height: 16 } },
            }
            TextField {
                label: "Notes",
                multiline: true,
                rows: 4,
                full_width: true,
                default_value: "Uncontrolled and multiline",
            }
        }
    }
}

#[component]
pub fn SelectSection() -> Element {
    let mut fruits = use_signal(|| Selection::multiple(["apple"]));
    let fruit_options = vec![
        SelectOption::new("apple", "Apple"),
        SelectOption::new("banana", "Banana"),
        SelectOption::new("cherry", "Cherry"),
        SelectOption::new("durian", "Durian").disabled(),
    ];
    let sizes = vec![
        SelectOption::new(1u32, "Small"),
        SelectOption::new(2u32, "Medium"),
        SelectOption::new(3u32, "Large"),
    ];

    rsx! {
        Section { title: "Selects",
            Select {
                id: "gallery-letter",
                label: "Letter",
                placeholder: "Pick one",
                helper_text: "Uncontrolled single selection",
                name: "letter",
                options: vec![SelectOption::new("a", "Alpha"), SelectOption::new("b", "Beta")],
            }
            Select {
                id: "gallery-fruits",
                label: "Fruits",
                multiple: true,
                chip_display: true,
                width: "18rem",
                options: fruit_options,
                value: fruits(),
                on_change: move |change: SelectChange<&'static str>| fruits.set(change.value),
            }
            Select {
                label: "Sizes",
                multiple: true,
                with_checkmarks: true,
                auto_width: true,
                options: sizes,
                render_value: move |value: SelectValue<u32>| {
                    let first = value.selected_options().first().map(|o| o.label.clone());
                    let count = value.selection.keys().len();
                    match first {
                        Some(label) if count > 1 => rsx! { "{label} +{count - 1}" },
                        Some(label) => rsx! { "{label}" },
                        None => rsx! { "{count} selected" },
                    }
                },
            }
            Select { label: "Empty", options: Vec::<SelectOption<String>>::new(), placeholder: "Nothing here" }
            Select { label: "Read only", read_only: true, options: vec![SelectOption::new(7, "Seven")], default_value: Selection::single(7) }
        }
    }
}

#[component]
pub fn ModalSection() -> Element {
    let mut outer = use_signal(|| false);
    let mut inner = use_signal(|| false);
    let mut backdrop_clicks = use_signal(|| 0u32);

    rsx! {
        Section { title: "Modals",
            Button { onclick: move |_| outer.set(true), "Open dialog" }
            span { "Backdrop dismissals: {backdrop_clicks}" }
            Modal {
                open: outer(),
                on_close: move |_| outer.set(false),
                on_backdrop_click: move |_| backdrop_clicks += 1,
                aria_labelledby: "outer-title",
                h2 { id: "outer-title", "Outer dialog" }
                p { "Escape closes the topmost dialog only." }
                Button { onclick: move |_| inner.set(true), "Open nested dialog" }
                Modal {
                    open: inner(),
                    on_close: move |_| inner.set(false),
                    aria_labelledby: "inner-title",
                    h2 { id: "inner-title", "Nested dialog" }
                    Button { variant: ButtonVariant::Outlined, onclick: move |_| inner.set(false), "Close" }
                }
            }
        }
    }
}

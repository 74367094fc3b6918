//! Class-name composition for every component.
//!
//! Order is always base, variant, size, color, state flags. The caller's
//! own `class` attribute is merged after these by `merge_attributes`.

use lumen_core::{ButtonVariant, ClassList, Color, FieldVariant, LabelPlacement, Size};

/// Flags shared by Button renders.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ButtonLook {
    pub variant: ButtonVariant,
    pub size: Size,
    pub color: Color,
    pub disabled: bool,
    pub loading: bool,
    pub full_width: bool,
}

pub fn button(look: &ButtonLook) -> String {
    ClassList::new("lumen-button")
        .with(look.variant.class())
        .with(look.size.class())
        .with(look.color.class())
        .flag("disabled", look.disabled)
        .flag("loading", look.loading)
        .flag("full-width", look.full_width)
        .build()
}

/// Flags shared by TextField and Select controls.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldLook {
    pub variant: FieldVariant,
    pub size: Size,
    pub color: Color,
    pub error: bool,
    pub disabled: bool,
    pub has_label: bool,
    pub focused: bool,
    pub has_value: bool,
}

impl FieldLook {
    /// Floating labels move out of the way when focused or filled.
    pub fn shrink(&self) -> bool {
        self.has_label && (self.focused || self.has_value)
    }
}

pub fn field(base: &str, look: &FieldLook) -> String {
    ClassList::new(base)
        .with(look.variant.class())
        .with(look.size.class())
        .maybe(look.color.field_class())
        .flag("error", look.error)
        .flag("disabled", look.disabled)
        .with(if look.has_label { "with-label" } else { "no-label" })
        .flag("shrink", look.shrink())
        .flag("focused", look.focused)
        .build()
}

pub fn field_root(base: &str, full_width: bool) -> String {
    ClassList::new(base).flag("full-width", full_width).build()
}

pub fn helper_text(error: bool) -> String {
    ClassList::new("lumen-helper-text")
        .flag("error-text", error)
        .build()
}

/// Outer label wrapping a checkbox or switch.
pub fn toggle_container(base: &str, placement: LabelPlacement, disabled: bool) -> String {
    ClassList::new(base)
        .flag("start", placement == LabelPlacement::Start)
        .flag("disabled", disabled)
        .build()
}

pub fn checkbox_box(size: Size, color: Color, checked: bool) -> String {
    ClassList::new("lumen-checkbox-box")
        .with(size.class())
        .maybe(color.field_class())
        .flag("checked", checked)
        .build()
}

pub fn switch_track(size: Size, color: Color, checked: bool, focus_visible: bool) -> String {
    ClassList::new("lumen-switch-track")
        .with(size.class())
        .maybe(color.field_class())
        .flag("checked", checked)
        .flag("focus-visible", focus_visible)
        .build()
}

pub fn toggle_label(base: &str, size: Size) -> String {
    ClassList::new(base).with(size.class()).build()
}

pub fn select_option(disabled: bool, highlighted: bool, selected: bool) -> String {
    ClassList::new("lumen-select-option")
        .flag("disabled", disabled)
        .flag("highlighted", highlighted)
        .flag("selected", selected)
        .build()
}

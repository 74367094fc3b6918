use serde::{Deserialize, Serialize};
use std::fmt;

/// Size scale shared by every component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Small,
    #[default]
    Medium,
    Large,
}

impl Size {
    pub fn class(&self) -> &'static str {
        match self {
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Large => "large",
        }
    }
}

/// Palette color. `Inherit` is only meaningful on buttons; other
/// components treat it as "no color class".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Inherit,
    #[default]
    Primary,
    Secondary,
    Success,
    Info,
    Warning,
    Error,
}

impl Color {
    pub fn class(&self) -> &'static str {
        match self {
            Color::Inherit => "inherit",
            Color::Primary => "primary",
            Color::Secondary => "secondary",
            Color::Success => "success",
            Color::Info => "info",
            Color::Warning => "warning",
            Color::Error => "error",
        }
    }

    /// Class used by field-like components, which carry colors as
    /// `color-*` modifiers.
    pub fn field_class(&self) -> Option<&'static str> {
        match self {
            Color::Inherit => None,
            Color::Primary => Some("color-primary"),
            Color::Secondary => Some("color-secondary"),
            Color::Success => Some("color-success"),
            Color::Info => Some("color-info"),
            Color::Warning => Some("color-warning"),
            Color::Error => Some("color-error"),
        }
    }
}

/// Visual variant for buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    Text,
    Outlined,
    #[default]
    Contained,
}

impl ButtonVariant {
    pub fn class(&self) -> &'static str {
        match self {
            ButtonVariant::Text => "text",
            ButtonVariant::Outlined => "outlined",
            ButtonVariant::Contained => "contained",
        }
    }
}

/// Visual variant for text fields and selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldVariant {
    #[default]
    Outlined,
    Filled,
    Standard,
}

impl FieldVariant {
    pub fn class(&self) -> &'static str {
        match self {
            FieldVariant::Outlined => "outlined",
            FieldVariant::Filled => "filled",
            FieldVariant::Standard => "standard",
        }
    }
}

/// Which side of a checkbox or switch the label sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelPlacement {
    Start,
    #[default]
    End,
}

/// Adornment slot of a button or field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Slot {
    #[default]
    Start,
    End,
}

/// Builds a space separated class attribute in insertion order.
///
/// Components push in the fixed order base, variant, size, color, state
/// flags, caller extra.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassList {
    parts: Vec<String>,
}

impl ClassList {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            parts: vec![base.into()],
        }
    }

    pub fn with(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !class.is_empty() {
            self.parts.push(class);
        }
        self
    }

    pub fn maybe(self, class: Option<impl Into<String>>) -> Self {
        match class {
            Some(class) => self.with(class),
            None => self,
        }
    }

    pub fn flag(self, class: &str, on: bool) -> Self {
        if on {
            self.with(class)
        } else {
            self
        }
    }

    pub fn contains(&self, class: &str) -> bool {
        self.parts.iter().any(|p| p == class)
    }

    pub fn build(&self) -> String {
        self.parts.join(" ")
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}

/// ARIA boolean attribute value.
pub fn aria_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// `{id}-{suffix}` when an id is present, used for helper text and listbox ids.
pub fn derived_id(id: Option<&str>, suffix: &str) -> Option<String> {
    id.filter(|id| !id.is_empty())
        .map(|id| format!("{id}-{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn class_list_keeps_insertion_order() {
        let classes = ClassList::new("lumen-button")
            .with(ButtonVariant::Outlined.class())
            .with(Size::Large.class())
            .with(Color::Warning.class())
            .flag("disabled", true)
            .flag("loading", false)
            .with("mine");
        assert_eq!(classes.build(), "lumen-button outlined large warning disabled mine");
    }

    #[test]
    fn class_list_skips_empty_and_none() {
        let classes = ClassList::new("base").with("").maybe(None::<String>);
        assert_eq!(classes.to_string(), "base");
        assert!(classes.contains("base"));
        assert!(!classes.contains(""));
    }

    #[test]
    fn defaults_match_library_defaults() {
        assert_eq!(Size::default(), Size::Medium);
        assert_eq!(Color::default(), Color::Primary);
        assert_eq!(ButtonVariant::default(), ButtonVariant::Contained);
        assert_eq!(FieldVariant::default(), FieldVariant::Outlined);
        assert_eq!(LabelPlacement::default(), LabelPlacement::End);
        assert_eq!(Slot::default(), Slot::Start);
    }

    #[test]
    fn inherit_has_no_field_class() {
        assert_eq!(Color::Inherit.field_class(), None);
        assert_eq!(Color::Error.field_class(), Some("color-error"));
    }

    #[test]
    fn derived_id_requires_non_empty_id() {
        assert_eq!(derived_id(Some("pet"), "listbox").as_deref(), Some("pet-listbox"));
        assert_eq!(derived_id(Some(""), "listbox"), None);
        assert_eq!(derived_id(None, "helper-text"), None);
    }
}

//! Select interaction engine.
//!
//! [`SelectEngine`] owns the transient menu state (open flag, highlight,
//! focus, menu width) and the uncontrolled selection. Everything the host
//! supplies on each render (options, controlled value, flags) is passed in
//! through a [`SelectFrame`] so the engine never holds stale props.

use std::fmt;

use crate::value::ValueSync;

/// Keys usable as option values.
pub trait SelectKey: Clone + PartialEq + fmt::Display + 'static {}

impl<T: Clone + PartialEq + fmt::Display + 'static> SelectKey for T {}

/// One entry in the menu.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption<K> {
    pub value: K,
    pub label: String,
    pub disabled: bool,
}

impl<K> SelectOption<K> {
    pub fn new(value: K, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
            disabled: false,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// The selected value(s).
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<K> {
    Single(Option<K>),
    Multiple(Vec<K>),
}

impl<K> Default for Selection<K> {
    fn default() -> Self {
        Selection::Single(None)
    }
}

impl<K: SelectKey> Selection<K> {
    pub fn empty(multiple: bool) -> Self {
        if multiple {
            Selection::Multiple(Vec::new())
        } else {
            Selection::Single(None)
        }
    }

    pub fn single(key: K) -> Self {
        Selection::Single(Some(key))
    }

    pub fn multiple(keys: impl IntoIterator<Item = K>) -> Self {
        Selection::Multiple(keys.into_iter().collect())
    }

    pub fn keys(&self) -> &[K] {
        match self {
            Selection::Single(Some(key)) => std::slice::from_ref(key),
            Selection::Single(None) => &[],
            Selection::Multiple(keys) => keys,
        }
    }

    pub fn first(&self) -> Option<&K> {
        self.keys().first()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.keys().contains(key)
    }

    /// A single key counts only when its display form is non-empty.
    pub fn has_value(&self) -> bool {
        match self {
            Selection::Single(Some(key)) => !key.to_string().is_empty(),
            Selection::Single(None) => false,
            Selection::Multiple(keys) => !keys.is_empty(),
        }
    }

    /// Multiple-mode toggle: remove `key` if present, append it otherwise.
    pub fn toggled(&self, key: &K) -> Self {
        let keys = self.keys();
        if keys.contains(key) {
            Selection::Multiple(keys.iter().filter(|k| *k != key).cloned().collect())
        } else {
            let mut next = keys.to_vec();
            next.push(key.clone());
            Selection::Multiple(next)
        }
    }

    /// Value submitted through the hidden form input.
    pub fn form_value(&self) -> String {
        if !self.has_value() {
            return String::new();
        }
        self.keys()
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Per-render flags that gate interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectBehavior {
    pub multiple: bool,
    pub disabled: bool,
    pub read_only: bool,
    pub auto_width: bool,
}

impl SelectBehavior {
    fn inert(&self) -> bool {
        self.disabled || self.read_only
    }
}

/// What the host supplied for the current render.
#[derive(Debug, Clone, Copy)]
pub struct SelectFrame<'a, K> {
    pub options: &'a [SelectOption<K>],
    pub controlled: Option<&'a Selection<K>>,
    pub behavior: SelectBehavior,
}

impl<'a, K: SelectKey> SelectFrame<'a, K> {
    pub fn new(
        options: &'a [SelectOption<K>],
        controlled: Option<&'a Selection<K>>,
        behavior: SelectBehavior,
    ) -> Self {
        Self {
            options,
            controlled,
            behavior,
        }
    }

    fn last_index(&self) -> Option<usize> {
        self.options.len().checked_sub(1)
    }
}

/// Keyboard input the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Enter,
    Space,
    Escape,
}

/// Menu width, decided once per open transition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MenuWidth {
    /// Sized by its content (`auto_width`).
    #[default]
    Natural,
    /// Waiting for the control to be measured.
    Pending,
    /// Matched to the control's rendered width in pixels.
    Fixed(f64),
}

impl MenuWidth {
    pub fn style(&self) -> Option<String> {
        match self {
            MenuWidth::Natural => Some("min-width: auto; width: auto;".to_string()),
            MenuWidth::Pending => None,
            MenuWidth::Fixed(px) => Some(format!("min-width: {px}px;")),
        }
    }
}

/// Result of a key press.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyOutcome<K> {
    /// The host should suppress the browser default for this key.
    pub prevent_default: bool,
    /// A committed selection the host must report to its change callback.
    pub change: Option<Selection<K>>,
}

impl<K> KeyOutcome<K> {
    fn ignored() -> Self {
        Self {
            prevent_default: false,
            change: None,
        }
    }

    fn handled() -> Self {
        Self {
            prevent_default: true,
            change: None,
        }
    }
}

/// Interaction state machine for one Select instance.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectEngine<K> {
    open: bool,
    focused: bool,
    highlighted: Option<usize>,
    menu_width: MenuWidth,
    value: ValueSync<Selection<K>>,
}

impl<K: SelectKey> SelectEngine<K> {
    pub fn new(
        multiple: bool,
        controlled: Option<&Selection<K>>,
        default: Option<Selection<K>>,
    ) -> Self {
        let default = default.or_else(|| Some(Selection::empty(multiple)));
        Self {
            open: false,
            focused: false,
            highlighted: None,
            menu_width: MenuWidth::Natural,
            value: ValueSync::new(controlled, default),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn menu_width(&self) -> MenuWidth {
        self.menu_width
    }

    pub fn is_controlled(&self) -> bool {
        self.value.is_controlled()
    }

    /// The selection to display this render.
    pub fn selection(&self, frame: &SelectFrame<'_, K>) -> Selection<K> {
        self.value.current(frame.controlled)
    }

    pub fn has_value(&self, frame: &SelectFrame<'_, K>) -> bool {
        self.selection(frame).has_value()
    }

    /// Selected options in menu order.
    pub fn selected_options<'a>(&self, frame: &SelectFrame<'a, K>) -> Vec<&'a SelectOption<K>> {
        let selection = self.selection(frame);
        frame
            .options
            .iter()
            .filter(|o| selection.contains(&o.value))
            .collect()
    }

    /// Open the menu. Returns false when the control is disabled or read-only.
    pub fn open(&mut self, frame: &SelectFrame<'_, K>) -> bool {
        if frame.behavior.inert() {
            return false;
        }
        let selection = self.selection(frame);
        self.open = true;
        self.focused = true;
        self.highlighted = if frame.options.is_empty() {
            None
        } else {
            let index = selection
                .first()
                .and_then(|key| frame.options.iter().position(|o| &o.value == key))
                .unwrap_or(0);
            Some(index)
        };
        self.menu_width = if frame.behavior.auto_width {
            MenuWidth::Natural
        } else {
            MenuWidth::Pending
        };
        tracing::debug!(highlighted = ?self.highlighted, "select menu opened");
        true
    }

    /// Close the menu. Returns whether it was open.
    pub fn close(&mut self) -> bool {
        let was_open = std::mem::replace(&mut self.open, false);
        if was_open {
            tracing::debug!("select menu closed");
        }
        was_open
    }

    /// Click on the control.
    pub fn toggle_menu(&mut self, frame: &SelectFrame<'_, K>) {
        if self.open {
            self.close();
        } else {
            self.open(frame);
        }
    }

    /// Pointer-down outside the component root.
    pub fn dismiss_outside(&mut self) -> bool {
        self.close()
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Blur keeps the focused look while the menu is open.
    pub fn blur(&mut self) {
        if !self.open {
            self.focused = false;
        }
    }

    /// Pointer hover over an option.
    pub fn hover(&mut self, index: usize) {
        self.highlighted = Some(index);
    }

    /// Record the control width measured after opening. Only the first
    /// measurement of an open transition is applied.
    pub fn measure(&mut self, width: f64) -> bool {
        if self.open && self.menu_width == MenuWidth::Pending && width > 0.0 {
            self.menu_width = MenuWidth::Fixed(width);
            true
        } else {
            false
        }
    }

    /// Click on the option at `index`. Returns the committed selection.
    pub fn choose(&mut self, frame: &SelectFrame<'_, K>, index: usize) -> Option<Selection<K>> {
        let option = frame.options.get(index)?;
        if option.disabled {
            return None;
        }
        let current = self.selection(frame);
        let next = if frame.behavior.multiple {
            current.toggled(&option.value)
        } else {
            Selection::single(option.value.clone())
        };
        let mut committed = None;
        self.value.commit(next, |value| committed = Some(value));
        if !frame.behavior.multiple {
            self.close();
        }
        tracing::debug!(option = %option.value, multiple = frame.behavior.multiple, "select committed");
        committed
    }

    /// Chip remove button: toggle `key` off without touching the menu.
    pub fn remove(&mut self, frame: &SelectFrame<'_, K>, key: &K) -> Option<Selection<K>> {
        let current = self.selection(frame);
        if !current.contains(key) {
            return None;
        }
        let mut committed = None;
        self.value
            .commit(current.toggled(key), |value| committed = Some(value));
        committed
    }

    pub fn key_down(&mut self, frame: &SelectFrame<'_, K>, key: NavKey) -> KeyOutcome<K> {
        if frame.behavior.inert() {
            return KeyOutcome::ignored();
        }
        match key {
            NavKey::ArrowDown | NavKey::ArrowUp => {
                if !self.open {
                    self.open(frame);
                    return KeyOutcome::handled();
                }
                self.highlighted = frame.last_index().map(|last| match self.highlighted {
                    None => 0,
                    Some(index) if key == NavKey::ArrowDown => (index + 1).min(last),
                    Some(index) => index.saturating_sub(1).min(last),
                });
                KeyOutcome::handled()
            }
            NavKey::Home | NavKey::End => {
                if !self.open {
                    return KeyOutcome::ignored();
                }
                self.highlighted = frame.last_index().map(|last| {
                    if key == NavKey::Home {
                        0
                    } else {
                        last
                    }
                });
                KeyOutcome::handled()
            }
            NavKey::Enter | NavKey::Space => {
                if !self.open {
                    self.open(frame);
                    return KeyOutcome::handled();
                }
                let change = match self.highlighted {
                    Some(index) => self.choose(frame, index),
                    None => None,
                };
                KeyOutcome {
                    prevent_default: true,
                    change,
                }
            }
            NavKey::Escape => {
                if self.close() {
                    KeyOutcome::handled()
                } else {
                    KeyOutcome::ignored()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn greek() -> Vec<SelectOption<&'static str>> {
        vec![
            SelectOption::new("a", "Alpha"),
            SelectOption::new("b", "Beta"),
            SelectOption::new("g", "Gamma").disabled(),
            SelectOption::new("d", "Delta"),
        ]
    }

    fn single() -> SelectBehavior {
        SelectBehavior::default()
    }

    fn multiple() -> SelectBehavior {
        SelectBehavior {
            multiple: true,
            ..SelectBehavior::default()
        }
    }

    #[test]
    fn uncontrolled_click_selects_and_closes() {
        let options = vec![SelectOption::new("a", "Alpha"), SelectOption::new("b", "Beta")];
        let frame = SelectFrame::new(&options, None, single());
        let mut engine = SelectEngine::new(false, None, None);

        engine.toggle_menu(&frame);
        assert!(engine.is_open());

        let mut changes = Vec::new();
        if let Some(change) = engine.choose(&frame, 1) {
            changes.push(change);
        }
        assert_eq!(changes, vec![Selection::single("b")]);
        assert!(!engine.is_open());
        let labels: Vec<_> = engine
            .selected_options(&frame)
            .iter()
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Beta"]);
    }

    #[test]
    fn open_highlights_first_selected_option() {
        let options = greek();
        let selected = Selection::single("d");
        let frame = SelectFrame::new(&options, Some(&selected), single());
        let mut engine = SelectEngine::new(false, Some(&selected), None);
        assert!(engine.open(&frame));
        assert_eq!(engine.highlighted(), Some(3));
    }

    #[test]
    fn open_without_selection_highlights_first_index() {
        let options = greek();
        let frame = SelectFrame::new(&options, None, single());
        let mut engine = SelectEngine::new(false, None, None);
        engine.open(&frame);
        assert_eq!(engine.highlighted(), Some(0));

        let empty: Vec<SelectOption<&str>> = Vec::new();
        let frame = SelectFrame::new(&empty, None, single());
        let mut engine = SelectEngine::new(false, None, None);
        engine.open(&frame);
        assert!(engine.is_open());
        assert_eq!(engine.highlighted(), None);
    }

    #[test]
    fn unknown_selected_key_highlights_zero() {
        let options = greek();
        let stale = Selection::single("zeta");
        let frame = SelectFrame::new(&options, Some(&stale), single());
        let mut engine = SelectEngine::new(false, Some(&stale), None);
        engine.open(&frame);
        assert_eq!(engine.highlighted(), Some(0));
    }

    #[test]
    fn arrows_clamp_without_wraparound() {
        let options = greek();
        let frame = SelectFrame::new(&options, None, single());
        let mut engine = SelectEngine::new(false, None, None);

        // First arrow only opens.
        let outcome = engine.key_down(&frame, NavKey::ArrowDown);
        assert!(outcome.prevent_default);
        assert!(engine.is_open());
        assert_eq!(engine.highlighted(), Some(0));

        engine.key_down(&frame, NavKey::ArrowUp);
        assert_eq!(engine.highlighted(), Some(0));

        for _ in 0..10 {
            engine.key_down(&frame, NavKey::ArrowDown);
        }
        assert_eq!(engine.highlighted(), Some(3));

        engine.key_down(&frame, NavKey::Home);
        assert_eq!(engine.highlighted(), Some(0));
        engine.key_down(&frame, NavKey::End);
        assert_eq!(engine.highlighted(), Some(3));
    }

    #[test]
    fn enter_commits_highlighted_option() {
        let options = greek();
        let frame = SelectFrame::new(&options, None, single());
        let mut engine = SelectEngine::new(false, None, None);

        engine.key_down(&frame, NavKey::Enter);
        assert!(engine.is_open());
        engine.key_down(&frame, NavKey::ArrowDown);
        let outcome = engine.key_down(&frame, NavKey::Space);
        assert_eq!(outcome.change, Some(Selection::single("b")));
        assert!(!engine.is_open());
        assert_eq!(engine.selection(&frame), Selection::single("b"));
    }

    #[test]
    fn disabled_option_is_a_noop() {
        let options = greek();
        let frame = SelectFrame::new(&options, None, single());
        let mut engine = SelectEngine::new(false, None, None);
        engine.open(&frame);

        assert_eq!(engine.choose(&frame, 2), None);
        assert!(engine.is_open());

        engine.hover(2);
        let outcome = engine.key_down(&frame, NavKey::Enter);
        assert!(outcome.prevent_default);
        assert_eq!(outcome.change, None);
        assert!(!engine.has_value(&frame));
    }

    #[test]
    fn disabled_or_read_only_control_ignores_interaction() {
        let options = greek();
        for behavior in [
            SelectBehavior {
                disabled: true,
                ..single()
            },
            SelectBehavior {
                read_only: true,
                ..single()
            },
        ] {
            let frame = SelectFrame::new(&options, None, behavior);
            let mut engine = SelectEngine::new(false, None, None);
            assert!(!engine.open(&frame));
            engine.toggle_menu(&frame);
            let outcome = engine.key_down(&frame, NavKey::ArrowDown);
            assert!(!outcome.prevent_default);
            assert!(!engine.is_open());
        }
    }

    #[test]
    fn escape_closes_only_when_open() {
        let options = greek();
        let frame = SelectFrame::new(&options, None, single());
        let mut engine = SelectEngine::new(false, None, None);
        assert!(!engine.key_down(&frame, NavKey::Escape).prevent_default);
        engine.open(&frame);
        assert!(engine.key_down(&frame, NavKey::Escape).prevent_default);
        assert!(!engine.is_open());
    }

    #[test]
    fn multiple_toggle_round_trip_restores_selection() {
        let options = greek();
        let frame = SelectFrame::new(&options, None, multiple());
        let initial = Selection::multiple(["d"]);
        let mut engine = SelectEngine::new(true, None, Some(initial.clone()));
        engine.open(&frame);

        let first = engine.choose(&frame, 0);
        assert_eq!(first, Some(Selection::multiple(["d", "a"])));
        assert!(engine.is_open());

        let second = engine.choose(&frame, 0);
        assert_eq!(second, Some(initial.clone()));
        assert_eq!(engine.selection(&frame), initial);
        assert!(engine.is_open());
    }

    #[test]
    fn controlled_selection_ignores_interaction() {
        let options = greek();
        let prop = Selection::single("a");
        let frame = SelectFrame::new(&options, Some(&prop), single());
        let mut engine = SelectEngine::new(false, Some(&prop), None);
        assert!(engine.is_controlled());

        engine.open(&frame);
        let change = engine.choose(&frame, 1);
        assert_eq!(change, Some(Selection::single("b")));
        // Display follows the prop until the host supplies a new one.
        assert_eq!(engine.selection(&frame), Selection::single("a"));

        let next_prop = Selection::single("b");
        let frame = SelectFrame::new(&options, Some(&next_prop), single());
        assert_eq!(engine.selection(&frame), Selection::single("b"));
    }

    #[test]
    fn chip_remove_keeps_menu_closed() {
        let options = greek();
        let frame = SelectFrame::new(&options, None, multiple());
        let mut engine = SelectEngine::new(true, None, Some(Selection::multiple(["a", "b"])));
        let change = engine.remove(&frame, &"a");
        assert_eq!(change, Some(Selection::multiple(["b"])));
        assert!(!engine.is_open());
        assert_eq!(engine.remove(&frame, &"zeta"), None);
    }

    #[test]
    fn has_value_rules() {
        assert!(!Selection::<String>::Single(None).has_value());
        assert!(!Selection::single(String::new()).has_value());
        assert!(Selection::single(0u32).has_value());
        assert!(!Selection::<u32>::multiple([]).has_value());
        assert!(Selection::multiple([1u32]).has_value());
    }

    #[test]
    fn form_value_joins_keys() {
        assert_eq!(Selection::multiple([1u32, 3]).form_value(), "1,3");
        assert_eq!(Selection::single("b").form_value(), "b");
        assert_eq!(Selection::<&str>::Single(None).form_value(), "");
    }

    #[test]
    fn menu_width_is_measured_once_per_open() {
        let options = greek();
        let frame = SelectFrame::new(&options, None, single());
        let mut engine = SelectEngine::new(false, None, None);
        engine.open(&frame);
        assert_eq!(engine.menu_width(), MenuWidth::Pending);
        assert!(engine.measure(180.0));
        assert!(!engine.measure(90.0));
        assert_eq!(engine.menu_width(), MenuWidth::Fixed(180.0));
        assert_eq!(engine.menu_width().style().as_deref(), Some("min-width: 180px;"));

        let auto = SelectBehavior {
            auto_width: true,
            ..single()
        };
        let frame = SelectFrame::new(&options, None, auto);
        engine.close();
        engine.open(&frame);
        assert_eq!(engine.menu_width(), MenuWidth::Natural);
        assert!(!engine.measure(180.0));
    }

    #[test]
    fn blur_keeps_focus_while_open() {
        let options = greek();
        let frame = SelectFrame::new(&options, None, single());
        let mut engine = SelectEngine::new(false, None, None);
        engine.open(&frame);
        engine.blur();
        assert!(engine.is_focused());
        engine.dismiss_outside();
        engine.blur();
        assert!(!engine.is_focused());
    }
}

use std::cell::Cell;

/// Ownership mode of a component value, fixed when the component is built.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode<V> {
    /// The caller supplies the value on every render.
    Controlled,
    /// The component keeps the value itself.
    Uncontrolled(V),
}

/// Controlled-vs-uncontrolled value management shared by Checkbox, Switch,
/// TextField and Select.
///
/// The mode is decided once by [`ValueSync::new`]. Supplying a controlled
/// value later, or dropping it, is a caller contract violation: it is
/// reported once through `tracing` and otherwise ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSync<V> {
    mode: Mode<V>,
    switch_reported: Cell<bool>,
}

impl<V: Clone + Default> ValueSync<V> {
    pub fn new(controlled: Option<&V>, default: Option<V>) -> Self {
        let mode = match controlled {
            Some(_) => Mode::Controlled,
            None => Mode::Uncontrolled(default.unwrap_or_default()),
        };
        Self {
            mode,
            switch_reported: Cell::new(false),
        }
    }

    pub fn controlled() -> Self {
        Self {
            mode: Mode::Controlled,
            switch_reported: Cell::new(false),
        }
    }

    pub fn uncontrolled(initial: V) -> Self {
        Self {
            mode: Mode::Uncontrolled(initial),
            switch_reported: Cell::new(false),
        }
    }

    pub fn mode(&self) -> &Mode<V> {
        &self.mode
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self.mode, Mode::Controlled)
    }

    /// The value to display given this render's controlled prop.
    pub fn current(&self, controlled: Option<&V>) -> V {
        match (&self.mode, controlled) {
            (Mode::Controlled, Some(value)) => value.clone(),
            (Mode::Controlled, None) => {
                self.report_switch("controlled", "uncontrolled");
                V::default()
            }
            (Mode::Uncontrolled(value), supplied) => {
                if supplied.is_some() {
                    self.report_switch("uncontrolled", "controlled");
                }
                value.clone()
            }
        }
    }

    /// Commit a new value from user interaction.
    ///
    /// Uncontrolled values are updated before `on_change` runs; controlled
    /// values are never written.
    pub fn commit<F: FnOnce(V)>(&mut self, next: V, on_change: F) {
        if let Mode::Uncontrolled(value) = &mut self.mode {
            *value = next.clone();
        }
        on_change(next);
    }

    fn report_switch(&self, from: &str, to: &str) {
        if !self.switch_reported.replace(true) {
            tracing::warn!(
                from,
                to,
                "component switched between controlled and uncontrolled; keeping the initial mode"
            );
        }
    }
}

impl<V: Clone + Default + PartialEq> ValueSync<V> {
    /// After an interaction produced `edit` and the host re-rendered with
    /// `shown`, the value the control must be put back to, if any.
    ///
    /// Only controlled values are restored; uncontrolled ones always follow
    /// the interaction.
    pub fn reconcile(&self, shown: &V, edit: &V) -> Option<V> {
        (self.is_controlled() && shown != edit).then(|| shown.clone())
    }
}

/// Payload of every change callback: the originating event and the new value.
#[derive(Debug, Clone, PartialEq)]
pub struct Change<E, V> {
    pub event: E,
    pub value: V,
}

impl<E, V> Change<E, V> {
    pub fn new(event: E, value: V) -> Self {
        Self { event, value }
    }
}

/// `aria-checked` value for a binary control with an optional mixed visual.
///
/// Indeterminate never overrides a checked value.
pub fn aria_checked(checked: bool, indeterminate: bool) -> &'static str {
    if checked {
        "true"
    } else if indeterminate {
        "mixed"
    } else {
        "false"
    }
}

/// Whether the indeterminate mark replaces the checkmark.
pub fn shows_indeterminate(checked: bool, indeterminate: bool) -> bool {
    indeterminate && !checked
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn uncontrolled_commit_updates_display() {
        let mut sync = ValueSync::new(None, Some(false));
        assert!(!sync.is_controlled());
        let mut seen = Vec::new();
        sync.commit(true, |v| seen.push(v));
        assert_eq!(sync.current(None), true);
        assert_eq!(seen, vec![true]);
    }

    #[test]
    fn controlled_commit_only_notifies() {
        let mut sync = ValueSync::new(Some(&false), None);
        assert!(sync.is_controlled());
        let mut seen = Vec::new();
        sync.commit(true, |v| seen.push(v));
        // Display tracks the prop, not the interaction.
        assert_eq!(sync.current(Some(&false)), false);
        assert_eq!(sync.current(Some(&true)), true);
        assert_eq!(seen, vec![true]);
    }

    #[test]
    fn controlled_edit_the_host_ignored_is_reverted() {
        let prop = "abc".to_string();
        let mut sync = ValueSync::new(Some(&prop), None);
        let typed = "abcd".to_string();
        let mut seen = Vec::new();
        sync.commit(typed.clone(), |v| seen.push(v));

        // The host kept its prop, so the control goes back to it.
        let shown = sync.current(Some(&prop));
        assert_eq!(sync.reconcile(&shown, &typed), Some("abc".to_string()));
        assert_eq!(seen, vec!["abcd".to_string()]);

        // Deleting back to the prop's value is still an edit worth reporting.
        sync.commit(prop.clone(), |v| seen.push(v));
        assert_eq!(seen.len(), 2);
        assert_eq!(sync.reconcile(&shown, &prop), None);
    }

    #[test]
    fn accepted_or_uncontrolled_edits_are_left_alone() {
        let sync = ValueSync::new(Some(&false), None);
        assert_eq!(sync.reconcile(&true, &true), None);

        let mut sync = ValueSync::uncontrolled("draft".to_string());
        sync.commit("drafts".to_string(), |_| {});
        let shown = sync.current(None);
        assert_eq!(sync.reconcile(&shown, &"drafts".to_string()), None);
        assert_eq!(sync.reconcile(&"x".to_string(), &"y".to_string()), None);
    }

    #[test]
    fn uncontrolled_defaults_to_value_default() {
        let sync: ValueSync<String> = ValueSync::new(None, None);
        assert_eq!(sync.current(None), "");
    }

    #[test]
    fn mode_is_fixed_after_construction() {
        let sync = ValueSync::uncontrolled("draft".to_string());
        // A late controlled prop does not take over.
        assert_eq!(sync.current(Some(&"prop".to_string())), "draft");

        let sync: ValueSync<String> = ValueSync::controlled();
        // A dropped controlled prop falls back to the default, never to stale state.
        assert_eq!(sync.current(None), "");
        assert_eq!(sync.mode(), &Mode::Controlled);
    }

    #[test]
    fn commit_runs_callback_after_internal_update() {
        let mut sync = ValueSync::uncontrolled(1u32);
        let mut observed = 0;
        sync.commit(2, |v| observed = v);
        assert_eq!(observed, 2);
        assert_eq!(sync.current(None), 2);
    }

    #[test]
    fn aria_checked_prefers_checked_over_mixed() {
        assert_eq!(aria_checked(false, true), "mixed");
        assert_eq!(aria_checked(true, true), "true");
        assert_eq!(aria_checked(false, false), "false");
        assert!(shows_indeterminate(false, true));
        assert!(!shows_indeterminate(true, true));
    }

    #[test]
    fn clicking_an_indeterminate_checkbox_checks_it() {
        let mut sync = ValueSync::new(None, Some(false));
        let indeterminate = true;
        assert_eq!(aria_checked(sync.current(None), indeterminate), "mixed");

        let next = !sync.current(None);
        sync.commit(next, |_| {});
        let checked = sync.current(None);
        assert_eq!(aria_checked(checked, indeterminate), "true");
        assert!(!shows_indeterminate(checked, indeterminate));
    }

    #[test]
    fn change_carries_event_and_value() {
        let change = Change::new("click", 7);
        assert_eq!(change.event, "click");
        assert_eq!(change.value, 7);
    }
}

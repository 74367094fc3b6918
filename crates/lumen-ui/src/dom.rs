//! Window listeners and DOM writes that have no rsx equivalent, installed
//! through `document::eval`.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use dioxus::core::Task;
use dioxus::prelude::*;
use lumen_core::ValueSync;
use serde::Serialize;

static NEXT_KEY: AtomicU64 = AtomicU64::new(0);

/// Attribute-safe key, unique per component instance.
pub(crate) fn instance_key(prefix: &str) -> String {
    let n = NEXT_KEY.fetch_add(1, Ordering::Relaxed) + 1;
    format!("{prefix}-{n}")
}

/// Selector for the element carrying `data-lumen-key="{key}"`.
pub(crate) fn key_selector(key: &str) -> String {
    format!(r#"[data-lumen-key="{key}"]"#)
}

fn listen_script(key: &str, event: &str, body: &str) -> String {
    format!(
        r#"
        (function() {{
            var registry = window.__lumenListeners = window.__lumenListeners || {{}};
            var previous = registry['{key}'];
            if (previous) {{
                window.removeEventListener(previous.type, previous.handler);
            }}
            var handler = function(event) {{
                {body}
            }};
            registry['{key}'] = {{ type: '{event}', handler: handler }};
            window.addEventListener('{event}', handler);
        }})();
        "#,
    )
}

/// Reports every pointerdown whose target lies outside the root marked
/// with `key`. The event itself is left alone.
pub(crate) fn outside_pointer_script(key: &str) -> String {
    let selector = key_selector(key);
    listen_script(
        key,
        "pointerdown",
        &format!(
            r#"var root = document.querySelector('{selector}');
                if (root && root.contains(event.target)) {{ return; }}
                dioxus.send(true);"#
        ),
    )
}

/// Reports every Escape keydown anywhere in the window.
pub(crate) fn escape_key_script(key: &str) -> String {
    listen_script(
        key,
        "keydown",
        "if (event.key === 'Escape') { dioxus.send(true); }",
    )
}

/// Removes the listener installed under `key`, if any.
pub(crate) fn release_script(key: &str) -> String {
    format!(
        r#"
        (function() {{
            var registry = window.__lumenListeners || {{}};
            var entry = registry['{key}'];
            if (entry) {{
                window.removeEventListener(entry.type, entry.handler);
                delete registry['{key}'];
            }}
        }})();
        "#,
    )
}

/// Writes the value received from the host into `property` of the field
/// marked with `key`, unless it already holds it.
pub(crate) fn write_field_script(key: &str, property: &str) -> String {
    let selector = key_selector(key);
    format!(
        r#"
        var value = await dioxus.recv();
        var field = document.querySelector('{selector}');
        if (field && field.{property} !== value) {{
            field.{property} = value;
        }}
        "#,
    )
}

/// Keep the window listener built by `install` alive while `active` holds,
/// calling `on_event` for every report it sends. The listener is removed
/// when `active` turns false and when the component unmounts.
pub(crate) fn use_window_listener(
    key: &str,
    install: fn(&str) -> String,
    active: bool,
    on_event: Callback<()>,
) {
    let mut task = use_signal(|| None::<Task>);
    let installed = use_hook(|| Rc::new(Cell::new(false)));
    let key = use_hook(|| key.to_string());

    {
        let key = key.clone();
        let installed = installed.clone();
        use_effect(use_reactive!(|active| {
            if let Some(running) = task.take() {
                running.cancel();
            }
            if !active {
                if installed.replace(false) {
                    document::eval(&release_script(&key));
                }
                return;
            }
            installed.set(true);
            let mut listener = document::eval(&install(&key));
            task.set(Some(spawn(async move {
                while let Ok(true) = listener.recv::<bool>().await {
                    on_event.call(());
                }
            })));
        }));
    }

    use_drop(move || {
        if installed.replace(false) {
            document::eval(&release_script(&key));
        }
    });
}

/// Put `value` into `property` of the field marked with `key`.
pub(crate) fn write_field<V: Serialize>(key: &str, property: &str, value: V) {
    let writer = document::eval(&write_field_script(key, property));
    if let Err(err) = writer.send(value) {
        tracing::debug!(key, property, ?err, "field write skipped");
    }
}

/// Keep a controlled field's DOM `property` in step with its prop.
///
/// Input handlers store the value the user produced in the returned signal.
/// Once the host has had its chance to re-render, an edit it did not accept
/// is overwritten with the value still shown by the prop.
pub(crate) fn use_field_reconcile<V>(
    key: &str,
    property: &'static str,
    sync: Signal<ValueSync<V>>,
    shown: V,
) -> Signal<Option<V>>
where
    V: Clone + Default + PartialEq + Serialize + 'static,
{
    let mut edited = use_signal(|| None::<V>);
    let key = use_hook(|| key.to_string());

    use_effect(use_reactive!(|shown| {
        if edited.read().is_none() {
            return;
        }
        let Some(edit) = edited.write().take() else {
            return;
        };
        if let Some(restore) = sync.peek().reconcile(&shown, &edit) {
            write_field(&key, property, restore);
        }
    }));

    edited
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn instance_keys_are_unique() {
        let a = instance_key("select");
        let b = instance_key("select");
        assert_ne!(a, b);
        assert!(a.starts_with("select-"));
    }

    #[test]
    fn outside_pointer_ignores_events_inside_the_root() {
        let script = outside_pointer_script("select-7");
        assert!(script.contains(r#"document.querySelector('[data-lumen-key="select-7"]')"#));
        assert!(script.contains("root.contains(event.target)"));
        assert!(script.contains("window.addEventListener('pointerdown', handler)"));
        assert!(!script.contains("preventDefault"));
        assert!(!script.contains("stopPropagation"));
    }

    #[test]
    fn install_replaces_a_previous_listener_under_the_same_key() {
        let script = escape_key_script("modal-3");
        assert!(script.contains("registry['modal-3']"));
        assert!(script.contains("window.removeEventListener(previous.type, previous.handler)"));
        assert!(script.contains("event.key === 'Escape'"));
        assert!(script.contains("window.addEventListener('keydown', handler)"));
    }

    #[test]
    fn release_removes_only_its_own_listener() {
        let script = release_script("select-2");
        assert!(script.contains("registry['select-2']"));
        assert!(script.contains("delete registry['select-2']"));
        assert!(!script.contains("select-20"));
    }

    #[test]
    fn field_write_targets_the_marked_field() {
        let script = write_field_script("field-4", "value");
        assert_eq!(key_selector("field-4"), r#"[data-lumen-key="field-4"]"#);
        assert!(script.contains(r#"'[data-lumen-key="field-4"]'"#));
        assert!(script.contains("await dioxus.recv()"));
        assert!(script.contains("field.value = value"));

        let script = write_field_script("checkbox-1", "checked");
        assert!(script.contains("field.checked !== value"));
    }
}

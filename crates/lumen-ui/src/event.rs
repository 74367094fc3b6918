use dioxus::prelude::*;
use lumen_core::{Change, ValueSync};

/// DOM event that caused a value change.
#[derive(Clone)]
pub enum UiEvent {
    Mouse(MouseEvent),
    Keyboard(KeyboardEvent),
    Form(FormEvent),
}

/// Payload handed to every `on_change` handler.
pub type ChangeEvent<V> = Change<UiEvent, V>;

/// Commit `next` through `sync`, then notify the caller.
///
/// The signal borrow is released before the handler runs.
pub(crate) fn commit_and_notify<V: Clone + Default + 'static>(
    mut sync: Signal<ValueSync<V>>,
    next: V,
    event: UiEvent,
    on_change: Option<EventHandler<ChangeEvent<V>>>,
) {
    let mut committed = None;
    sync.write().commit(next, |value| committed = Some(value));
    if let (Some(value), Some(handler)) = (committed, on_change) {
        handler.call(Change::new(event, value));
    }
}

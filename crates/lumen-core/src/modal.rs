//! Modal stacking, scroll lock and focus hand-off.
//!
//! Every open modal owns one entry in a [`ModalStack`]. Only the topmost
//! entry may react to Escape or backdrop clicks, and a host's body scroll
//! lock is held exactly while it has an open modal.

use std::cell::RefCell;
use std::fmt;

/// Overflow style applied to the body while any modal is open.
pub const DEFAULT_SCROLL_LOCK: &str = "hidden";

/// Identity of one open modal. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModalId(u64);

impl ModalId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Access to the document body's overflow style.
pub trait ScrollHost {
    fn overflow(&self) -> String;
    fn set_overflow(&mut self, value: &str);

    /// Hosts reporting the same key share one scroll lock.
    fn lock_key(&self) -> u64 {
        0
    }

    /// Overflow style applied while this host is locked.
    fn lock_style(&self) -> String {
        DEFAULT_SCROLL_LOCK.to_string()
    }
}

/// Access to document focus.
pub trait FocusHost {
    /// Remember the currently focused element on behalf of `id`.
    fn remember_focus(&mut self, id: ModalId);
    /// Give focus back to the element remembered for `id`, if any.
    fn restore_focus(&mut self, id: ModalId);
}

/// Everything a modal needs from its host document.
pub trait ModalHost: ScrollHost + FocusHost {}

impl<T: ScrollHost + FocusHost> ModalHost for T {}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry {
    id: ModalId,
    host: u64,
}

#[derive(Debug, Clone, PartialEq)]
struct Lock {
    host: u64,
    saved: String,
}

/// Ordered set of open modals, last pushed on top.
///
/// Each host is locked by the first modal pushed through it and restored
/// when its last modal is popped, regardless of the order other hosts'
/// modals close in.
#[derive(Debug, Default)]
pub struct ModalStack {
    entries: Vec<Entry>,
    next_id: u64,
    locks: Vec<Lock>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly opened modal. The first push through a host records
    /// its overflow style and applies the lock.
    pub fn push<H: ScrollHost + ?Sized>(&mut self, host: &mut H) -> ModalId {
        self.next_id += 1;
        let id = ModalId(self.next_id);
        let key = host.lock_key();
        if !self.locks.iter().any(|lock| lock.host == key) {
            self.locks.push(Lock {
                host: key,
                saved: host.overflow(),
            });
            let style = host.lock_style();
            host.set_overflow(&style);
            tracing::debug!(%id, host = key, "body scroll locked");
        }
        self.entries.push(Entry { id, host: key });
        tracing::debug!(%id, depth = self.entries.len(), "modal pushed");
        id
    }

    /// Remove `id` wherever it sits. Popping the last modal of a host
    /// restores that host's recorded overflow style. Returns whether `id`
    /// was present.
    pub fn pop<H: ScrollHost + ?Sized>(&mut self, id: ModalId, host: &mut H) -> bool {
        let Some(index) = self.entries.iter().position(|entry| entry.id == id) else {
            return false;
        };
        let entry = self.entries.remove(index);
        tracing::debug!(%id, depth = self.entries.len(), "modal popped");
        if host.lock_key() != entry.host {
            tracing::warn!(
                %id,
                pushed = entry.host,
                popped = host.lock_key(),
                "modal popped through a different host"
            );
        }
        if self.entries.iter().any(|other| other.host == entry.host) {
            return true;
        }
        if let Some(index) = self.locks.iter().position(|lock| lock.host == entry.host) {
            let lock = self.locks.remove(index);
            host.set_overflow(&lock.saved);
            tracing::debug!(host = entry.host, "body scroll restored");
        }
        true
    }

    pub fn is_topmost(&self, id: ModalId) -> bool {
        self.topmost() == Some(id)
    }

    pub fn topmost(&self) -> Option<ModalId> {
        self.entries.last().map(|entry| entry.id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True while any host's scroll lock is held.
    pub fn is_locked(&self) -> bool {
        !self.locks.is_empty()
    }
}

thread_local! {
    static MODAL_STACK: RefCell<ModalStack> = RefCell::new(ModalStack::new());
}

/// Run `f` against the process-wide modal stack.
///
/// UI events are dispatched on a single thread, so the stack lives in a
/// thread local and needs no lock. `f` must not re-enter this function.
pub fn with_modal_stack<R>(f: impl FnOnce(&mut ModalStack) -> R) -> R {
    MODAL_STACK.with(|stack| f(&mut stack.borrow_mut()))
}

/// Token for one deferred focus transfer. Stale tokens are refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTicket(u64);

/// Keys a modal listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKey {
    Escape,
    Other,
}

/// Lifecycle of one Modal component instance.
#[derive(Debug, Default)]
pub struct ModalSession {
    id: Option<ModalId>,
    generation: u64,
    pending_focus: Option<FocusTicket>,
}

impl ModalSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a closed modal still renders its content.
    pub fn should_render(open: bool, keep_mounted: bool) -> bool {
        open || keep_mounted
    }

    pub fn id(&self) -> Option<ModalId> {
        self.id
    }

    pub fn is_open(&self) -> bool {
        self.id.is_some()
    }

    /// Transition to open: remember focus, push onto the stack and schedule
    /// the content focus. Opening an open session does nothing.
    pub fn open<H: ModalHost + ?Sized>(
        &mut self,
        stack: &mut ModalStack,
        host: &mut H,
    ) -> Option<FocusTicket> {
        if self.id.is_some() {
            return None;
        }
        let id = stack.push(host);
        host.remember_focus(id);
        self.id = Some(id);
        self.generation += 1;
        let ticket = FocusTicket(self.generation);
        self.pending_focus = Some(ticket);
        Some(ticket)
    }

    /// Transition to closed, or unmount while open. Closing a closed
    /// session does nothing, so push and pop stay paired.
    pub fn close<H: ModalHost + ?Sized>(&mut self, stack: &mut ModalStack, host: &mut H) -> bool {
        let Some(id) = self.id.take() else {
            return false;
        };
        self.pending_focus = None;
        stack.pop(id, host);
        host.restore_focus(id);
        true
    }

    /// Consume the pending focus transfer. False when the ticket was
    /// cancelled by a close or superseded by a reopen.
    pub fn take_focus(&mut self, ticket: FocusTicket) -> bool {
        if self.pending_focus == Some(ticket) {
            self.pending_focus = None;
            true
        } else {
            false
        }
    }

    pub fn pending_focus(&self) -> Option<FocusTicket> {
        self.pending_focus
    }

    /// Key pressed while open. Returns true when the host should close.
    pub fn wants_close_on_key(
        &self,
        stack: &ModalStack,
        key: ModalKey,
        escape_disabled: bool,
    ) -> bool {
        key == ModalKey::Escape && !escape_disabled && self.is_topmost(stack)
    }

    /// Backdrop clicked. Returns true when the host should run its backdrop
    /// and close callbacks.
    pub fn wants_close_on_backdrop(&self, stack: &ModalStack) -> bool {
        self.is_topmost(stack)
    }

    fn is_topmost(&self, stack: &ModalStack) -> bool {
        self.id.is_some_and(|id| stack.is_topmost(id))
    }
}

/// In-memory host for environments without a document (server rendering,
/// tests). Focus is tracked as an opaque element name.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemoryHost {
    pub key: u64,
    pub lock_style: Option<String>,
    pub overflow: String,
    pub overflow_writes: usize,
    pub focused: Option<String>,
    remembered: Vec<(ModalId, Option<String>)>,
}

impl MemoryHost {
    pub fn new(overflow: impl Into<String>) -> Self {
        Self {
            overflow: overflow.into(),
            ..Self::default()
        }
    }

    pub fn focus(&mut self, element: impl Into<String>) {
        self.focused = Some(element.into());
    }
}

impl ScrollHost for MemoryHost {
    fn overflow(&self) -> String {
        self.overflow.clone()
    }

    fn set_overflow(&mut self, value: &str) {
        self.overflow = value.to_string();
        self.overflow_writes += 1;
    }

    fn lock_key(&self) -> u64 {
        self.key
    }

    fn lock_style(&self) -> String {
        self.lock_style
            .clone()
            .unwrap_or_else(|| DEFAULT_SCROLL_LOCK.to_string())
    }
}

impl FocusHost for MemoryHost {
    fn remember_focus(&mut self, id: ModalId) {
        self.remembered.push((id, self.focused.clone()));
    }

    fn restore_focus(&mut self, id: ModalId) {
        if let Some(index) = self.remembered.iter().position(|(entry, _)| *entry == id) {
            let (_, element) = self.remembered.remove(index);
            if element.is_some() {
                self.focused = element;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut stack = ModalStack::new();
        let mut host = MemoryHost::default();
        let a = stack.push(&mut host);
        let b = stack.push(&mut host);
        stack.pop(b, &mut host);
        let c = stack.push(&mut host);
        assert!(a < b && b < c);
    }

    #[test]
    fn lock_held_iff_stack_non_empty() {
        let mut stack = ModalStack::new();
        let mut host = MemoryHost::new("scroll");

        let outer = stack.push(&mut host);
        assert!(stack.is_locked());
        assert_eq!(host.overflow, "hidden");

        let inner = stack.push(&mut host);
        assert_eq!(host.overflow_writes, 1);

        stack.pop(inner, &mut host);
        assert!(stack.is_locked());
        assert_eq!(host.overflow, "hidden");

        stack.pop(outer, &mut host);
        assert!(!stack.is_locked());
        assert_eq!(host.overflow, "scroll");
        assert_eq!(host.overflow_writes, 2);
    }

    #[test]
    fn restore_happens_exactly_once() {
        let mut stack = ModalStack::new();
        let mut host = MemoryHost::new("");
        let id = stack.push(&mut host);
        assert!(stack.pop(id, &mut host));
        assert!(!stack.pop(id, &mut host));
        assert_eq!(host.overflow_writes, 2);
        assert_eq!(host.overflow, "");
    }

    #[test]
    fn out_of_order_pop_keeps_topmost() {
        let mut stack = ModalStack::new();
        let mut host = MemoryHost::default();
        let a = stack.push(&mut host);
        let b = stack.push(&mut host);
        let c = stack.push(&mut host);

        stack.pop(b, &mut host);
        assert!(stack.is_topmost(c));
        assert!(!stack.is_topmost(a));
        stack.pop(c, &mut host);
        assert!(stack.is_topmost(a));
        assert_eq!(stack.topmost(), Some(a));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn custom_lock_style() {
        let mut stack = ModalStack::new();
        let mut host = MemoryHost::new("auto");
        host.lock_style = Some("clip".to_string());
        let id = stack.push(&mut host);
        assert_eq!(host.overflow, "clip");
        stack.pop(id, &mut host);
        assert_eq!(host.overflow, "auto");
    }

    #[test]
    fn each_host_restored_when_its_last_modal_closes() {
        let mut stack = ModalStack::new();
        let mut outer = MemoryHost::new("scroll");
        let mut inner = MemoryHost::new("");
        inner.key = 1;
        inner.lock_style = Some("clip".to_string());

        let a = stack.push(&mut outer);
        let b = stack.push(&mut inner);
        assert_eq!(outer.overflow, "hidden");
        assert_eq!(inner.overflow, "clip");

        stack.pop(a, &mut outer);
        assert_eq!(outer.overflow, "scroll");
        assert_eq!(inner.overflow, "clip");
        assert!(stack.is_locked());

        stack.pop(b, &mut inner);
        assert_eq!(inner.overflow, "");
        assert!(!stack.is_locked());
        assert_eq!(outer.overflow_writes, 2);
        assert_eq!(inner.overflow_writes, 2);
    }

    #[test]
    fn escape_closes_only_the_topmost_of_n() {
        let mut stack = ModalStack::new();
        let mut host = MemoryHost::default();
        let mut sessions: Vec<ModalSession> = (0..4).map(|_| ModalSession::new()).collect();
        for session in sessions.iter_mut() {
            session.open(&mut stack, &mut host);
        }

        let closing: Vec<usize> = sessions
            .iter()
            .enumerate()
            .filter(|(_, s)| s.wants_close_on_key(&stack, ModalKey::Escape, false))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(closing, vec![3]);

        sessions[3].close(&mut stack, &mut host);
        assert_eq!(stack.len(), 3);
        assert!(sessions[2].wants_close_on_key(&stack, ModalKey::Escape, false));
        assert!(!sessions[1].wants_close_on_key(&stack, ModalKey::Escape, false));
    }

    #[test]
    fn nested_escape_scenario() {
        let mut stack = ModalStack::new();
        let mut host = MemoryHost::new("visible");
        let mut outer = ModalSession::new();
        let mut inner = ModalSession::new();
        outer.open(&mut stack, &mut host);
        inner.open(&mut stack, &mut host);

        assert!(!outer.wants_close_on_key(&stack, ModalKey::Escape, false));
        assert!(inner.wants_close_on_key(&stack, ModalKey::Escape, false));
        inner.close(&mut stack, &mut host);

        assert!(outer.wants_close_on_key(&stack, ModalKey::Escape, false));
        outer.close(&mut stack, &mut host);
        assert!(stack.is_empty());
        assert_eq!(host.overflow, "visible");
    }

    #[test]
    fn escape_can_be_disabled_per_instance() {
        let mut stack = ModalStack::new();
        let mut host = MemoryHost::default();
        let mut session = ModalSession::new();
        session.open(&mut stack, &mut host);
        assert!(!session.wants_close_on_key(&stack, ModalKey::Escape, true));
        assert!(!session.wants_close_on_key(&stack, ModalKey::Other, false));
        assert!(session.wants_close_on_backdrop(&stack));
    }

    #[test]
    fn backdrop_ignored_unless_topmost() {
        let mut stack = ModalStack::new();
        let mut host = MemoryHost::default();
        let mut outer = ModalSession::new();
        let mut inner = ModalSession::new();
        outer.open(&mut stack, &mut host);
        inner.open(&mut stack, &mut host);
        assert!(!outer.wants_close_on_backdrop(&stack));
        assert!(inner.wants_close_on_backdrop(&stack));

        let closed = ModalSession::new();
        assert!(!closed.wants_close_on_backdrop(&stack));
    }

    #[test]
    fn focus_restored_to_previous_element() {
        let mut stack = ModalStack::new();
        let mut host = MemoryHost::default();
        host.focus("open-button");

        let mut session = ModalSession::new();
        let ticket = session.open(&mut stack, &mut host).expect("first open issues a ticket");
        assert!(session.take_focus(ticket));
        host.focus("dialog-content");

        session.close(&mut stack, &mut host);
        assert_eq!(host.focused.as_deref(), Some("open-button"));
    }

    #[test]
    fn close_cancels_pending_focus() {
        let mut stack = ModalStack::new();
        let mut host = MemoryHost::default();
        let mut session = ModalSession::new();
        let stale = session.open(&mut stack, &mut host).expect("ticket");
        session.close(&mut stack, &mut host);
        assert!(!session.take_focus(stale));

        let fresh = session.open(&mut stack, &mut host).expect("ticket");
        assert_ne!(stale, fresh);
        assert!(!session.take_focus(stale));
        assert!(session.take_focus(fresh));
        assert!(!session.take_focus(fresh));
    }

    #[test]
    fn open_and_close_are_idempotent() {
        let mut stack = ModalStack::new();
        let mut host = MemoryHost::default();
        let mut session = ModalSession::new();
        assert!(session.open(&mut stack, &mut host).is_some());
        assert!(session.open(&mut stack, &mut host).is_none());
        assert_eq!(stack.len(), 1);
        assert!(session.close(&mut stack, &mut host));
        assert!(!session.close(&mut stack, &mut host));
        assert!(stack.is_empty());
    }

    #[test]
    fn should_render_rules() {
        assert!(ModalSession::should_render(true, false));
        assert!(ModalSession::should_render(false, true));
        assert!(!ModalSession::should_render(false, false));
    }

    #[test]
    fn global_stack_is_shared_within_a_thread() {
        let mut host = MemoryHost::default();
        let id = with_modal_stack(|stack| stack.push(&mut host));
        assert!(with_modal_stack(|stack| stack.is_topmost(id)));
        with_modal_stack(|stack| stack.pop(id, &mut host));
        assert!(with_modal_stack(|stack| stack.is_empty()));
    }
}

use std::{
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
};

/// An event delivered through an [`EventTarget`].
pub trait Event: Send + 'static {
    /// Which listeners receive the event (e.g. keydown vs keyup).
    type Key: Copy + Eq + fmt::Debug + Send + Sync + 'static;

    fn key(&self) -> Self::Key;
    fn prevent_default(&mut self);
    fn default_prevented(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyboardEventKind {
    KeyDown,
    KeyUp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardEvent {
    pub kind: KeyboardEventKind,
    /// Key value as reported by the platform, e.g. `"s"`, `"S"`, `"Escape"`.
    pub key: String,
    pub ctrl_key: bool,
    pub shift_key: bool,
    pub alt_key: bool,
    pub meta_key: bool,
    default_prevented: bool,
}

impl KeyboardEvent {
    pub fn new(kind: KeyboardEventKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
            ctrl_key: false,
            shift_key: false,
            alt_key: false,
            meta_key: false,
            default_prevented: false,
        }
    }

    pub fn key_down(key: impl Into<String>) -> Self {
        Self::new(KeyboardEventKind::KeyDown, key)
    }

    pub fn key_up(key: impl Into<String>) -> Self {
        Self::new(KeyboardEventKind::KeyUp, key)
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_key = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift_key = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt_key = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta_key = true;
        self
    }
}

impl Event for KeyboardEvent {
    type Key = KeyboardEventKind;

    fn key(&self) -> Self::Key {
        self.kind
    }

    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

pub type NativeListener<E> = Arc<dyn Fn(&mut E) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct RegisteredListener<E: Event> {
    id: ListenerId,
    key: E::Key,
    listener: NativeListener<E>,
}

/// Per-key native listener lists, like the document's.
pub struct EventTarget<E: Event> {
    next_id: AtomicU64,
    listeners: Mutex<Vec<RegisteredListener<E>>>,
}

impl<E: Event> Default for EventTarget<E> {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            listeners: Mutex::new(Vec::new()),
        }
    }
}

impl<E: Event> EventTarget<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event_listener(&self, key: E::Key, listener: NativeListener<E>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock_listeners().push(RegisteredListener { id, key, listener });
        id
    }

    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.lock_listeners();
        let before = listeners.len();
        listeners.retain(|registered| registered.id != id);
        listeners.len() != before
    }

    pub fn listener_count(&self, key: E::Key) -> usize {
        self.lock_listeners()
            .iter()
            .filter(|registered| registered.key == key)
            .count()
    }

    /// Runs every listener registered for the event's key in registration
    /// order. Returns `false` when one of them prevented the default action.
    pub fn dispatch_event(&self, event: &mut E) -> bool {
        let key = event.key();
        let matching: Vec<NativeListener<E>> = self
            .lock_listeners()
            .iter()
            .filter(|registered| registered.key == key)
            .map(|registered| Arc::clone(&registered.listener))
            .collect();

        for listener in matching {
            listener(event);
        }
        !event.default_prevented()
    }

    fn lock_listeners(&self) -> MutexGuard<'_, Vec<RegisteredListener<E>>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

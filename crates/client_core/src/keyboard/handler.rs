use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, MutexGuard, PoisonError, Weak,
};

use tracing::debug;

use super::{
    combo::KeyCombo,
    target::{Event, EventTarget, KeyboardEvent, KeyboardEventKind, ListenerId, NativeListener},
};

pub type Handler<E> = Arc<dyn Fn(&mut E) + Send + Sync>;

static NEXT_HANDLER_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque token returned by [`GlobalEventHandler::push_handler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
    fn next() -> Self {
        Self(NEXT_HANDLER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

struct HandlerEntry<E> {
    id: HandlerId,
    handler: Handler<E>,
}

type HandlerStack<E> = Mutex<Vec<HandlerEntry<E>>>;

fn lock_stack<E>(stack: &HandlerStack<E>) -> MutexGuard<'_, Vec<HandlerEntry<E>>> {
    stack.lock().unwrap_or_else(PoisonError::into_inner)
}

fn remove_last<E>(stack: &HandlerStack<E>, id: HandlerId) -> Option<Handler<E>> {
    let mut handlers = lock_stack(stack);
    let index = handlers.iter().rposition(|entry| entry.id == id)?;
    Some(handlers.remove(index).handler)
}

/// A global event handler bound to one event key of an [`EventTarget`].
///
/// Handlers form a stack and only the most recently pushed one is invoked.
/// When `filter` accepts an event and the stack is not empty, the default
/// action is prevented and the top handler runs; otherwise the event is left
/// untouched. Exactly one native listener is registered while attached, no
/// matter how many handlers are pushed.
pub struct GlobalEventHandler<E: Event> {
    target: Arc<EventTarget<E>>,
    key: E::Key,
    handlers: Arc<HandlerStack<E>>,
    native: NativeListener<E>,
    attached: Mutex<Option<ListenerId>>,
}

impl<E: Event> GlobalEventHandler<E> {
    /// Creates the handler and attaches it right away.
    pub fn new(
        target: Arc<EventTarget<E>>,
        key: E::Key,
        filter: impl Fn(&E) -> bool + Send + Sync + 'static,
    ) -> Self {
        let handlers: Arc<HandlerStack<E>> = Arc::default();
        let stack = Arc::clone(&handlers);
        let native: NativeListener<E> = Arc::new(move |event: &mut E| {
            if !filter(event) {
                return;
            }
            // Released before the call so the handler may push or pop.
            let top = lock_stack(&stack)
                .last()
                .map(|entry| Arc::clone(&entry.handler));
            if let Some(handler) = top {
                event.prevent_default();
                handler(event);
            }
        });

        let global = Self {
            target,
            key,
            handlers,
            native,
            attached: Mutex::new(None),
        };
        global.attach();
        global
    }

    pub fn key(&self) -> E::Key {
        self.key
    }

    /// Pushes `handler` on top of the stack, making it the active one.
    pub fn push_handler(&self, handler: impl Fn(&mut E) + Send + Sync + 'static) -> HandlerId {
        let id = HandlerId::next();
        let mut handlers = lock_stack(&self.handlers);
        handlers.push(HandlerEntry {
            id,
            handler: Arc::new(handler),
        });
        debug!(key = ?self.key, ?id, depth = handlers.len(), "pushed global handler");
        id
    }

    /// Removes the last stack entry registered under `id`.
    pub fn remove_handler(&self, id: HandlerId) -> Option<Handler<E>> {
        let removed = remove_last(&self.handlers, id);
        if removed.is_none() {
            debug!(key = ?self.key, ?id, "global handler already removed");
        }
        removed
    }

    /// Pushes `handler` for as long as the returned guard lives.
    pub fn push_scoped(&self, handler: impl Fn(&mut E) + Send + Sync + 'static) -> HandlerGuard<E> {
        HandlerGuard {
            id: self.push_handler(handler),
            handlers: Arc::downgrade(&self.handlers),
        }
    }

    pub fn handler_count(&self) -> usize {
        lock_stack(&self.handlers).len()
    }

    /// Resumes handling events. Returns `false` if already attached.
    pub fn attach(&self) -> bool {
        let mut attached = self.lock_attached();
        if attached.is_some() {
            return false;
        }
        *attached = Some(self.target.add_event_listener(self.key, Arc::clone(&self.native)));
        true
    }

    /// Pauses handling events; pushed handlers are kept. Returns `false` if
    /// already detached.
    pub fn detach(&self) -> bool {
        match self.lock_attached().take() {
            Some(listener) => self.target.remove_event_listener(listener),
            None => false,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.lock_attached().is_some()
    }

    fn lock_attached(&self) -> MutexGuard<'_, Option<ListenerId>> {
        self.attached.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl GlobalEventHandler<KeyboardEvent> {
    /// Keydown handler for one key combination, e.g. `ctrl+s`.
    pub fn for_combo(target: Arc<EventTarget<KeyboardEvent>>, combo: KeyCombo) -> Self {
        Self::new(target, KeyboardEventKind::KeyDown, move |event| {
            combo.matches(event)
        })
    }
}

impl<E: Event> Drop for GlobalEventHandler<E> {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Keeps a handler pushed until dropped, however the owner goes away.
#[must_use = "dropping the guard removes the handler immediately"]
pub struct HandlerGuard<E> {
    id: HandlerId,
    handlers: Weak<HandlerStack<E>>,
}

impl<E> HandlerGuard<E> {
    pub fn id(&self) -> HandlerId {
        self.id
    }
}

impl<E> Drop for HandlerGuard<E> {
    fn drop(&mut self) {
        if let Some(handlers) = self.handlers.upgrade() {
            remove_last(&handlers, self.id);
        }
    }
}

#[cfg(test)]
#[path = "../tests/global_handler_tests.rs"]
mod tests;

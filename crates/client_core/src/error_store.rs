//! Single-subscriber channel that funnels unrecoverable failures from deeply
//! nested API code to the one surface that reacts to them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

pub type ErrorListener<E> = Arc<dyn Fn(E) + Send + Sync>;

/// Holds at most one listener. The first [`subscribe`](Self::subscribe) wins;
/// later ones are dropped until [`clear`](Self::clear) is called.
pub struct ErrorStore<E> {
    listener: Mutex<Option<ErrorListener<E>>>,
}

impl<E> Default for ErrorStore<E> {
    fn default() -> Self {
        Self {
            listener: Mutex::new(None),
        }
    }
}

impl<E> ErrorStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `listener` if no listener is registered yet. Returns whether
    /// it was installed.
    pub fn subscribe(&self, listener: impl Fn(E) + Send + Sync + 'static) -> bool {
        let mut slot = self.lock_listener();
        if slot.is_some() {
            debug!("error listener already registered; ignoring subscription");
            return false;
        }
        *slot = Some(Arc::new(listener));
        true
    }

    /// Hands `error` to the listener on the calling thread. Without a listener
    /// the error is dropped, which is expected before the boundary is mounted.
    pub fn report(&self, error: E) {
        // Cloned out so the listener can report or subscribe re-entrantly.
        let listener = self.lock_listener().clone();
        match listener {
            Some(listener) => listener(error),
            None => debug!("no error listener registered; dropping report"),
        }
    }

    pub fn has_listener(&self) -> bool {
        self.lock_listener().is_some()
    }

    /// Removes the listener so a new boundary can subscribe. Returns whether
    /// one was registered.
    pub fn clear(&self) -> bool {
        self.lock_listener().take().is_some()
    }

    fn lock_listener(&self) -> MutexGuard<'_, Option<ErrorListener<E>>> {
        self.listener.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "tests/error_store_tests.rs"]
mod tests;

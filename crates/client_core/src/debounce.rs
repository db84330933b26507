use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use tokio::{sync::watch, task::JoinHandle};

/// A value with an immediately updated current side and a debounced side that
/// only follows after `delay` without further updates (e.g. search inputs).
pub struct Debounced<T> {
    delay: Duration,
    current: watch::Sender<T>,
    debounced: Arc<watch::Sender<T>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T> Debounced<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(value: T, delay: Duration) -> Self {
        let (current, _) = watch::channel(value.clone());
        let (debounced, _) = watch::channel(value);
        Self {
            delay,
            current,
            debounced: Arc::new(debounced),
            pending: Mutex::new(None),
        }
    }

    pub fn current(&self) -> T {
        self.current.borrow().clone()
    }

    pub fn debounced(&self) -> T {
        self.debounced.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.debounced.subscribe()
    }

    /// Updates the current value and restarts the delay for the debounced one.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub fn set(&self, value: T) {
        self.current.send_replace(value.clone());

        let debounced = Arc::clone(&self.debounced);
        let delay = self.delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debounced.send_replace(value);
        });

        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(task);
        if let Some(previous) = previous {
            previous.abort();
        }
    }
}

impl<T> Drop for Debounced<T> {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = pending {
            task.abort();
        }
    }
}

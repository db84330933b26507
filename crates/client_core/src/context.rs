use std::sync::Arc;

use anyhow::Result;

use crate::{
    boundary::ErrorBoundary,
    config::Settings,
    error::ReportedError,
    error_store::ErrorStore,
    keyboard::{EventTarget, GlobalEventHandler, KeyboardEvent},
};

/// Process-wide services, created once at startup and passed to whoever needs
/// them instead of living in globals.
pub struct AppContext {
    pub settings: Settings,
    pub document: Arc<EventTarget<KeyboardEvent>>,
    pub errors: Arc<ErrorStore<ReportedError>>,
    /// Save shortcut (`ctrl+s` by default).
    pub save: GlobalEventHandler<KeyboardEvent>,
    /// Cancel shortcut (`escape` by default).
    pub cancel: GlobalEventHandler<KeyboardEvent>,
}

impl AppContext {
    pub fn new(settings: Settings) -> Result<Self> {
        let shortcuts = settings.shortcuts()?;
        let document = Arc::new(EventTarget::new());
        let save = GlobalEventHandler::for_combo(Arc::clone(&document), shortcuts.save);
        let cancel = GlobalEventHandler::for_combo(Arc::clone(&document), shortcuts.cancel);

        Ok(Self {
            settings,
            document,
            errors: Arc::new(ErrorStore::new()),
            save,
            cancel,
        })
    }

    /// Subscribes the top-level error boundary. Only the first call gets a
    /// boundary that sees reports.
    pub fn install_boundary(&self) -> ErrorBoundary {
        ErrorBoundary::install(&self.errors)
    }

    /// Feeds a platform key event through the document. Returns `false` when
    /// a shortcut consumed it.
    pub fn dispatch_key(&self, event: &mut KeyboardEvent) -> bool {
        self.document.dispatch_event(event)
    }
}

//! Top-level error boundary: the single subscriber of the error store that
//! decides between the login flow and the crash screen.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use crate::{error::ReportedError, error_store::ErrorStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryView {
    Healthy,
    /// Navigate to the login screen.
    Login,
    /// Unexpected failure, shown on the error screen with a retry action.
    Crashed(String),
}

#[derive(Clone, Default)]
pub struct ErrorBoundary {
    latest: Arc<Mutex<Option<ReportedError>>>,
}

impl ErrorBoundary {
    /// Subscribes a boundary to `store`. If another listener already owns the
    /// store, the returned boundary stays healthy forever.
    pub fn install(store: &ErrorStore<ReportedError>) -> Self {
        let boundary = Self::default();
        let latest = Arc::clone(&boundary.latest);
        let installed = store.subscribe(move |err| {
            // A newer report replaces one that was not rendered yet.
            *latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(err);
        });
        if !installed {
            warn!("error boundary not installed: the error store already has a listener");
        }
        boundary
    }

    /// What the boundary renders on the next pass.
    pub fn view(&self) -> BoundaryView {
        match &*self.lock_latest() {
            None => BoundaryView::Healthy,
            Some(ReportedError::Unauthenticated) => BoundaryView::Login,
            Some(ReportedError::Message(message)) => BoundaryView::Crashed(message.clone()),
        }
    }

    /// Called once the login screen succeeded. Only clears the
    /// unauthenticated state.
    pub fn complete_login(&self) -> bool {
        let mut latest = self.lock_latest();
        if matches!(*latest, Some(ReportedError::Unauthenticated)) {
            *latest = None;
            info!("login completed; leaving login screen");
            return true;
        }
        false
    }

    /// "Try again" on the crash screen.
    pub fn retry(&self) -> bool {
        let mut latest = self.lock_latest();
        if matches!(*latest, Some(ReportedError::Message(_))) {
            *latest = None;
            return true;
        }
        false
    }

    fn lock_latest(&self) -> MutexGuard<'_, Option<ReportedError>> {
        self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};

use async_trait::async_trait;
use shared::{domain::Account, outcome::Outcome};
use tracing::{debug, info, warn};

use crate::{
    api::{handle_error, TransportError},
    error::ReportedError,
    error_store::ErrorStore,
};

#[async_trait]
pub trait AccountFetcher: Send + Sync {
    async fn fetch_me(&self) -> Result<Account, TransportError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountState {
    Loading,
    Ready(Account),
}

/// Owns the logged-in account shown throughout the dashboard.
pub struct AccountProvider<F> {
    fetcher: F,
    errors: Arc<ErrorStore<ReportedError>>,
    state: Mutex<AccountState>,
    fetching: AtomicBool,
}

impl<F: AccountFetcher> AccountProvider<F> {
    pub fn new(fetcher: F, errors: Arc<ErrorStore<ReportedError>>) -> Self {
        Self {
            fetcher,
            errors,
            state: Mutex::new(AccountState::Loading),
            fetching: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> AccountState {
        self.lock_state().clone()
    }

    pub fn account(&self) -> Option<Account> {
        match &*self.lock_state() {
            AccountState::Ready(account) => Some(account.clone()),
            AccountState::Loading => None,
        }
    }

    /// Re-fetches the account. Returns `false` without doing anything if a
    /// fetch is already running. Failures go to the error store.
    pub async fn fetch_account(&self) -> bool {
        if self.fetching.swap(true, Ordering::AcqRel) {
            debug!("account fetch already in flight");
            return false;
        }
        let _in_flight = InFlight(&self.fetching);

        *self.lock_state() = AccountState::Loading;
        match handle_error(&self.errors, self.fetcher.fetch_me()).await {
            Outcome::Ok(account) => {
                info!(account = ?account.uuid, "account loaded");
                *self.lock_state() = AccountState::Ready(account);
            }
            Outcome::Err(err) => warn!(error = %err, "failed to load account"),
        }
        true
    }

    /// Resets the account view after a fresh login.
    pub async fn reset(&self) -> bool {
        self.fetch_account().await
    }

    fn lock_state(&self) -> MutexGuard<'_, AccountState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears the in-flight flag even when the fetch future is dropped mid-await.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

//! Client-side services of the dinner dashboard: error reporting, the error
//! boundary policy, global keyboard shortcuts, API error translation, the
//! account provider and debounced inputs.

pub mod account;
pub mod api;
pub mod boundary;
pub mod config;
pub mod context;
pub mod debounce;
pub mod error;
pub mod error_store;
pub mod keyboard;

pub use account::{AccountFetcher, AccountProvider, AccountState};
pub use api::{handle_error, TransportError};
pub use boundary::{BoundaryView, ErrorBoundary};
pub use config::{load_settings, load_settings_from, Settings};
pub use context::AppContext;
pub use debounce::Debounced;
pub use error::ReportedError;
pub use error_store::ErrorStore;
pub use keyboard::{
    EventTarget, GlobalEventHandler, HandlerGuard, HandlerId, KeyCombo, KeyboardEvent,
    KeyboardEventKind,
};

//! Global keyboard shortcuts: an in-process event target standing in for the
//! document, stack based handler ownership on top of it, and parsed key
//! combinations used as dispatch filters.

mod combo;
mod handler;
mod target;

pub use combo::{KeyCombo, KeyComboParseError};
pub use handler::{GlobalEventHandler, Handler, HandlerGuard, HandlerId};
pub use target::{
    Event, EventTarget, KeyboardEvent, KeyboardEventKind, ListenerId, NativeListener,
};

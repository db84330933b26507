pub mod domain;
pub mod error;
pub mod outcome;
pub mod validators;

pub use outcome::{Outcome, UnwrapError};

//! `Outcome<T, E>`: the success/failure container returned by validators and
//! API wrappers, with a chainable combinator API so failures propagate without
//! nested branching.
//!
//! The two variants are closed (`Ok` / `Err`), exactly one payload is present,
//! and every combinator consumes `self` and yields a new value.

use std::{convert::Infallible, fmt, panic};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use = "this `Outcome` may be an `Err` variant, which should be handled"]
pub enum Outcome<T, E> {
    Ok(T),
    Err(E),
}

/// Raised by [`Outcome::unwrap`] (as the panic payload) and returned by
/// [`Outcome::try_unwrap`] when called on an `Err`.
///
/// Carries the original error value for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Called `unwrap` on an `Err` with value: {value:?}")]
pub struct UnwrapError<E: fmt::Debug> {
    pub value: E,
}

impl<E: fmt::Debug> UnwrapError<E> {
    pub fn new(value: E) -> Self {
        Self { value }
    }

    pub fn into_value(self) -> E {
        self.value
    }
}

/// Wraps `value` in an `Ok` whose error side provably holds nothing.
///
/// Use [`Outcome::cast_err`] to pick the error type later.
pub fn success<T>(value: T) -> Outcome<T, Infallible> {
    Outcome::Ok(value)
}

/// Wraps `err` in an `Err` whose success side provably holds nothing.
///
/// Use [`Outcome::cast_ok`] to pick the success type later.
pub fn failure<E>(err: E) -> Outcome<Infallible, E> {
    Outcome::Err(err)
}

impl<T, E> Outcome<T, E> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Err(_) => None,
        }
    }

    pub fn err(self) -> Option<E> {
        match self {
            Self::Ok(_) => None,
            Self::Err(err) => Some(err),
        }
    }

    pub fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Err(err) => Outcome::Err(err),
        }
    }

    /// Calls exactly one of `if_ok` / `if_err` with the matching payload and
    /// returns what that branch returns.
    pub fn match_with<R>(self, if_ok: impl FnOnce(T) -> R, if_err: impl FnOnce(E) -> R) -> R {
        match self {
            Self::Ok(value) => if_ok(value),
            Self::Err(err) => if_err(err),
        }
    }

    /// Runs `func` on the success value; an `Err` is passed through untouched
    /// with the new success type.
    pub fn and_then<U>(self, func: impl FnOnce(T) -> Outcome<U, E>) -> Outcome<U, E> {
        match self {
            Self::Ok(value) => func(value),
            Self::Err(err) => Outcome::Err(err),
        }
    }

    /// Maps `Outcome<T, E>` to `Outcome<U, E>`, leaving an `Err` untouched.
    pub fn map<U>(self, func: impl FnOnce(T) -> U) -> Outcome<U, E> {
        match self {
            Self::Ok(value) => Outcome::Ok(func(value)),
            Self::Err(err) => Outcome::Err(err),
        }
    }

    /// Maps `Outcome<T, E>` to `Outcome<T, F>`, leaving an `Ok` untouched.
    pub fn map_err<F>(self, func: impl FnOnce(E) -> F) -> Outcome<T, F> {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Err(err) => Outcome::Err(func(err)),
        }
    }

    /// Returns the success value, or the [`UnwrapError`] that
    /// [`Outcome::unwrap`] would have panicked with.
    pub fn try_unwrap(self) -> Result<T, UnwrapError<E>>
    where
        E: fmt::Debug,
    {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Err(err) => Err(UnwrapError::new(err)),
        }
    }

    /// Returns the success value.
    ///
    /// # Panics
    ///
    /// Panics with an [`UnwrapError`] payload when called on an `Err`. This is
    /// meant for programmer errors only; prefer [`Outcome::match_with`],
    /// [`Outcome::unwrap_or`] or [`Outcome::unwrap_or_else`] for expected
    /// failures.
    ///
    /// The payload must be `Send + 'static`, so outcomes carrying a borrowed
    /// error (`Outcome<T, &'a str>`) have no `unwrap`. Use
    /// [`Outcome::try_unwrap`] for those, or [`Outcome::map_err`] the error
    /// into an owned value first.
    pub fn unwrap(self) -> T
    where
        E: fmt::Debug + Send + 'static,
    {
        match self.try_unwrap() {
            Ok(value) => value,
            Err(unwrap_error) => {
                tracing::error!(error = %unwrap_error, "unwrap on an Err outcome");
                panic::panic_any(unwrap_error)
            }
        }
    }

    /// Returns the success value or the eagerly evaluated `default`.
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Err(_) => default,
        }
    }

    /// Returns the success value or computes one from `default`. The closure
    /// is never called on an `Ok`.
    pub fn unwrap_or_else(self, default: impl FnOnce() -> T) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Err(_) => default(),
        }
    }

    pub fn into_result(self) -> Result<T, E> {
        self.into()
    }

    /// Takes each outcome in order. The first `Err` stops the iteration (later
    /// items are never pulled) and is returned; otherwise all success values
    /// are returned in order.
    pub fn collect<I>(outcomes: I) -> Outcome<Vec<T>, E>
    where
        I: IntoIterator<Item = Outcome<T, E>>,
    {
        outcomes.into_iter().collect()
    }
}

impl<T> Outcome<T, Infallible> {
    /// Reinterprets the error type of an outcome that can only be `Ok`.
    pub fn cast_err<F>(self) -> Outcome<T, F> {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Err(never) => match never {},
        }
    }
}

impl<E> Outcome<Infallible, E> {
    /// Reinterprets the success type of an outcome that can only be `Err`.
    pub fn cast_ok<U>(self) -> Outcome<U, E> {
        match self {
            Self::Ok(never) => match never {},
            Self::Err(err) => Outcome::Err(err),
        }
    }
}

impl<T, E> FromIterator<Outcome<T, E>> for Outcome<Vec<T>, E> {
    fn from_iter<I: IntoIterator<Item = Outcome<T, E>>>(iter: I) -> Self {
        let mut values = Vec::new();
        for outcome in iter {
            match outcome {
                Outcome::Ok(value) => values.push(value),
                Outcome::Err(err) => return Outcome::Err(err),
            }
        }
        Outcome::Ok(values)
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(value: Result<T, E>) -> Self {
        match value {
            Ok(value) => Self::Ok(value),
            Err(err) => Self::Err(err),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(value: Outcome<T, E>) -> Self {
        match value {
            Outcome::Ok(value) => Ok(value),
            Outcome::Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
#[path = "tests/outcome_tests.rs"]
mod tests;

//! Extension traits for wrapping at the `?` site

use super::types::{Error, LeafError};
use crate::annotate::{with_message, Annotator};
use crate::stack_trace::StackTrace;
use crate::wrap::{wrap_at, Extract};
use std::sync::Arc;

/// Wrapping helpers for `Result`
///
/// `Ok` values pass through untouched. Errors are wrapped as if
/// [`crate::wrap`] had been called where the method was called.
pub trait ResultExt<T> {
    /// Wrap the error without further context
    fn wrap_err(self) -> Result<T, Error>;

    /// Wrap the error and apply `annotators`
    fn wrap_with<I>(self, annotators: I) -> Result<T, Error>
    where
        I: IntoIterator<Item = Annotator>;

    /// Wrap the error and prepend `message`
    fn context<M>(self, message: M) -> Result<T, Error>
    where
        M: Into<String>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Extract,
{
    #[inline(never)]
    fn wrap_err(self) -> Result<T, Error> {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(wrap_at(error, std::iter::empty(), 1)),
        }
    }

    #[inline(never)]
    fn wrap_with<I>(self, annotators: I) -> Result<T, Error>
    where
        I: IntoIterator<Item = Annotator>,
    {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(wrap_at(error, annotators, 1)),
        }
    }

    #[inline(never)]
    fn context<M>(self, message: M) -> Result<T, Error>
    where
        M: Into<String>,
    {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(wrap_at(error, [with_message(message)], 1)),
        }
    }
}

/// Turning a missing value into an error
pub trait OptionExt<T> {
    /// `None` becomes an error that formats as `text`, traced from the caller
    fn ok_or_fail<S>(self, text: S) -> Result<T, Error>
    where
        S: Into<String>;
}

impl<T> OptionExt<T> for Option<T> {
    #[inline(never)]
    fn ok_or_fail<S>(self, text: S) -> Result<T, Error>
    where
        S: Into<String>,
    {
        match self {
            Some(value) => Ok(value),
            None => Err(Error::from_cause(
                Arc::new(LeafError::new(text)),
                StackTrace::capture(0),
            )),
        }
    }
}

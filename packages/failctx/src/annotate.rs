//! Annotators: single-purpose mutations applied to an [`Error`]
//!
//! `wrap` applies annotators in the order given, after the cause, the
//! message seed and the stack trace of the result are in place.

use crate::error::{Code, Error};
use std::fmt;

/// One piece of context to attach to an [`Error`]
pub struct Annotator(Box<dyn FnOnce(&mut Error) + Send>);

impl Annotator {
    /// Build a custom annotator over the mutators of [`Error`]
    pub fn new<F>(annotate: F) -> Self
    where
        F: FnOnce(&mut Error) + Send + 'static,
    {
        Self(Box::new(annotate))
    }

    /// Apply the annotation to `error`
    pub fn apply(self, error: &mut Error) {
        (self.0)(error);
    }
}

impl fmt::Debug for Annotator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Annotator").finish_non_exhaustive()
    }
}

/// Prepend `message` to the message stack
pub fn with_message(message: impl Into<String>) -> Annotator {
    let message = message.into();
    Annotator::new(move |error| error.push_message(message))
}

/// Set the classification code
pub fn with_code(code: impl Into<Code>) -> Annotator {
    let code = code.into();
    Annotator::new(move |error| error.set_code(code))
}

/// Mark the error as (not) worth alerting administrators about
pub fn with_ignorable(ignorable: bool) -> Annotator {
    Annotator::new(move |error| error.set_ignorable(ignorable))
}

/// Add classification tags
pub fn with_tags<I, S>(tags: I) -> Annotator
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
    Annotator::new(move |error| error.add_tags(tags))
}

/// Merge parameters; later keys overwrite earlier ones
pub fn with_params<I, K, V>(params: I) -> Annotator
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<serde_json::Value>,
{
    let params: Vec<(String, serde_json::Value)> = params
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect();
    Annotator::new(move |error| error.insert_params(params))
}

/// Set a single parameter
pub fn with_param(key: impl Into<String>, value: impl Into<serde_json::Value>) -> Annotator {
    with_params([(key.into(), value.into())])
}

//! Core error types and definitions

use crate::stack_trace::StackTrace;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use thiserror::Error as ThisError;

/// Classification code, e.g. an HTTP status to put in a response
pub type Code = serde_json::Value;

/// Structured diagnostic parameters, keyed by name
pub type Params = BTreeMap<String, serde_json::Value>;

/// Error with accumulated context and a stack trace
///
/// Cloning is a pointer copy. Every mutator is copy-on-write, so an error
/// already handed to another owner never observes later changes made
/// through a clone or a [`Error::copy`].
#[derive(Debug, Clone)]
pub struct Error {
    pub(crate) inner: Arc<ErrorInner>,
}

#[derive(Debug, Clone)]
pub(crate) struct ErrorInner {
    /// The original error (the root cause)
    pub cause: Arc<dyn std::error::Error + Send + Sync>,
    /// Annotated descriptions, most recent first
    pub messages: Arc<Vec<String>>,
    /// Status code desired in responses
    pub code: Option<Code>,
    /// Whether administrators should not be alerted
    pub ignorable: bool,
    /// Classification tags
    pub tags: Arc<BTreeSet<String>>,
    /// Annotated parameters
    pub params: Arc<Params>,
    /// Stack trace from the point the original error was created
    pub stack_trace: StackTrace,
}

/// Leaf failure created by [`Error::new`] and [`crate::errorf!`]
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("{text}")]
pub struct LeafError {
    text: String,
}

impl LeafError {
    /// Create a leaf failure carrying `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The description of the failure
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A foreign error paired with the stack trace of the point it was raised
///
/// Lighter than a full [`Error`]: no messages or metadata. Wrapping a
/// `Traced` keeps its trace as the origin of the resulting error.
#[derive(Debug, ThisError)]
#[error("{error}")]
pub struct Traced {
    pub(crate) error: Box<dyn std::error::Error + Send + Sync>,
    pub(crate) stack_trace: StackTrace,
}

impl Traced {
    /// Capture the caller's stack alongside `error`
    #[inline(never)]
    pub fn new<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            error: Box::new(error),
            stack_trace: StackTrace::capture(0),
        }
    }

    /// The traced error
    #[must_use]
    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.error.as_ref()
    }

    /// Stack trace captured at construction
    #[must_use]
    pub fn stack_trace(&self) -> &StackTrace {
        &self.stack_trace
    }
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

//! Error constructors and methods

use super::types::{Code, Error, ErrorInner, LeafError, Params};
use crate::annotate::Annotator;
use crate::stack_trace::StackTrace;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Delimiter used to join the message stack
pub const MESSAGE_DELIMITER: &str = ": ";

impl Error {
    /// Create an error that formats as `text`, with a stack trace from the
    /// point it was called
    #[inline(never)]
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self::from_cause(Arc::new(LeafError::new(text)), StackTrace::capture(0))
    }

    /// Create an error from preformatted arguments, with a stack trace from
    /// the point it was called. Usually reached through [`crate::errorf!`].
    #[inline(never)]
    #[must_use]
    pub fn errorf(args: fmt::Arguments<'_>) -> Self {
        Self::from_cause(
            Arc::new(LeafError::new(fmt::format(args))),
            StackTrace::capture(0),
        )
    }

    pub(crate) fn from_cause(
        cause: Arc<dyn std::error::Error + Send + Sync>,
        stack_trace: StackTrace,
    ) -> Self {
        Self {
            inner: Arc::new(ErrorInner {
                cause,
                messages: Arc::default(),
                code: None,
                ignorable: false,
                tags: Arc::default(),
                params: Arc::default(),
                stack_trace,
            }),
        }
    }

    /// Create a copy with its own header.
    ///
    /// Messages, tags and params are shared with `self` until either side
    /// changes them.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self {
            inner: Arc::new(ErrorInner::clone(&self.inner)),
        }
    }

    /// The original error
    #[must_use]
    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.inner.cause.as_ref()
    }

    /// Annotated messages, most recent first
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.inner.messages
    }

    /// The most recently added message, or `""`
    #[must_use]
    pub fn last_message(&self) -> &str {
        self.inner.messages.first().map_or("", String::as_str)
    }

    /// All messages joined with `": "`, most recent first
    #[must_use]
    pub fn full_message(&self) -> String {
        self.inner.messages.join(MESSAGE_DELIMITER)
    }

    /// Classification code, if set
    #[must_use]
    pub fn code(&self) -> Option<&Code> {
        self.inner.code.as_ref()
    }

    /// Whether the error should be kept away from administrator alerting
    #[must_use]
    pub fn is_ignorable(&self) -> bool {
        self.inner.ignorable
    }

    /// Classification tags
    #[must_use]
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.inner.tags
    }

    /// Whether `tag` was attached
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.inner.tags.contains(tag)
    }

    /// Annotated parameters
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.inner.params
    }

    /// A single parameter
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&serde_json::Value> {
        self.inner.params.get(key)
    }

    /// Stack trace from the origin of the error to the latest wrap site
    #[must_use]
    pub fn stack_trace(&self) -> &StackTrace {
        &self.inner.stack_trace
    }

    /// Prepend a message to the message stack
    pub fn push_message(&mut self, message: impl Into<String>) {
        Arc::make_mut(&mut self.inner_mut().messages).insert(0, message.into());
    }

    /// Set the classification code
    pub fn set_code(&mut self, code: impl Into<Code>) {
        self.inner_mut().code = Some(code.into());
    }

    /// Set the ignorable flag
    pub fn set_ignorable(&mut self, ignorable: bool) {
        self.inner_mut().ignorable = ignorable;
    }

    /// Add classification tags
    pub fn add_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::make_mut(&mut self.inner_mut().tags).extend(tags.into_iter().map(Into::into));
    }

    /// Merge parameters, overwriting existing keys
    pub fn insert_params<I, K, V>(&mut self, params: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        Arc::make_mut(&mut self.inner_mut().params).extend(
            params
                .into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
    }

    /// Apply annotators in order
    #[must_use]
    pub fn annotated<I>(mut self, annotators: I) -> Self
    where
        I: IntoIterator<Item = Annotator>,
    {
        for annotator in annotators {
            annotator.apply(&mut self);
        }
        self
    }

    pub(crate) fn set_stack_trace(&mut self, stack_trace: StackTrace) {
        self.inner_mut().stack_trace = stack_trace;
    }

    fn inner_mut(&mut self) -> &mut ErrorInner {
        Arc::make_mut(&mut self.inner)
    }
}

//! Wrapping arbitrary errors into contextual errors

use crate::annotate::{with_message, Annotator};
use crate::error::{Error, Traced};
use crate::stack_trace::StackTrace;
use std::sync::Arc;

/// Structure recovered from an error about to be wrapped
#[derive(Debug)]
pub enum Extracted {
    /// Already a contextual error
    Contextual(Error),
    /// Any other error, viewed as its cause, its own text and the stack
    /// trace it carries (empty when it carries none)
    Structured {
        /// The innermost error
        cause: Arc<dyn std::error::Error + Send + Sync>,
        /// Text seeding the message stack
        message: String,
        /// Trace carried by the error
        stack_trace: StackTrace,
    },
}

impl Extracted {
    /// Inspect a boxed error once
    pub fn from_boxed(error: Box<dyn std::error::Error + Send + Sync>) -> Self {
        let error = match error.downcast::<Error>() {
            Ok(contextual) => return Self::Contextual(*contextual),
            Err(error) => error,
        };

        match error.downcast::<Traced>() {
            Ok(traced) => Self::from_traced(*traced),
            Err(error) => Self::structured(error, StackTrace::default()),
        }
    }

    fn from_traced(traced: Traced) -> Self {
        let Traced { error, stack_trace } = traced;
        match error.downcast::<Error>() {
            Ok(contextual) => Self::Contextual(*contextual),
            Err(error) => Self::structured(error, stack_trace),
        }
    }

    fn structured(error: Box<dyn std::error::Error + Send + Sync>, stack_trace: StackTrace) -> Self {
        let message = error.to_string();
        Self::Structured {
            cause: Arc::from(error),
            message,
            stack_trace,
        }
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for Extracted {
    fn from(error: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self::from_boxed(error)
    }
}

/// Errors that can be wrapped
///
/// Every `std::error::Error + Send + Sync + 'static` qualifies. Contextual
/// errors and [`Traced`] errors expose their structure; anything else is
/// treated as a plain cause.
///
/// A type-erased `Box<dyn std::error::Error + Send + Sync>` is not itself an
/// error type, so it goes through [`Extracted`]:
///
/// ```
/// use failctx::{with_message, wrap, Error, Extracted};
///
/// let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(Error::new("root"));
/// let err = wrap(Extracted::from(boxed), [with_message("load")]);
/// assert_eq!(err.to_string(), "load: root");
/// ```
pub trait Extract {
    /// Recover the structure of `self`
    fn extract(self) -> Extracted;
}

impl<E> Extract for E
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn extract(self) -> Extracted {
        Extracted::from_boxed(Box::new(self))
    }
}

impl Extract for Extracted {
    fn extract(self) -> Extracted {
        self
    }
}

/// Wrap `error` with a stack trace from the point it was called and the
/// given annotators
///
/// Foreign errors become contextual, their own text seeding the message
/// stack. Contextual errors are copied, so the caller's value is never
/// changed. Either way the stack trace is extended to the call site.
#[inline(never)]
pub fn wrap<E, I>(error: E, annotators: I) -> Error
where
    E: Extract,
    I: IntoIterator<Item = Annotator>,
{
    wrap_at(error, annotators, 1)
}

/// [`wrap`], passing `None` through untouched
#[inline(never)]
// A closure passed to `Option::map` would add a frame between this entry
// point and the capture.
#[allow(clippy::manual_map)]
pub fn wrap_opt<E, I>(error: Option<E>, annotators: I) -> Option<Error>
where
    E: Extract,
    I: IntoIterator<Item = Annotator>,
{
    match error {
        Some(error) => Some(wrap_at(error, annotators, 1)),
        None => None,
    }
}

/// View `error` as a contextual error, if it is one
#[must_use]
pub fn unwrap<'a>(error: &'a (dyn std::error::Error + 'static)) -> Option<&'a Error> {
    error.downcast_ref::<Error>()
}

/// Wrap with the trace starting `skip` frames above the caller of this
/// function. Must be called directly by the public entry point.
#[inline(never)]
pub(crate) fn wrap_at<E, I>(error: E, annotators: I, skip: usize) -> Error
where
    E: Extract,
    I: IntoIterator<Item = Annotator>,
{
    let here = StackTrace::capture(skip);

    let mut wrapped = match error.extract() {
        Extracted::Contextual(contextual) => {
            let mut wrapped = contextual.copy();
            if wrapped.messages().is_empty() {
                let root = wrapped.cause().to_string();
                with_message(root).apply(&mut wrapped);
            }
            wrapped
        }
        Extracted::Structured {
            cause,
            message,
            stack_trace,
        } => {
            let mut wrapped = Error::from_cause(cause, stack_trace);
            with_message(message).apply(&mut wrapped);
            wrapped
        }
    };

    let stack_trace = StackTrace::merge(wrapped.stack_trace(), &here);
    wrapped.set_stack_trace(stack_trace);

    for annotator in annotators {
        annotator.apply(&mut wrapped);
    }

    tracing::trace!(
        messages = wrapped.messages().len(),
        frames = wrapped.stack_trace().len(),
        "Wrapped error: {wrapped}"
    );

    wrapped
}

//! Contextual errors for layered applications
//!
//! An [`Error`] wraps an underlying failure and accumulates, as it travels
//! up the call stack:
//! - human-readable context, most recent first
//! - a classification code, tags and key/value params
//! - an ignorable flag for alerting suppression
//! - a stack trace extended at every wrap site
//!
//! ```
//! use failctx::{with_code, with_message, wrap, Error};
//!
//! fn connect() -> Result<(), Error> {
//!     Err(Error::new("connection refused"))
//! }
//!
//! let err = connect()
//!     .map_err(|err| wrap(err, [with_message("load user"), with_code(503)]))
//!     .unwrap_err();
//!
//! assert_eq!(err.to_string(), "load user: connection refused");
//! assert_eq!(err.last_message(), "load user");
//! assert_eq!(err.code().and_then(|code| code.as_u64()), Some(503));
//! ```

pub mod annotate;
pub mod config;
pub mod error;
pub mod handlers;
pub mod stack_trace;
pub mod wrap;

pub use annotate::{
    with_code, with_ignorable, with_message, with_param, with_params, with_tags, Annotator,
};
pub use error::*;
pub use handlers::on_error;
pub use stack_trace::{Frame, StackTrace};
pub use wrap::{unwrap, wrap, wrap_opt, Extract, Extracted};

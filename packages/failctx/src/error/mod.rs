//! Contextual error value
//!
//! Provides the error type itself with:
//! - Message stack preserving every layer of context
//! - Classification metadata (code, tags, params, ignorable flag)
//! - Copy-on-write sharing between copies
//! - Structured reporting through `log`

pub mod constructors;
pub mod display;
pub mod extensions;
pub mod logging;
pub mod macros;
pub mod types;

// Re-export all public types and traits
pub use constructors::MESSAGE_DELIMITER;
pub use extensions::{OptionExt, ResultExt};
pub use logging::{Reporter, Severity};
pub use types::{Code, Error, LeafError, Params, Result, Traced};

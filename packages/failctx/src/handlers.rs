//! Pass-through handlers for error processing
//!
//! Usable directly with `map_err`, e.g. `result.map_err(failctx::on_error)`.

use crate::error::Error;

/// Emit a structured tracing event for `err` and pass it through
///
/// Ignorable errors are emitted at `debug`, everything else at `warn`.
pub fn on_error(err: Error) -> Error {
    if err.is_ignorable() {
        tracing::debug!(
            code = ?err.code(),
            tags = ?err.tags(),
            "Ignorable error occurred: {err}"
        );
    } else {
        tracing::warn!(
            code = ?err.code(),
            tags = ?err.tags(),
            params = ?err.params(),
            frames = err.stack_trace().len(),
            "Error occurred: {err}"
        );
    }
    err
}

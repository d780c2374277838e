//! Display and trait implementations for Error

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.full_message();
        if message.is_empty() {
            // No context layered on yet: render the root text.
            write!(f, "{}", self.inner.cause)
        } else {
            f.write_str(&message)
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.cause.as_ref())
    }
}

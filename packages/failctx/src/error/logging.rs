//! Structured error reporting on top of `env_logger`
//!
//! Top-level handlers hand the final [`Error`] to [`Reporter::report`], which
//! logs its metadata and keeps ignorable errors out of the alerting level.

use super::types::Error;
use log::{error, info};
use sha2::{Digest, Sha256};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Outcome of reporting an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Logged at `error`, meant for administrators
    Alert,
    /// Ignorable, logged at `info` only
    Suppressed,
}

/// Error reporting through the `log` facade
pub struct Reporter;

impl Reporter {
    /// Initialize logging (call once at application startup)
    ///
    /// Levels come from the `RUST_LOG` environment variable:
    /// - `RUST_LOG=info` - reported errors, including ignorable ones
    /// - `RUST_LOG=error` - alerting errors only
    /// - `RUST_LOG=failctx=debug` - also capture configuration changes
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            info!("Structured error reporting initialized");
        });
    }

    /// Initialize logging for test environments
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log `err` with its metadata and classify it
    pub fn report(err: &Error) -> Severity {
        let fingerprint = Self::fingerprint(err);
        let code = err
            .code()
            .map_or_else(|| "-".to_string(), ToString::to_string);
        let tags = err
            .tags()
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let params = serde_json::Value::Object(
            err.params()
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        );

        if err.is_ignorable() {
            info!(
                "Ignorable error: {err} (code: {code}, tags: [{tags}], params: {params}, fingerprint: {fingerprint})"
            );
            Severity::Suppressed
        } else {
            error!(
                "Error: {err} (code: {code}, tags: [{tags}], params: {params}, fingerprint: {fingerprint}, frames: {})",
                err.stack_trace().len()
            );
            Severity::Alert
        }
    }

    /// Stable identity of an error for alert de-duplication
    ///
    /// SHA-256 over the root cause text and the origin frame; context and
    /// params are left out so repeated failures at one site group together.
    /// Returns `#` followed by the first 12 hex characters.
    #[must_use]
    pub fn fingerprint(err: &Error) -> String {
        let mut hasher = Sha256::new();
        hasher.update(err.cause().to_string().as_bytes());

        if let Some(origin) = err.stack_trace().frames().first() {
            hasher.update(origin.function().unwrap_or_default().as_bytes());
            hasher.update(origin.file().unwrap_or_default().as_bytes());
            hasher.update(origin.line().unwrap_or_default().to_le_bytes());
        }

        let hash = format!("{:x}", hasher.finalize());
        format!("#{}", &hash[..12])
    }
}

//! Runtime configuration for stack capture
//!
//! Capture is on by default. It can be switched off process-wide, either
//! through the `FAILCTX_STACK_TRACE` environment variable (read once, on
//! first use) or programmatically with [`set_stack_capture`]. Building
//! without the `full-backtrace` feature compiles capture out entirely.

use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicBool, Ordering};

/// Environment variable seeding the capture switch
pub const STACK_TRACE_ENV: &str = "FAILCTX_STACK_TRACE";

static STACK_CAPTURE: Lazy<AtomicBool> = Lazy::new(|| {
    let enabled = parse_switch(std::env::var(STACK_TRACE_ENV).ok().as_deref());
    log::debug!("Stack capture initialised from {STACK_TRACE_ENV} (enabled: {enabled})");
    AtomicBool::new(enabled)
});

fn parse_switch(value: Option<&str>) -> bool {
    let Some(value) = value else {
        return true;
    };
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "off" | "no"
    )
}

/// Enable or disable stack capture for the whole process
pub fn set_stack_capture(enabled: bool) {
    STACK_CAPTURE.store(enabled, Ordering::Relaxed);
    log::debug!("Stack capture set (enabled: {enabled})");
}

/// Whether new errors capture a stack trace
#[must_use]
pub fn stack_capture_enabled() -> bool {
    STACK_CAPTURE.load(Ordering::Relaxed)
}

// system-tests/src/logging.rs
// ============================================================================
// Module: System Test Logging
// Description: Tracing subscriber bootstrap for system tests.
// Purpose: Route library tracing events into the test runner output.
// Dependencies: tracing-subscriber
// ============================================================================

//! ## Overview
//! [`init_test_logging`] installs a fmt subscriber filtered by `RUST_LOG`
//! (default `patterns_contract=info`). Output goes through the test writer
//! so it is captured per test. Repeated calls are no-ops.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "patterns_contract=info";

/// Installs the test subscriber once per process.
pub fn init_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
    });
}

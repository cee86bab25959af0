// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for pattern directory system tests.
// Purpose: Provide the fixture catalog server and client bootstrap.
// Dependencies: system-tests, patterns-contract, tiny_http
// ============================================================================

//! ## Overview
//! Shared helpers for pattern directory system tests.
//! Invariants:
//! - Helpers only ever issue GET requests.
//! - Fixture servers bind to loopback on an ephemeral port.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod catalog_stub;

use patterns_contract::ContractConfig;
use patterns_contract::PatternsClient;
use system_tests::logging::init_test_logging;

/// Builds a client from the environment-backed configuration.
pub fn live_client() -> Result<PatternsClient, Box<dyn std::error::Error>> {
    init_test_logging();
    let config = ContractConfig::load()?;
    Ok(PatternsClient::new(&config)?)
}

// system-tests/src/lib.rs
// ============================================================================
// Module: Patterns Contract System Tests Library
// Description: Shared artifacts and logging for system test scenarios.
// Purpose: Provide common utilities for the contract system-test binaries.
// Dependencies: patterns-contract, serde, serde_jcs, tracing-subscriber
// ============================================================================

//! ## Overview
//! This crate hosts shared utilities used by the system-test binaries in
//! `system-tests/tests`: per-test artifact directories with summaries that
//! survive panics, and a once-per-process tracing subscriber.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod artifacts;
pub mod logging;

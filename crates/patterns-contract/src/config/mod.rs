// crates/patterns-contract/src/config/mod.rs
// ============================================================================
// Module: Contract Configuration
// Description: Centralized configuration for pattern directory contract checks.
// Purpose: Provide typed access to target endpoint and TLS settings.
// Dependencies: thiserror, url
// ============================================================================

//! ## Overview
//! Contract-check configuration is read from environment variables and mapped
//! into a small typed structure shared by the client and test harness.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::ConfigError;
pub use env::ContractConfig;
pub use env::ContractEnv;
pub use env::DEFAULT_BASE_URL;
pub use env::DEFAULT_HOST;
pub use env::read_env_strict;

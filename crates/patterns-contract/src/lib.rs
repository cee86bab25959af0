// crates/patterns-contract/src/lib.rs
// ============================================================================
// Module: Patterns Contract Library
// Description: Read-only contract checks for the pattern directory API.
// Purpose: Send GET requests to a pattern catalog and assert response shape.
// Dependencies: reqwest, rustls, serde, serde_json, thiserror, tracing, url
// ============================================================================

//! ## Overview
//! This crate checks the observable contract of the pattern directory API
//! (`/patterns/1.0`). It provides a GET-only [`PatternsClient`], typed
//! [`Pattern`] records, the response validator and term-slug extractor, and
//! the browse/search scenarios the system tests run.
//! Invariants:
//! - The client never issues a mutating HTTP verb.
//! - Certificate hostname relaxation is scoped to a single client instance.
//! - Assertion failures ([`ContractViolation`]) are distinct from transport
//!   failures ([`ClientError`]).

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
pub mod config;
pub mod pattern;
pub mod scenarios;
pub mod tls;
pub mod validate;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::ApiResponse;
pub use client::ClientError;
pub use client::PatternsClient;
pub use config::ConfigError;
pub use config::ContractConfig;
pub use config::ContractEnv;
pub use pattern::Pattern;
pub use pattern::PatternMeta;
pub use pattern::RenderedText;
pub use scenarios::BUTTONS_CATEGORY;
pub use scenarios::CategoryFixture;
pub use scenarios::SEARCH_CASES;
pub use scenarios::ScenarioError;
pub use scenarios::ScenarioReport;
pub use scenarios::SearchCase;
pub use scenarios::SearchOutcome;
pub use validate::ContractViolation;
pub use validate::ensure_has_pattern;
pub use validate::term_slugs;

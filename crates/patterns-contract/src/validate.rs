// crates/patterns-contract/src/validate.rs
// ============================================================================
// Module: Response Validation
// Description: Assertions over pattern directory responses.
// Purpose: Turn raw responses into typed patterns or a precise violation.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`ensure_has_pattern`] is the shared "response has at least one valid
//! pattern" check. [`term_slugs`] collects the category slugs of a result set.
//! Violations are grouped by kind: wrong status, undecodable body, missing or
//! mistyped fields, and unexpected content.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde_json::Value;
use thiserror::Error;

use crate::client::ApiResponse;
use crate::pattern::Pattern;

/// Status code every successful catalog response must carry.
pub const EXPECTED_STATUS: u16 = 200;

/// Literal body the API returns for an empty result set.
pub const EMPTY_RESULT_BODY: &str = "[]";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Contract assertion failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContractViolation {
    /// Response status was not the expected one.
    #[error("expected status {expected}, got {actual} from {url}")]
    UnexpectedStatus {
        /// Expected status code.
        expected: u16,
        /// Observed status code.
        actual: u16,
        /// Request URL.
        url: String,
    },
    /// Body is not a JSON array.
    #[error("response body is not a JSON array: {0}")]
    Decode(String),
    /// Body decoded to an empty array where patterns were required.
    #[error("response contains no patterns")]
    EmptyCatalog,
    /// A pattern is missing a required field or has the wrong type.
    #[error("pattern {index} has an invalid shape: {reason}")]
    Shape {
        /// Position of the offending pattern.
        index: usize,
        /// serde error describing the mismatch.
        reason: String,
    },
    /// Term-slug set did not satisfy the scenario's membership rule.
    #[error("unexpected category slugs {actual:?}: {expectation}")]
    Membership {
        /// Human-readable expectation.
        expectation: String,
        /// Observed slugs.
        actual: BTreeSet<String>,
    },
    /// A search result mentions the term in neither title nor description.
    #[error("pattern {index} ({title:?}) does not mention {term:?}")]
    SearchMismatch {
        /// Search term.
        term: String,
        /// Position of the offending pattern.
        index: usize,
        /// Rendered title of the offending pattern.
        title: String,
    },
    /// Body differed from the exact expected text.
    #[error("expected body {expected:?}, got {actual:?}")]
    UnexpectedBody {
        /// Expected literal body.
        expected: String,
        /// Observed body, truncated for reporting.
        actual: String,
    },
}

// ============================================================================
// SECTION: Checks
// ============================================================================

/// Fails unless `response` carries [`EXPECTED_STATUS`].
///
/// # Errors
///
/// Returns [`ContractViolation::UnexpectedStatus`] on mismatch.
pub fn ensure_status(response: &ApiResponse) -> Result<(), ContractViolation> {
    if response.status == EXPECTED_STATUS {
        return Ok(());
    }
    Err(ContractViolation::UnexpectedStatus {
        expected: EXPECTED_STATUS,
        actual: response.status,
        url: response.url.clone(),
    })
}

/// Validates that `response` holds at least one well-formed pattern and
/// returns every decoded pattern.
///
/// # Errors
///
/// Returns [`ContractViolation`] when the status is wrong, the body is not a
/// JSON array, the array is empty, or any element has an invalid shape.
pub fn ensure_has_pattern(response: &ApiResponse) -> Result<Vec<Pattern>, ContractViolation> {
    ensure_status(response)?;
    let items: Vec<Value> = serde_json::from_str(&response.body)
        .map_err(|err| ContractViolation::Decode(err.to_string()))?;
    if items.is_empty() {
        return Err(ContractViolation::EmptyCatalog);
    }
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|err| ContractViolation::Shape {
                index,
                reason: err.to_string(),
            })
        })
        .collect()
}

/// Fails unless the body is exactly [`EMPTY_RESULT_BODY`].
///
/// A decoded empty array is not enough; the serialized form is checked.
///
/// # Errors
///
/// Returns [`ContractViolation`] when the status or body differs.
pub fn ensure_empty_result(response: &ApiResponse) -> Result<(), ContractViolation> {
    ensure_status(response)?;
    if response.body == EMPTY_RESULT_BODY {
        return Ok(());
    }
    Err(ContractViolation::UnexpectedBody {
        expected: EMPTY_RESULT_BODY.to_string(),
        actual: truncate(&response.body, 256),
    })
}

/// Fails on the first pattern that mentions `term` in neither its title nor
/// its description.
///
/// # Errors
///
/// Returns [`ContractViolation::SearchMismatch`] naming that pattern.
pub fn ensure_all_mention(patterns: &[Pattern], term: &str) -> Result<(), ContractViolation> {
    match patterns.iter().enumerate().find(|(_, pattern)| !pattern.mentions(term)) {
        None => Ok(()),
        Some((index, pattern)) => Err(ContractViolation::SearchMismatch {
            term: term.to_string(),
            index,
            title: pattern.title().to_string(),
        }),
    }
}

/// Returns the deduplicated union of category slugs across `patterns`.
#[must_use]
pub fn term_slugs(patterns: &[Pattern]) -> BTreeSet<String> {
    patterns
        .iter()
        .flat_map(|pattern| pattern.meta.wpop_category_slugs.iter().cloned())
        .collect()
}

/// Truncates `value` to at most `max_chars` characters.
fn truncate(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &value[..cut]),
        None => value.to_string(),
    }
}

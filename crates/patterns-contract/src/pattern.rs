// crates/patterns-contract/src/pattern.rs
// ============================================================================
// Module: Pattern Records
// Description: Typed view of pattern objects returned by the catalog API.
// Purpose: Decode only the fields the contract checks rely on.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`Pattern`] mirrors the subset of a pattern object the contract depends on.
//! Required fields fail decoding with a precise serde error when missing or
//! mistyped. `wpop_description` is the only optional field. Unknown fields
//! are ignored so additions on the server side do not break the checks.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// One pattern record from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    /// Rendered title.
    pub title: RenderedText,
    /// Pattern metadata.
    pub meta: PatternMeta,
}

/// A field carrying server-rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedText {
    /// Rendered text value.
    pub rendered: String,
}

/// Pattern metadata fields used by the contract checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMeta {
    /// Preview viewport width in pixels.
    pub wpop_viewport_width: i64,
    /// Category term slugs; order is not significant.
    pub wpop_category_slugs: Vec<String>,
    /// Keyword term slugs.
    pub wpop_keyword_slugs: Vec<String>,
    /// Optional free-text description.
    #[serde(default)]
    pub wpop_description: Option<String>,
}

impl Pattern {
    /// Returns the rendered title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title.rendered
    }

    /// Returns the description, or an empty string when absent.
    #[must_use]
    pub fn description(&self) -> &str {
        self.meta.wpop_description.as_deref().unwrap_or_default()
    }

    /// Returns true when `term` appears in the title or description,
    /// ignoring case.
    #[must_use]
    pub fn mentions(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.title().to_lowercase().contains(&needle)
            || self.description().to_lowercase().contains(&needle)
    }
}

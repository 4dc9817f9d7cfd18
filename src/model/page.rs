//! Page-level types.

use super::Classification;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One page of extracted text as handed over by the extraction layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInput {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Extracted text of the page (may be empty)
    #[serde(default)]
    pub text: String,

    /// Whether the text came from a fallback re-extraction (OCR) pass
    #[serde(default, alias = "isOcr")]
    pub is_extraction_source: bool,
}

impl PageInput {
    /// Create a page from primary extraction.
    pub fn new(page_number: u32, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
            is_extraction_source: false,
        }
    }

    /// Create a page produced by a re-extraction pass.
    pub fn reextracted(page_number: u32, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
            is_extraction_source: true,
        }
    }
}

/// Analysis state of a single page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRecord {
    /// Page number (1-indexed), copied from the input
    pub page_number: u32,

    /// Page text as extracted, before normalization
    pub raw_text: String,

    /// Literal text of every lexicon entry found on the page
    pub matched_terms: BTreeSet<String>,

    /// Number of distinct lexicon entries found
    pub unique_term_count: usize,

    /// Whether the text came from a re-extraction pass
    pub is_extraction_source: bool,

    /// Z-score of `unique_term_count` within the document
    pub z_score: f64,

    /// Whether `z_score` exceeds the outlier threshold
    pub is_outlier: bool,

    /// Page label
    pub classification: Classification,

    /// Whether the page has at least the minimum number of terms
    pub is_relevant: bool,
}

impl PageRecord {
    /// Create a record for a page that has been term-matched but not yet
    /// scored or classified.
    pub fn new(
        page_number: u32,
        raw_text: String,
        matched_terms: BTreeSet<String>,
        is_extraction_source: bool,
        min_financial_terms: usize,
    ) -> Self {
        let unique_term_count = matched_terms.len();
        Self {
            page_number,
            raw_text,
            matched_terms,
            unique_term_count,
            is_extraction_source,
            z_score: 0.0,
            is_outlier: false,
            classification: Classification::NotRelevant,
            is_relevant: unique_term_count >= min_financial_terms,
        }
    }

    /// Check if this page is the chosen results page.
    pub fn is_results_page(&self) -> bool {
        self.classification == Classification::ResultsPage
    }

    /// Check if the page has at least `min` distinct terms.
    pub fn has_terms(&self, min: usize) -> bool {
        self.unique_term_count >= min
    }
}

//! Re-extraction gate.
//!
//! Decides whether the current text extraction is good enough or the
//! document has to go through a (slower, more expensive) OCR pass. Checks run
//! in a fixed order and stop at the first failure.

use super::options::AnalysisOptions;
use crate::model::PageRecord;
use serde::Serialize;
use std::fmt;

/// Outcome of the gate checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateVerdict {
    /// No page has enough financial terms
    InsufficientTerms,
    /// Classification did not produce a results page
    NoResultsPage,
    /// The results page has too few financial terms
    SparseResultsPage,
    /// Extraction can be trusted
    Passed,
}

impl GateVerdict {
    /// Whether the document must be re-extracted.
    pub fn needs_reextraction(&self) -> bool {
        !matches!(self, GateVerdict::Passed)
    }

    /// Human-readable message for this verdict.
    pub fn message(&self) -> &'static str {
        match self {
            GateVerdict::InsufficientTerms => {
                "No page has enough financial terms, needs re-extraction"
            }
            GateVerdict::NoResultsPage => "No results page identified, needs re-extraction",
            GateVerdict::SparseResultsPage => {
                "Results page has too few financial terms, needs re-extraction"
            }
            GateVerdict::Passed => "Results page identified",
        }
    }
}

impl fmt::Display for GateVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Short-circuiting checklist run around classification.
#[derive(Debug, Clone)]
pub struct ExtractionGate {
    min_financial_terms: usize,
    results_page_min_terms: usize,
}

impl ExtractionGate {
    /// Create a gate using the thresholds from `options`.
    pub fn new(options: &AnalysisOptions) -> Self {
        Self {
            min_financial_terms: options.min_financial_terms,
            results_page_min_terms: options.results_page_min_terms,
        }
    }

    /// Check run before classification.
    ///
    /// Returns `Some(verdict)` if the document fails and classification
    /// should be skipped.
    pub fn check_terms(&self, pages: &[PageRecord]) -> Option<GateVerdict> {
        if pages.iter().any(|p| p.has_terms(self.min_financial_terms)) {
            None
        } else {
            log::info!(
                "Re-extraction required: no page has {} or more financial terms",
                self.min_financial_terms
            );
            Some(GateVerdict::InsufficientTerms)
        }
    }

    /// Checks run after classification.
    pub fn check_results(&self, pages: &[PageRecord]) -> GateVerdict {
        let mut results = pages.iter().filter(|p| p.is_results_page()).peekable();
        if results.peek().is_none() {
            log::info!("Re-extraction required: no results page found");
            return GateVerdict::NoResultsPage;
        }

        if !results.any(|p| p.has_terms(self.results_page_min_terms)) {
            log::info!(
                "Re-extraction required: results page has fewer than {} terms",
                self.results_page_min_terms
            );
            return GateVerdict::SparseResultsPage;
        }

        GateVerdict::Passed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Classification;
    use std::collections::BTreeSet;

    fn page(number: u32, count: usize, classification: Classification) -> PageRecord {
        let terms: BTreeSet<String> = (0..count).map(|i| format!("term{}", i)).collect();
        let mut record = PageRecord::new(number, String::new(), terms, false, 7);
        record.classification = classification;
        record
    }

    fn gate() -> ExtractionGate {
        ExtractionGate::new(&AnalysisOptions::default())
    }

    #[test]
    fn test_insufficient_terms() {
        let pages = vec![
            page(1, 6, Classification::NotRelevant),
            page(2, 3, Classification::NotRelevant),
        ];
        assert_eq!(gate().check_terms(&pages), Some(GateVerdict::InsufficientTerms));
        assert_eq!(gate().check_terms(&[]), Some(GateVerdict::InsufficientTerms));
    }

    #[test]
    fn test_enough_terms() {
        let pages = vec![page(1, 7, Classification::NotRelevant)];
        assert_eq!(gate().check_terms(&pages), None);
    }

    #[test]
    fn test_no_results_page() {
        let pages = vec![
            page(1, 12, Classification::MoreResultsPages),
            page(2, 12, Classification::MoreResultsPages),
        ];
        assert_eq!(gate().check_results(&pages), GateVerdict::NoResultsPage);
    }

    #[test]
    fn test_sparse_results_page() {
        let pages = vec![page(1, 9, Classification::ResultsPage)];
        assert_eq!(gate().check_results(&pages), GateVerdict::SparseResultsPage);
    }

    #[test]
    fn test_passed() {
        let pages = vec![
            page(1, 2, Classification::NotRelevant),
            page(2, 10, Classification::ResultsPage),
        ];
        let verdict = gate().check_results(&pages);
        assert_eq!(verdict, GateVerdict::Passed);
        assert!(!verdict.needs_reextraction());
    }

    #[test]
    fn test_verdict_messages_are_distinct() {
        let verdicts = [
            GateVerdict::InsufficientTerms,
            GateVerdict::NoResultsPage,
            GateVerdict::SparseResultsPage,
            GateVerdict::Passed,
        ];
        let messages: BTreeSet<&str> = verdicts.iter().map(|v| v.message()).collect();
        assert_eq!(messages.len(), verdicts.len());
        assert!(verdicts[..3].iter().all(|v| v.needs_reextraction()));
    }
}

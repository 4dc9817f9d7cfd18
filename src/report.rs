//! Analysis report and JSON rendering.

use crate::analysis::{DocumentStatistics, GateVerdict};
use crate::error::Result;
use crate::layout::ResultLayoutConfig;
use crate::model::PageRecord;
use serde::Serialize;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Result of analyzing one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Whether the document has to be re-extracted
    pub needs_reextraction: bool,

    /// Human-readable gate message
    pub message: String,

    /// Gate outcome
    pub verdict: GateVerdict,

    /// Layout the pages were classified under
    pub layout: ResultLayoutConfig,

    /// Term count statistics
    pub statistics: DocumentStatistics,

    /// Labeled pages, in input order
    pub pages: Vec<PageRecord>,
}

impl AnalysisReport {
    /// Create a report from the gate verdict.
    pub fn new(
        verdict: GateVerdict,
        layout: ResultLayoutConfig,
        statistics: DocumentStatistics,
        pages: Vec<PageRecord>,
    ) -> Self {
        Self {
            needs_reextraction: verdict.needs_reextraction(),
            message: verdict.message().to_string(),
            verdict,
            layout,
            statistics,
            pages,
        }
    }

    /// Pages labeled as the results page.
    pub fn results_pages(&self) -> impl Iterator<Item = &PageRecord> {
        self.pages.iter().filter(|p| p.is_results_page())
    }

    /// Page numbers of the results pages.
    pub fn results_page_numbers(&self) -> Vec<u32> {
        self.results_pages().map(|p| p.page_number).collect()
    }

    /// The chosen results page, if the gate passed.
    pub fn results_page(&self) -> Option<&PageRecord> {
        if self.needs_reextraction {
            return None;
        }
        self.results_pages().next()
    }

    /// Whether any page came from a re-extraction pass.
    pub fn used_extraction_source(&self) -> bool {
        self.pages.iter().any(|p| p.is_extraction_source)
    }

    /// Number of pages analyzed.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Serialize the report to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        let json = match format {
            JsonFormat::Pretty => serde_json::to_string_pretty(self)?,
            JsonFormat::Compact => serde_json::to_string(self)?,
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Classification;
    use std::collections::BTreeSet;

    fn report(verdict: GateVerdict) -> AnalysisReport {
        let terms: BTreeSet<String> = ["Diluted".to_string()].into_iter().collect();
        let mut chosen = PageRecord::new(2, "Diluted".to_string(), terms, true, 1);
        chosen.classification = Classification::ResultsPage;
        let other = PageRecord::new(1, String::new(), BTreeSet::new(), false, 1);
        AnalysisReport::new(
            verdict,
            ResultLayoutConfig::single_page(),
            DocumentStatistics::from_counts(&[0, 1]),
            vec![other, chosen],
        )
    }

    #[test]
    fn test_report_from_verdict() {
        let report = report(GateVerdict::Passed);
        assert!(!report.needs_reextraction);
        assert_eq!(report.message, GateVerdict::Passed.message());
        assert_eq!(report.results_page_numbers(), vec![2]);
        assert_eq!(report.results_page().map(|p| p.page_number), Some(2));
        assert!(report.used_extraction_source());
        assert_eq!(report.page_count(), 2);
    }

    #[test]
    fn test_results_page_hidden_when_gate_fails() {
        let report = report(GateVerdict::SparseResultsPage);
        assert!(report.needs_reextraction);
        assert!(report.results_page().is_none());
        assert_eq!(report.results_page_numbers(), vec![2]);
    }

    #[test]
    fn test_to_json_pretty() {
        let json = report(GateVerdict::Passed).to_json(JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"needs_reextraction\": false"));
        assert!(json.contains("\"classification\": \"Results Page\""));
        assert!(json.contains("\"verdict\": \"passed\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = report(GateVerdict::NoResultsPage)
            .to_json(JsonFormat::Compact)
            .unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"layout\":{\"layout\":\"single_page\",\"variant\":null}"));
    }
}

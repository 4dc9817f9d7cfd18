//! # resultpage
//!
//! Locate the quarterly results page in the extracted text of a financial
//! report, and decide whether the extraction is good enough or the document
//! needs a re-extraction (OCR) pass.
//!
//! ## Quick Start
//!
//! ```
//! use resultpage::{analyze, PageInput, ResultLayoutConfig};
//!
//! let pages = vec![
//!     PageInput::new(1, "Notice of board meeting"),
//!     PageInput::new(2, "Revenue from operations, Other Income, Total Income, Expense, \
//!                        Finance Costs, Depreciation, Profit before tax, Tax Expense, \
//!                        Current Tax, Deferred Tax, Diluted (Rs. in Lakhs)"),
//!     PageInput::new(3, "Auditor's report"),
//! ];
//!
//! let report = analyze(&pages, ResultLayoutConfig::single_page());
//! assert!(!report.needs_reextraction);
//! assert_eq!(report.results_page_numbers(), vec![2]);
//! ```
//!
//! ## Pipeline
//!
//! 1. **Term matching**: every page is scanned against a fixed lexicon of
//!    income statement terms.
//! 2. **Statistics**: term counts are turned into z-scores relative to the
//!    document's own distribution.
//! 3. **Gate, first check**: if no page has enough terms, stop.
//! 4. **Classification**: outlier pages are labeled according to the result
//!    layout (single page or multi page with an accounting scope).
//! 5. **Gate, final checks**: a dense results page must have been chosen.
//!
//! The engine is pure: no I/O, no shared state. The same input always gives
//! the same report.

pub mod analysis;
pub mod error;
pub mod fallback;
pub mod input;
pub mod layout;
pub mod model;
pub mod report;

// Re-export commonly used types
pub use analysis::{
    AnalysisOptions, DocumentStatistics, ExtractionGate, GateVerdict, PageClassifier, TermMatcher,
};
pub use error::{Error, Result};
pub use fallback::{FallbackExtractor, FileExtractor, StaticExtractor};
pub use input::{load_pages, parse_pages, read_pages};
pub use layout::{LayoutKind, ResultLayoutConfig, ScopeVariant};
pub use model::{Classification, PageInput, PageRecord};
pub use report::{AnalysisReport, JsonFormat};

/// Analyze pages with default thresholds.
///
/// # Arguments
///
/// * `pages` - Page texts in document order
/// * `layout` - Expected result layout
pub fn analyze(pages: &[PageInput], layout: ResultLayoutConfig) -> AnalysisReport {
    ResultPageFinder::new().with_layout(layout).analyze(pages)
}

/// Analyze pages with default thresholds and a JSON layout hint.
///
/// A missing hint selects the single page layout; a malformed one is an
/// error.
///
/// # Example
///
/// ```
/// use resultpage::{analyze_with_hint, PageInput};
///
/// let pages = vec![PageInput::new(1, "")];
/// let report = analyze_with_hint(&pages, None).unwrap();
/// assert!(report.needs_reextraction);
///
/// assert!(analyze_with_hint(&pages, Some("{oops")).is_err());
/// ```
pub fn analyze_with_hint(pages: &[PageInput], hint: Option<&str>) -> Result<AnalysisReport> {
    Ok(ResultPageFinder::new().with_hint(hint)?.analyze(pages))
}

/// Builder and runner for results page analysis.
///
/// # Example
///
/// ```
/// use resultpage::{AnalysisOptions, PageInput, ResultPageFinder, ScopeVariant, ResultLayoutConfig};
///
/// let finder = ResultPageFinder::new()
///     .with_options(AnalysisOptions::new().with_zscore_threshold(0.8))
///     .with_layout(ResultLayoutConfig::multi_page(ScopeVariant::Standalone));
///
/// let report = finder.analyze(&[PageInput::new(1, "Standalone results")]);
/// assert_eq!(report.page_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ResultPageFinder {
    options: AnalysisOptions,
    matcher: TermMatcher,
    classifier: PageClassifier,
}

impl ResultPageFinder {
    /// Create a finder with default thresholds and the single page layout.
    pub fn new() -> Self {
        let options = AnalysisOptions::default();
        Self {
            classifier: PageClassifier::new(options.clone(), ResultLayoutConfig::default()),
            matcher: TermMatcher::new(),
            options,
        }
    }

    /// Set analysis thresholds.
    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.classifier = PageClassifier::new(options.clone(), self.classifier.layout());
        self.options = options;
        self
    }

    /// Set the expected result layout.
    pub fn with_layout(mut self, layout: ResultLayoutConfig) -> Self {
        self.classifier = PageClassifier::new(self.options.clone(), layout);
        self
    }

    /// Set the expected result layout from a JSON hint.
    pub fn with_hint(self, hint: Option<&str>) -> Result<Self> {
        let layout = ResultLayoutConfig::from_hint(hint)?;
        Ok(self.with_layout(layout))
    }

    /// Use a custom term matcher.
    pub fn with_matcher(mut self, matcher: TermMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Analysis thresholds in use.
    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Result layout in use.
    pub fn layout(&self) -> ResultLayoutConfig {
        self.classifier.layout()
    }

    /// Run one analysis pass.
    pub fn analyze(&self, pages: &[PageInput]) -> AnalysisReport {
        let layout = self.layout();
        let mut records: Vec<PageRecord> = pages
            .iter()
            .map(|page| self.matcher.analyze_page(page, self.options.min_financial_terms))
            .collect();

        let counts: Vec<usize> = records.iter().map(|r| r.unique_term_count).collect();
        let statistics = DocumentStatistics::from_counts(&counts);
        log::debug!(
            "Analyzing {} pages ({}): mean {:.2}, std dev {:.2}",
            records.len(),
            layout,
            statistics.mean,
            statistics.std_dev
        );

        let gate = ExtractionGate::new(&self.options);
        let verdict = match gate.check_terms(&records) {
            Some(verdict) => {
                self.classifier.score(&mut records, &statistics);
                verdict
            }
            None => {
                self.classifier.classify(&mut records, &statistics);
                gate.check_results(&records)
            }
        };

        log::info!("{}", verdict);
        AnalysisReport::new(verdict, layout, statistics, records)
    }

    /// Run the primary pass and, if the gate rejects it, a second pass over
    /// pages from `extractor`.
    ///
    /// Re-extracted pages are marked with `is_extraction_source`. The second
    /// pass is independent of the first: it sees only the new pages.
    pub fn analyze_with_fallback(
        &self,
        pages: &[PageInput],
        extractor: &dyn FallbackExtractor,
    ) -> Result<PassOutcome> {
        let primary = self.analyze(pages);
        if !primary.needs_reextraction {
            return Ok(PassOutcome {
                primary_verdict: primary.verdict,
                report: primary,
                reextracted_with: None,
            });
        }

        log::info!(
            "Primary extraction rejected ({:?}), re-extracting with {}",
            primary.verdict,
            extractor.name()
        );
        let mut reextracted = extractor.extract()?;
        input::validate_pages(&reextracted)?;
        for page in &mut reextracted {
            page.is_extraction_source = true;
        }

        Ok(PassOutcome {
            primary_verdict: primary.verdict,
            report: self.analyze(&reextracted),
            reextracted_with: Some(extractor.name().to_string()),
        })
    }
}

impl Default for ResultPageFinder {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a primary pass and an optional re-extraction pass.
#[derive(Debug, Clone)]
pub struct PassOutcome {
    /// Report of the last pass that ran
    pub report: AnalysisReport,

    /// Gate verdict of the primary pass
    pub primary_verdict: GateVerdict,

    /// Name of the extractor used for the second pass, if one ran
    pub reextracted_with: Option<String>,
}

impl PassOutcome {
    /// Whether a re-extraction pass ran.
    pub fn reextracted(&self) -> bool {
        self.reextracted_with.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_TEXT: &str = "Revenue from operations\nOther Income\nTotal Income\nExpense\n\
        Finance Costs\nDepreciation\nProfit before tax\nTax Expense\nCurrent Tax\n\
        Deferred Tax\nDiluted\n(Rs. in Lakhs)";

    fn document() -> Vec<PageInput> {
        vec![
            PageInput::new(1, "Cover letter"),
            PageInput::new(2, "Board meeting outcome"),
            PageInput::new(3, RESULTS_TEXT),
            PageInput::new(4, "Auditor's report"),
        ]
    }

    // ==================== Builder Tests ====================

    #[test]
    fn test_finder_defaults() {
        let finder = ResultPageFinder::default();
        assert_eq!(finder.layout(), ResultLayoutConfig::single_page());
        assert_eq!(finder.options(), &AnalysisOptions::default());
    }

    #[test]
    fn test_finder_with_options_keeps_layout() {
        let layout = ResultLayoutConfig::multi_page(ScopeVariant::Standalone);
        let finder = ResultPageFinder::new()
            .with_layout(layout)
            .with_options(AnalysisOptions::new().with_min_financial_terms(3));
        assert_eq!(finder.layout(), layout);
        assert_eq!(finder.options().min_financial_terms, 3);
    }

    #[test]
    fn test_finder_with_hint() {
        let finder = ResultPageFinder::new()
            .with_hint(Some(r#"{"resultPageConfig": {"type": "Multi"}}"#))
            .unwrap();
        assert!(finder.layout().is_multi_page());

        assert!(ResultPageFinder::new().with_hint(Some("nope")).is_err());
    }

    // ==================== Analysis Tests ====================

    #[test]
    fn test_analyze_finds_results_page() {
        let report = analyze(&document(), ResultLayoutConfig::single_page());
        assert_eq!(report.verdict, GateVerdict::Passed);
        assert_eq!(report.results_page_numbers(), vec![3]);
        assert_eq!(report.pages[2].unique_term_count, 13);
    }

    #[test]
    fn test_analyze_empty_document() {
        let report = analyze(&[], ResultLayoutConfig::single_page());
        assert!(report.needs_reextraction);
        assert_eq!(report.verdict, GateVerdict::InsufficientTerms);
        assert!(report.pages.is_empty());
        assert!(report.statistics.is_empty());
    }

    #[test]
    fn test_insufficient_terms_skips_classification() {
        let pages = vec![
            PageInput::new(1, "Diluted"),
            PageInput::new(2, ""),
            PageInput::new(3, ""),
        ];
        let report = analyze(&pages, ResultLayoutConfig::single_page());
        assert_eq!(report.verdict, GateVerdict::InsufficientTerms);
        assert_eq!(report.statistics.len(), 3);
        assert!(report
            .pages
            .iter()
            .all(|p| p.classification == Classification::NotRelevant));
    }

    #[test]
    fn test_custom_matcher() {
        let matcher = TermMatcher::with_lexicon(&[r"\bEBITDA\b", r"\bMargin\b"]).unwrap();
        let finder = ResultPageFinder::new()
            .with_matcher(matcher)
            .with_options(
                AnalysisOptions::new()
                    .with_min_financial_terms(2)
                    .with_results_page_min_terms(2),
            );
        let pages = vec![
            PageInput::new(1, "intro"),
            PageInput::new(2, "EBITDA Margin"),
            PageInput::new(3, "outro"),
        ];
        let report = finder.analyze(&pages);
        assert_eq!(report.results_page_numbers(), vec![2]);
        assert!(!report.needs_reextraction);
    }

    // ==================== Fallback Tests ====================

    #[test]
    fn test_fallback_not_used_when_primary_passes() {
        let extractor = StaticExtractor::new("ocr", Vec::new());
        let outcome = ResultPageFinder::new()
            .analyze_with_fallback(&document(), &extractor)
            .unwrap();
        assert!(!outcome.reextracted());
        assert_eq!(outcome.primary_verdict, GateVerdict::Passed);
        assert!(!outcome.report.used_extraction_source());
    }

    #[test]
    fn test_fallback_used_when_primary_fails() {
        let scanned = vec![
            PageInput::new(1, ""),
            PageInput::new(2, ""),
            PageInput::new(3, ""),
            PageInput::new(4, ""),
        ];
        let extractor = StaticExtractor::new("ocr", document());
        let outcome = ResultPageFinder::new()
            .analyze_with_fallback(&scanned, &extractor)
            .unwrap();

        assert!(outcome.reextracted());
        assert_eq!(outcome.reextracted_with.as_deref(), Some("ocr"));
        assert_eq!(outcome.primary_verdict, GateVerdict::InsufficientTerms);
        assert_eq!(outcome.report.results_page_numbers(), vec![3]);
        assert!(outcome.report.pages.iter().all(|p| p.is_extraction_source));
    }

    #[test]
    fn test_fallback_rejects_invalid_pages() {
        let extractor = StaticExtractor::new("ocr", vec![PageInput::new(0, "")]);
        let result = ResultPageFinder::new().analyze_with_fallback(&[], &extractor);
        assert!(matches!(result, Err(Error::InvalidPageNumber { .. })));
    }
}

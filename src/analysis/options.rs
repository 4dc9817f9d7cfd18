//! Analysis thresholds.

use crate::error::{Error, Result};

/// Heuristic thresholds used by the classifier and the extraction gate.
///
/// The reconciliation and duplicate thresholds (10, 14, 30%) are empirical
/// and unverified outside the report layouts they were tuned on.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    /// Minimum distinct lexicon terms for a page to count as relevant
    pub min_financial_terms: usize,

    /// Z-score above which a page is an outlier
    pub zscore_threshold: f64,

    /// Gap (percent of the top z-score) separating a clear winner from the
    /// runner-up in the single page layout
    pub gap_threshold_percent: f64,

    /// Terms the partner page needs in two-outlier reconciliation
    pub reconcile_partner_min_terms: usize,

    /// Terms the top page needs to survive duplicate suppression
    pub duplicate_min_terms: usize,

    /// Z-score gap (percent of the runner-up) the top page needs to survive
    /// duplicate suppression
    pub duplicate_gap_percent: f64,

    /// Terms the results page needs to pass the extraction gate
    pub results_page_min_terms: usize,
}

impl AnalysisOptions {
    /// Create new analysis options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum number of financial terms.
    pub fn with_min_financial_terms(mut self, min: usize) -> Self {
        self.min_financial_terms = min;
        self
    }

    /// Set the outlier z-score threshold.
    pub fn with_zscore_threshold(mut self, threshold: f64) -> Self {
        self.zscore_threshold = threshold;
        self
    }

    /// Set the single page gap threshold in percent.
    pub fn with_gap_threshold_percent(mut self, percent: f64) -> Self {
        self.gap_threshold_percent = percent;
        self
    }

    /// Set the partner term minimum for two-outlier reconciliation.
    pub fn with_reconcile_partner_min_terms(mut self, min: usize) -> Self {
        self.reconcile_partner_min_terms = min;
        self
    }

    /// Set the term minimum for surviving duplicate suppression.
    pub fn with_duplicate_min_terms(mut self, min: usize) -> Self {
        self.duplicate_min_terms = min;
        self
    }

    /// Set the z-score gap for surviving duplicate suppression.
    pub fn with_duplicate_gap_percent(mut self, percent: f64) -> Self {
        self.duplicate_gap_percent = percent;
        self
    }

    /// Set the term minimum the results page needs to pass the gate.
    pub fn with_results_page_min_terms(mut self, min: usize) -> Self {
        self.results_page_min_terms = min;
        self
    }

    /// Reject thresholds that would make every comparison meaningless.
    pub fn validate(&self) -> Result<()> {
        let floats = [
            ("zscore_threshold", self.zscore_threshold),
            ("gap_threshold_percent", self.gap_threshold_percent),
            ("duplicate_gap_percent", self.duplicate_gap_percent),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(Error::InvalidOption(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            min_financial_terms: 7,
            zscore_threshold: 1.0,
            gap_threshold_percent: 30.0,
            reconcile_partner_min_terms: 10,
            duplicate_min_terms: 14,
            duplicate_gap_percent: 30.0,
            results_page_min_terms: 10,
        }
    }
}

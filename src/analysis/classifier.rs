//! Results page classification.
//!
//! Pages whose term count stands out from the rest of the document
//! (z-score above the threshold) are candidates. How candidates become the
//! results page depends on the layout:
//!
//! - **Single page**: the top candidate wins if it clearly leads the
//!   runner-up; otherwise all dense candidates are left as
//!   `MoreResultsPages` and none is chosen.
//! - **Multi page**: dense candidates are labeled by their scope keywords
//!   and the one carrying the expected scope is chosen.
//!
//! Two reconciliation passes follow: a pair of candidates where one is only
//! a scope heading promotes its partner, and several chosen pages are
//! reduced to one clear winner or all demoted.

use super::options::AnalysisOptions;
use super::scope::ScopeDetector;
use super::stats::DocumentStatistics;
use super::terms::prepare_text;
use crate::layout::{ResultLayoutConfig, ScopeVariant};
use crate::model::{Classification, PageRecord};

/// Assigns a [`Classification`] to every page of a document.
#[derive(Debug, Clone)]
pub struct PageClassifier {
    options: AnalysisOptions,
    layout: ResultLayoutConfig,
    detector: ScopeDetector,
}

impl PageClassifier {
    /// Create a classifier for the given thresholds and layout.
    pub fn new(options: AnalysisOptions, layout: ResultLayoutConfig) -> Self {
        Self {
            options,
            layout,
            detector: ScopeDetector::new(),
        }
    }

    /// Layout this classifier applies.
    pub fn layout(&self) -> ResultLayoutConfig {
        self.layout
    }

    /// Classify pages in place.
    ///
    /// `stats` must have been computed over the same pages, in the same
    /// order. Every page ends up with exactly one label and at most one page
    /// is labeled `ResultsPage`.
    pub fn classify(&self, pages: &mut [PageRecord], stats: &DocumentStatistics) {
        self.score(pages, stats);

        let outliers = ranked_outliers(pages);
        if outliers.is_empty() {
            log::debug!("No page above z-score {}", self.options.zscore_threshold);
            return;
        }
        log::debug!(
            "{} outlier page(s): {:?}",
            outliers.len(),
            outliers
                .iter()
                .map(|&i| pages[i].page_number)
                .collect::<Vec<_>>()
        );

        match self.layout.expected_scope() {
            None => self.classify_single_page(pages, &outliers),
            Some(scope) => self.classify_multi_page(pages, &outliers, scope),
        }

        if let [first, second] = outliers[..] {
            self.reconcile_pair(pages, first, second);
        }

        self.suppress_duplicates(pages);
    }

    /// Copy z-scores onto the pages, flag outliers and reset every label to
    /// `NotRelevant`.
    pub fn score(&self, pages: &mut [PageRecord], stats: &DocumentStatistics) {
        debug_assert_eq!(pages.len(), stats.len());

        for (page, &z) in pages.iter_mut().zip(&stats.z_scores) {
            page.z_score = z;
            page.is_outlier = z > self.options.zscore_threshold;
            page.classification = Classification::NotRelevant;
        }
    }

    fn classify_single_page(&self, pages: &mut [PageRecord], outliers: &[usize]) {
        let min_terms = self.options.min_financial_terms;

        let Some((&top, rest)) = outliers.split_first() else {
            return;
        };
        let Some(&second) = rest.first() else {
            pages[top].classification = self.results_or_relevant(&pages[top]);
            return;
        };

        let gap = gap_percent(pages[top].z_score, pages[second].z_score);
        log::debug!(
            "Z-score gap between pages {} and {}: {:.1}%",
            pages[top].page_number,
            pages[second].page_number,
            gap
        );

        if gap > self.options.gap_threshold_percent {
            pages[top].classification = self.results_or_relevant(&pages[top]);
            for &i in rest {
                pages[i].classification = Classification::RelevantFinancialContent;
            }
        } else {
            for &i in outliers {
                pages[i].classification = if pages[i].has_terms(min_terms) {
                    Classification::MoreResultsPages
                } else {
                    Classification::RelevantFinancialContent
                };
            }
        }
    }

    fn classify_multi_page(&self, pages: &mut [PageRecord], outliers: &[usize], scope: ScopeVariant) {
        for &i in outliers {
            let page = &mut pages[i];
            if !page.has_terms(self.options.min_financial_terms) {
                page.classification = Classification::RelevantFinancialContent;
                continue;
            }

            let label = self.detector.classify(&prepare_text(&page.raw_text));
            log::info!("Page {} scope label: {}", page.page_number, label);

            page.classification = if label.bears_scope(scope) {
                Classification::ResultsPage
            } else {
                label
            };
        }
    }

    /// Promote the partner of a scope heading page when exactly two
    /// candidates exist and neither was chosen.
    fn reconcile_pair(&self, pages: &mut [PageRecord], first: usize, second: usize) {
        if pages[first].is_results_page() || pages[second].is_results_page() {
            return;
        }

        let min_terms = self.options.reconcile_partner_min_terms;
        let promoted = if pages[first].classification.bears_any_scope()
            && pages[second].has_terms(min_terms)
        {
            Some(second)
        } else if pages[second].classification.bears_any_scope()
            && pages[first].has_terms(min_terms)
        {
            Some(first)
        } else {
            None
        };

        if let Some(i) = promoted {
            pages[i].classification = Classification::ResultsPage;
            log::info!(
                "Reconciled candidate pair: page {} is now {}, page {} is now {}",
                pages[first].page_number,
                pages[first].classification,
                pages[second].page_number,
                pages[second].classification
            );
        }
    }

    /// Keep a single results page, or none if the winner is not clear.
    fn suppress_duplicates(&self, pages: &mut [PageRecord]) {
        let mut chosen: Vec<usize> = (0..pages.len())
            .filter(|&i| pages[i].is_results_page())
            .collect();
        if chosen.len() < 2 {
            return;
        }
        chosen.sort_by(|&a, &b| pages[b].z_score.total_cmp(&pages[a].z_score));

        let top = &pages[chosen[0]];
        let runner_up = &pages[chosen[1]];
        let dense = top.has_terms(self.options.duplicate_min_terms);
        let separated = runner_up.z_score != 0.0
            && (top.z_score - runner_up.z_score) / runner_up.z_score.abs() * 100.0
                >= self.options.duplicate_gap_percent;

        let demoted = if dense && separated {
            &chosen[1..]
        } else {
            &chosen[..]
        };
        for &i in demoted {
            pages[i].classification = Classification::DuplicateResultsPage;
            log::info!("Reclassified page {} as {}", pages[i].page_number, pages[i].classification);
        }
    }

    fn results_or_relevant(&self, page: &PageRecord) -> Classification {
        if page.has_terms(self.options.min_financial_terms) {
            Classification::ResultsPage
        } else {
            Classification::RelevantFinancialContent
        }
    }
}

/// Indices of outlier pages, highest z-score first. Ties keep page order.
fn ranked_outliers(pages: &[PageRecord]) -> Vec<usize> {
    let mut outliers: Vec<usize> = (0..pages.len()).filter(|&i| pages[i].is_outlier).collect();
    outliers.sort_by(|&a, &b| pages[b].z_score.total_cmp(&pages[a].z_score));
    outliers
}

/// Lead of the top z-score over the runner-up, in percent of the top.
fn gap_percent(top: f64, second: f64) -> f64 {
    if top == 0.0 {
        return 0.0;
    }
    (top - second) / top * 100.0
}

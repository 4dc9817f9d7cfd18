//! Financial term matching.

use crate::error::Result;
use crate::model::{PageInput, PageRecord};
use regex::{Regex, RegexBuilder};
use std::collections::BTreeSet;
use unicode_normalization::UnicodeNormalization;

/// Built-in lexicon of income statement vocabulary.
///
/// Each entry counts at most once per page no matter how often it occurs.
pub const FINANCIAL_TERMS: &[&str] = &[
    r"\bRevenue from operations\b",
    r"\bOther Income\b",
    r"\bTotal Income\b",
    r"\bExpense\b",
    r"\bFinance Costs\b",
    r"\bDepreciation\b",
    r"\bBefore Tax\b",
    r"\bProfit before tax\b",
    r"\bExceptional\b",
    r"\bTax Expense\b",
    r"\bCurrent Tax\b",
    r"\bDeferred Tax\b",
    r"\bNet Income\b",
    r"\bComprehensive Income\b",
    r"\bReclassified\b",
    r"\bAttributable to\b",
    r"\bControlling\b",
    r"\bDiluted\b",
    r"\bEquity Share\b",
    r"\bProfit after tax\b",
    r"\bValue\b",
    r"\b(lakhs?|millions?|crores?)\b",
];

/// Matches page text against a case-insensitive lexicon.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    patterns: Vec<Regex>,
}

impl TermMatcher {
    /// Create a matcher over the built-in [`FINANCIAL_TERMS`].
    pub fn new() -> Self {
        let patterns = FINANCIAL_TERMS
            .iter()
            .map(|p| compile(p).expect("built-in lexicon pattern is valid"))
            .collect();
        Self { patterns }
    }

    /// Create a matcher over a custom lexicon.
    pub fn with_lexicon<S: AsRef<str>>(lexicon: &[S]) -> Result<Self> {
        let patterns = lexicon
            .iter()
            .map(|p| compile(p.as_ref()))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Number of lexicon entries.
    pub fn lexicon_len(&self) -> usize {
        self.patterns.len()
    }

    /// Find the literal text of the first match of every lexicon entry.
    ///
    /// # Example
    ///
    /// ```
    /// use resultpage::TermMatcher;
    ///
    /// let matcher = TermMatcher::new();
    /// let terms = matcher.find_terms("Profit before tax (Rs. in Lakhs)");
    /// assert!(terms.contains("Profit before tax"));
    /// assert!(terms.contains("before tax"));
    /// assert!(terms.contains("Lakhs"));
    /// ```
    pub fn find_terms(&self, text: &str) -> BTreeSet<String> {
        self.patterns
            .iter()
            .filter_map(|re| re.find(text))
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Number of distinct lexicon entries found in `text`.
    pub fn count_terms(&self, text: &str) -> usize {
        self.find_terms(text).len()
    }

    /// Term-match one input page against its normalized text.
    pub fn analyze_page(&self, page: &PageInput, min_financial_terms: usize) -> PageRecord {
        let terms = self.find_terms(&prepare_text(&page.text));
        log::trace!(
            "Page {}: {} unique terms",
            page.page_number,
            terms.len()
        );
        PageRecord::new(
            page.page_number,
            page.text.clone(),
            terms,
            page.is_extraction_source,
            min_financial_terms,
        )
    }
}

impl Default for TermMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// NFKC-normalize and trim extracted text.
///
/// Folds ligatures and compatibility spaces that PDF and OCR output carry,
/// so "Proﬁt" matches "Profit".
pub fn prepare_text(text: &str) -> String {
    let normalized: String = text.nfkc().collect();
    normalized.trim().to_string()
}

fn compile(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_empty_text_has_no_terms() {
        let matcher = TermMatcher::new();
        assert!(matcher.find_terms("").is_empty());
        assert_eq!(matcher.count_terms("   \n "), 0);
    }

    #[test]
    fn test_repeated_term_counts_once() {
        let matcher = TermMatcher::new();
        let text = "Depreciation 12.0\nDEPRECIATION 14.2\ndepreciation 9.8";
        let terms = matcher.find_terms(text);
        assert_eq!(terms.len(), 1);
        // First occurrence wins
        assert!(terms.contains("Depreciation"));
    }

    #[test]
    fn test_case_insensitive_matching() {
        let matcher = TermMatcher::new();
        let terms = matcher.find_terms("REVENUE FROM OPERATIONS\nother income");
        assert!(terms.contains("REVENUE FROM OPERATIONS"));
        assert!(terms.contains("other income"));
    }

    #[test]
    fn test_word_boundaries() {
        let matcher = TermMatcher::new();
        // "Expenses" is not "Expense", "Valuer" is not "Value"
        let terms = matcher.find_terms("Total Expenses; Registered Valuer");
        assert!(terms.is_empty());
    }

    #[test]
    fn test_unit_words() {
        let matcher = TermMatcher::new();
        assert_eq!(matcher.count_terms("(Rs. in crores)"), 1);
        assert_eq!(matcher.count_terms("USD Million"), 1);
        // Single lexicon entry covers every unit word
        assert_eq!(matcher.count_terms("lakh and crore"), 1);
    }

    #[test]
    fn test_results_statement_terms() {
        let matcher = TermMatcher::new();
        let text = "Revenue from operations\nOther Income\nTotal Income\nExpense\n\
                    Finance Costs\nDepreciation\nProfit before tax\nTax Expense\n\
                    Current Tax\nDeferred Tax\nDiluted\n(Rs. in Lakhs)";
        let terms = matcher.find_terms(text);
        // "Before Tax" also matches inside "Profit before tax"
        assert_eq!(terms.len(), 13);
    }

    #[test]
    fn test_prepare_text_folds_ligatures() {
        let text = prepare_text("  Pro\u{FB01}t before tax\u{00A0} ");
        assert_eq!(text, "Profit before tax");
        let matcher = TermMatcher::new();
        assert!(matcher.find_terms(&text).contains("Profit before tax"));
    }

    #[test]
    fn test_analyze_page() {
        let matcher = TermMatcher::new();
        let page = PageInput::reextracted(2, "  Diluted EPS, Equity Share capital ");
        let record = matcher.analyze_page(&page, 2);
        assert_eq!(record.page_number, 2);
        assert_eq!(record.raw_text, "  Diluted EPS, Equity Share capital ");
        assert_eq!(record.unique_term_count, 2);
        assert!(record.is_relevant);
        assert!(record.is_extraction_source);
    }

    #[test]
    fn test_analyze_page_keeps_extracted_text() {
        let matcher = TermMatcher::new();
        let page = PageInput::new(5, " Pro\u{FB01}t before tax\n");
        let record = matcher.analyze_page(&page, 7);
        assert_eq!(record.raw_text, page.text);
        assert!(record.matched_terms.contains("Profit before tax"));
        assert_eq!(record.unique_term_count, 2);
    }

    #[test]
    fn test_custom_lexicon() {
        let matcher = TermMatcher::with_lexicon(&[r"\bEBITDA\b"]).unwrap();
        assert_eq!(matcher.lexicon_len(), 1);
        assert_eq!(matcher.count_terms("ebitda margin"), 1);
    }

    #[test]
    fn test_invalid_lexicon_pattern() {
        let result = TermMatcher::with_lexicon(&["(unclosed"]);
        assert!(matches!(result, Err(Error::Pattern(_))));
    }

    #[test]
    fn test_builtin_lexicon_size() {
        assert_eq!(TermMatcher::new().lexicon_len(), FINANCIAL_TERMS.len());
    }
}

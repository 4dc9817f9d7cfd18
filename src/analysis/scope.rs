//! Accounting scope detection for multi page layouts.

use crate::model::Classification;
use regex::{Regex, RegexBuilder};

/// Scope markers found on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScopeMarkers {
    /// "Standalone" appears on the page
    pub standalone: bool,

    /// "Consolidated" appears on a line that does not say "separate"
    pub consolidated: bool,

    /// "Consolidated" appears, but only on lines that say "separate"
    pub separate_consolidated: bool,

    /// "Segment" appears on the page
    pub segment: bool,
}

impl ScopeMarkers {
    /// Derive the page label from the markers.
    ///
    /// # Example
    ///
    /// ```
    /// use resultpage::analysis::ScopeMarkers;
    /// use resultpage::Classification;
    ///
    /// let markers = ScopeMarkers { consolidated: true, segment: true, ..Default::default() };
    /// assert_eq!(markers.label(), Classification::Consolidated { segment: true });
    /// ```
    pub fn label(&self) -> Classification {
        let segment = self.segment;
        match (self.standalone, self.consolidated) {
            (true, true) => Classification::RareCase { segment },
            (true, false) => Classification::Standalone {
                segment,
                separate_consolidated: self.separate_consolidated,
            },
            (false, true) => Classification::Consolidated { segment },
            (false, false) if segment => Classification::Segment,
            (false, false) => Classification::ClassificationFailed,
        }
    }
}

/// Keyword detector for Standalone / Consolidated / Segment markers.
#[derive(Debug, Clone)]
pub struct ScopeDetector {
    standalone: Regex,
    consolidated: Regex,
    separate: Regex,
    segment: Regex,
}

impl ScopeDetector {
    /// Create a detector with the built-in keyword patterns.
    pub fn new() -> Self {
        Self {
            standalone: keyword(r"\bStandalone\b"),
            consolidated: keyword(r"\bConsolidat\w*\b"),
            separate: keyword(r"\bseparat\w*\b"),
            segment: keyword(r"\bSegment\b"),
        }
    }

    /// Scan page text for scope markers.
    ///
    /// A line mentioning "Consolidated" next to "separate" (as in
    /// "separate consolidated figures are not presented") does not count as a
    /// Consolidated marker.
    pub fn detect(&self, text: &str) -> ScopeMarkers {
        let mut consolidated = false;
        let mut any_consolidated = false;
        for line in text.lines() {
            if self.consolidated.is_match(line) {
                any_consolidated = true;
                if !self.separate.is_match(line) {
                    consolidated = true;
                    break;
                }
            }
        }

        ScopeMarkers {
            standalone: self.standalone.is_match(text),
            consolidated,
            separate_consolidated: any_consolidated && !consolidated,
            segment: self.segment.is_match(text),
        }
    }

    /// Detect markers and return the resulting label.
    pub fn classify(&self, text: &str) -> Classification {
        self.detect(text).label()
    }
}

impl Default for ScopeDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn keyword(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("scope keyword pattern is valid")
}

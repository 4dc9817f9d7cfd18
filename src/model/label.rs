//! Page classification labels.

use crate::layout::ScopeVariant;
use serde::{Serialize, Serializer};
use std::fmt;

/// Label assigned to a page by the classifier.
///
/// Serialized as its human-readable form, e.g. `"Results Page"` or
/// `"Consolidated (Segment)"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Classification {
    /// Page did not stand out from the rest of the document
    #[default]
    NotRelevant,

    /// Outlier page without enough financial terms to be the results page
    RelevantFinancialContent,

    /// The chosen quarterly results page
    ResultsPage,

    /// One of several results candidates that could not be separated
    MoreResultsPages,

    /// A results candidate demoted by duplicate suppression
    DuplicateResultsPage,

    /// Standalone statement
    Standalone {
        /// Page also carries segment information
        segment: bool,
        /// "Consolidated" only appeared on lines that also say "separate"
        separate_consolidated: bool,
    },

    /// Consolidated statement
    Consolidated {
        /// Page also carries segment information
        segment: bool,
    },

    /// Segment information without a scope marker
    Segment,

    /// Both Standalone and Consolidated markers on the same page
    RareCase {
        /// Page also carries segment information
        segment: bool,
    },

    /// No scope marker found on a multi-page outlier
    ClassificationFailed,
}

impl Classification {
    /// Check if this label names the chosen results page.
    pub fn is_results_page(&self) -> bool {
        matches!(self, Classification::ResultsPage)
    }

    /// Check if this label carries the keyword of the given accounting scope.
    ///
    /// `RareCase` carries both markers but names neither, so it never
    /// matches.
    pub fn bears_scope(&self, scope: ScopeVariant) -> bool {
        match scope {
            ScopeVariant::Standalone => matches!(self, Classification::Standalone { .. }),
            ScopeVariant::Consolidated => matches!(self, Classification::Consolidated { .. }),
        }
    }

    /// Check if this label carries either scope keyword.
    pub fn bears_any_scope(&self) -> bool {
        self.bears_scope(ScopeVariant::Standalone) || self.bears_scope(ScopeVariant::Consolidated)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Classification::NotRelevant => f.write_str("Not Relevant"),
            Classification::RelevantFinancialContent => f.write_str("Relevant Financial Content"),
            Classification::ResultsPage => f.write_str("Results Page"),
            Classification::MoreResultsPages => f.write_str("More Results Pages"),
            Classification::DuplicateResultsPage => f.write_str("Duplicate Results Page"),
            Classification::Standalone {
                segment,
                separate_consolidated,
            } => match (segment, separate_consolidated) {
                (false, false) => f.write_str("Standalone"),
                (true, false) => f.write_str("Standalone (Segment)"),
                (false, true) => f.write_str("Standalone (with separate Consolidated mention)"),
                (true, true) => {
                    f.write_str("Standalone (Segment, with separate Consolidated mention)")
                }
            },
            Classification::Consolidated { segment: false } => f.write_str("Consolidated"),
            Classification::Consolidated { segment: true } => f.write_str("Consolidated (Segment)"),
            Classification::Segment => f.write_str("Segment"),
            Classification::RareCase { segment: false } => f.write_str("Rare Case"),
            Classification::RareCase { segment: true } => f.write_str("Rare Case (Segment)"),
            Classification::ClassificationFailed => f.write_str("Classification Failed"),
        }
    }
}

impl Serialize for Classification {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
